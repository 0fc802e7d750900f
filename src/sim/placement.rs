//! Tile placement and the per-tick simulation loop
//!
//! Owns the two disjoint tile pools (selection strip and build area)
//! plus the at-most-one tile currently being dragged. Placement is
//! validated with the same pixel-mask overlap test the physics uses, so
//! a drop is rejected exactly when the tiles would interpenetrate.

use glam::Vec2;

use super::events::{EventQueue, GameEvent};
use super::support::{check_support, resolve_tile_collision};
use super::tile::TileInstance;
use crate::consts::{STRIP_FIRST_X, STRIP_SPACING, STRIP_TILE_Y};
use crate::levels::LevelConfig;

/// A tile whose bottom edge is within this many pixels of the ground
/// keeps gravity off even when nothing else supports it.
const GROUND_SUPPORT_TOLERANCE: f32 = 5.0;

/// Controller for the selection pool, the placed pool, and dragging.
#[derive(Debug)]
pub struct PlacementController {
    /// Tiles still available in the selection strip
    selection: Vec<TileInstance>,
    /// Tiles committed to the build area
    placed: Vec<TileInstance>,
    /// Tile lifted out of the selection pool, not yet placed
    dragged: Option<TileInstance>,
    /// Pointer offset from the dragged tile's center at grab time
    drag_offset: Vec2,
    /// Drops below this y return the tile to the strip
    selection_area_top: f32,
    next_id: u32,
}

impl PlacementController {
    /// Build the selection pool from a level's tile allotment, laid out
    /// left to right along the strip in allotment order.
    pub fn new(level: &LevelConfig, selection_area_top: f32) -> Self {
        let mut controller = Self {
            selection: Vec::new(),
            placed: Vec::new(),
            dragged: None,
            drag_offset: Vec2::ZERO,
            selection_area_top,
            next_id: 1,
        };

        for (slot, kind) in level.tile_allotment().enumerate() {
            let id = controller.next_id;
            controller.next_id += 1;
            let pos = Vec2::new(strip_slot_x(slot), STRIP_TILE_Y);
            let mut tile = TileInstance::new(id, kind, pos, true);
            tile.home_slot = slot;
            controller.selection.push(tile);
        }

        controller
    }

    pub fn selection_tiles(&self) -> &[TileInstance] {
        &self.selection
    }

    pub fn placed_tiles(&self) -> &[TileInstance] {
        &self.placed
    }

    pub fn placed_tiles_mut(&mut self) -> &mut [TileInstance] {
        &mut self.placed
    }

    pub fn dragged_tile(&self) -> Option<&TileInstance> {
        self.dragged.as_ref()
    }

    pub fn has_placed_tiles(&self) -> bool {
        !self.placed.is_empty()
    }

    /// Pointer-down: hit-test the selection strip topmost-first and lift
    /// the hit tile into the drag slot. Returns true if a drag started.
    pub fn begin_drag(&mut self, point: Vec2) -> bool {
        if self.dragged.is_some() {
            return false;
        }

        // Later tiles draw on top, so scan in reverse
        if let Some(idx) = self
            .selection
            .iter()
            .rposition(|tile| tile.rect().contains(point))
        {
            let tile = self.selection.remove(idx);
            self.drag_offset = tile.pos - point;
            self.dragged = Some(tile);
            return true;
        }
        false
    }

    /// Track the pointer while dragging.
    pub fn update_drag(&mut self, point: Vec2) {
        if let Some(tile) = self.dragged.as_mut() {
            tile.pos = point + self.drag_offset;
        }
    }

    /// Pointer-up: commit the dragged tile if the drop lands in the
    /// build area and does not overlap any placed tile's mask; otherwise
    /// send it back to the strip.
    pub fn end_drag(&mut self, point: Vec2, events: &mut EventQueue) {
        let Some(mut tile) = self.dragged.take() else {
            return;
        };

        if point.y < self.selection_area_top {
            tile.pos = point;
            let blocked = self.placed.iter().any(|placed| {
                let (ax, ay) = tile.top_left();
                let (bx, by) = placed.top_left();
                tile.mask().overlaps(placed.mask(), (bx - ax, by - ay))
            });

            if !blocked {
                log::debug!("placed {} tile at {}", tile.kind.name, tile.pos);
                events.push(GameEvent::TilePlaced { pos: tile.pos });
                self.placed.push(tile);
                return;
            }
        }

        // Rejected drop: back to the strip
        self.return_to_strip(tile);
    }

    fn return_to_strip(&mut self, mut tile: TileInstance) {
        tile.reset_physics();
        let slot = tile.home_slot;
        let idx = self
            .selection
            .iter()
            .position(|t| t.home_slot > slot)
            .unwrap_or(self.selection.len());
        self.selection.insert(idx, tile);
        self.relayout_strip();
    }

    /// Reposition strip tiles into their slots, preserving original order.
    fn relayout_strip(&mut self) {
        for (slot, tile) in self.selection.iter_mut().enumerate() {
            tile.pos = Vec2::new(strip_slot_x(slot), STRIP_TILE_Y);
        }
    }

    /// Return every placed tile to the selection strip with physics
    /// state cleared, restoring the original slot order.
    pub fn reset(&mut self) {
        if let Some(tile) = self.dragged.take() {
            self.selection.push(tile);
        }
        self.selection.append(&mut self.placed);
        for tile in &mut self.selection {
            tile.reset_physics();
        }
        self.selection.sort_by_key(|t| t.home_slot);
        self.relayout_strip();
    }

    /// Advance the physics simulation one tick.
    ///
    /// Pass 1, per tile in placed order: re-evaluate support for
    /// non-static tiles (re-enabling gravity when a tile lost its
    /// footing and is not about to land), integrate, and resolve ground
    /// collision. Pass 2: pairwise collision resolution over all
    /// distinct ordered pairs - resolution is asymmetric per acting
    /// tile, so both directions run. Pair order follows the placed
    /// vector and is part of the game's feel; do not reorder.
    pub fn simulate(&mut self, dt: f32, ground_y: f32, events: &mut EventQueue) {
        for i in 0..self.placed.len() {
            if !self.placed[i].is_static && !check_support(&self.placed[i], &self.placed) {
                let tile = &mut self.placed[i];
                // Unsupported and clearly above ground: start falling
                // again. Within the ground tolerance the ground itself
                // counts as support.
                tile.gravity_enabled =
                    tile.rect().bottom() < ground_y - GROUND_SUPPORT_TOLERANCE;
            }

            let tile = &mut self.placed[i];
            tile.apply_physics(dt);
            tile.resolve_ground_collision(ground_y);
        }

        for i in 0..self.placed.len() {
            for j in 0..self.placed.len() {
                if i == j {
                    continue;
                }
                let (acting, other) = pair_mut(&mut self.placed, i, j);
                resolve_tile_collision(acting, other, ground_y, events);
            }
        }
    }

    /// Scoring readout: height of the tower's highest top edge above the
    /// ground, 0 with nothing placed.
    pub fn tower_height(&self, ground_y: f32) -> f32 {
        let min_top = self
            .placed
            .iter()
            .map(|tile| tile.rect().top())
            .fold(ground_y, f32::min);
        (ground_y - min_top).max(0.0)
    }
}

/// X coordinate of a selection strip slot.
fn strip_slot_x(slot: usize) -> f32 {
    STRIP_FIRST_X + STRIP_SPACING * slot as f32
}

/// Split a slice into one mutable and one shared element at distinct
/// indices.
fn pair_mut(tiles: &mut [TileInstance], i: usize, j: usize) -> (&mut TileInstance, &TileInstance) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = tiles.split_at_mut(j);
        (&mut head[i], &tail[0])
    } else {
        let (head, tail) = tiles.split_at_mut(i);
        (&mut tail[0], &head[j])
    }
}
