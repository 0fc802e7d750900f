//! Support and collision resolution
//!
//! The algorithmic heart of the game. For each ordered pair of placed
//! tiles whose bounding boxes overlap, the resolver runs a pixel-mask
//! overlap test, samples the acting tile's three underside detection
//! points against the other tile's mask, and from that classification
//! decides gravity gating, tumbling, and stabilization.
//!
//! This is a heuristic, not a rigorous contact solver: the thresholds
//! below are gameplay-tuned and the whole pass trades physical
//! correctness for a predictable "looks stable / looks wobbly" feel.
//! Resolution is asymmetric per acting tile, so the controller runs it
//! in both directions for every pair, in placed-vector order.

use glam::Vec2;

use super::events::EventQueue;
use super::tile::TileInstance;
use crate::consts::{MAX_ANGULAR_SPEED, MAX_TILE_SPEED};

/// Tiles whose bottom is within this many pixels of the ground never
/// tumble; the ground is about to catch them anyway.
const GROUND_TUMBLE_TOLERANCE: f32 = 15.0;
/// Horizontal nudge away from a lone supported corner.
const TUMBLE_NUDGE: f32 = 2.0;
/// Angular kick on a single-corner tumble (clamped to ±3 on exit).
const TUMBLE_SPIN: f32 = 15.0;
/// Cosmetic tilt requested on a single-corner tumble, degrees.
const TUMBLE_TILT: f32 = 15.0;
/// Horizontal speed above which a barely-supported tile tilts hard.
const SPEED_TUMBLE_TRIGGER: f32 = 50.0;
/// Cosmetic tilt requested for a fast, barely-supported tile, degrees.
const SPEED_TUMBLE_TILT: f32 = 30.0;
/// Damping applied to well-supported tiles each resolver pass.
const STABLE_ANGULAR_DAMP: f32 = 0.8;
const STABLE_HORIZONTAL_DAMP: f32 = 0.9;
/// Per-pass decay of the cosmetic tilt on well-supported tiles.
const VISUAL_DECAY: f32 = 0.9;
/// Tilt beyond which a stabilized tile gets a return-to-upright request.
const UPRIGHT_THRESHOLD: f32 = 5.0;

/// Which of the three underside detection points found support.
///
/// Index 0 is bottom-center, 1 bottom-left, 2 bottom-right.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SupportClass {
    pub center: bool,
    pub left: bool,
    pub right: bool,
}

impl SupportClass {
    pub fn points(&self) -> u32 {
        self.center as u32 + self.left as u32 + self.right as u32
    }

    pub fn any(&self) -> bool {
        self.center || self.left || self.right
    }

    /// Center-supported or resting on two-plus points: stable enough to
    /// resist wind and damp out wobble.
    pub fn is_stable(&self) -> bool {
        self.center || self.points() >= 2
    }
}

/// Sample the acting tile's detection points against one other tile's
/// occupancy mask. Points outside the other tile's bounds count as
/// unsupported.
pub fn classify_support(tile: &TileInstance, other: &TileInstance) -> SupportClass {
    let points = tile.detection_points();
    SupportClass {
        center: other.occupies(points[0]),
        left: other.occupies(points[1]),
        right: other.occupies(points[2]),
    }
}

/// Sample the tile's detection points against every other placed tile.
/// Used by the wind hazard's contact-resistance calculation.
pub fn classify_support_all(tile: &TileInstance, all: &[TileInstance]) -> SupportClass {
    let points = tile.detection_points();
    let mut class = SupportClass::default();
    for other in all {
        if other.id == tile.id {
            continue;
        }
        class.center |= other.occupies(points[0]);
        class.left |= other.occupies(points[1]);
        class.right |= other.occupies(points[2]);
    }
    class
}

/// Side-effect-free support query: does any detection point land inside
/// another tile's mask?
pub fn check_support(tile: &TileInstance, all: &[TileInstance]) -> bool {
    classify_support_all(tile, all).any()
}

/// Resolve one ordered tile pair. Mutates only the acting tile.
///
/// No mask overlap means no interaction of any kind: velocity, angular
/// velocity, gravity flag, and cosmetic state are all left untouched.
pub fn resolve_tile_collision(
    acting: &mut TileInstance,
    other: &TileInstance,
    ground_y: f32,
    events: &mut EventQueue,
) {
    // Cheap bounding-box prefilter before the pixel test
    if !acting.rect().intersects(&other.rect()) {
        return;
    }

    let (ax, ay) = acting.top_left();
    let (bx, by) = other.top_left();
    if !acting.mask().overlaps(other.mask(), (bx - ax, by - ay)) {
        return;
    }

    let class = classify_support(acting, other);

    // Gravity gating: any underside support holds the tile up this tick.
    // The placement controller re-evaluates support every tick, so a
    // tile that loses its footing starts falling again.
    if class.any() {
        acting.gravity_enabled = false;
    }

    let near_ground = acting.rect().bottom() >= ground_y - GROUND_TUMBLE_TOLERANCE;

    // Single-corner contact away from the ground: tip the tile off its
    // pivot. The angular kick exceeds the clamp on purpose; the clamp at
    // the end caps the effective value.
    if class.points() == 1 && !class.center && !near_ground {
        if class.right {
            acting.vel.x -= TUMBLE_NUDGE;
            acting.angular_vel = TUMBLE_SPIN;
            request_tilt(acting, events, -TUMBLE_TILT);
        } else if class.left {
            acting.vel.x += TUMBLE_NUDGE;
            acting.angular_vel = -TUMBLE_SPIN;
            request_tilt(acting, events, TUMBLE_TILT);
        }
    }

    // A fast-moving tile with at most one contact point tilts hard in
    // its direction of travel. Independent of the corner rule; both may
    // fire in one pass.
    if acting.vel.x.abs() > SPEED_TUMBLE_TRIGGER && class.points() <= 1 && !near_ground {
        let tilt = if acting.vel.x > 0.0 {
            SPEED_TUMBLE_TILT
        } else {
            -SPEED_TUMBLE_TILT
        };
        request_tilt(acting, events, tilt);
    }

    // Well-supported tiles shed wobble and drift back toward upright.
    if class.is_stable() {
        acting.angular_vel *= STABLE_ANGULAR_DAMP;
        acting.vel.x *= STABLE_HORIZONTAL_DAMP;
        if acting.visual_rotation().abs() > UPRIGHT_THRESHOLD {
            events.push_rotation(acting.id, 0.0);
        }
        acting.decay_visual_rotation(VISUAL_DECAY);
    }

    // Hard safety clamp against force accumulation blow-up
    acting.vel = acting.vel.clamp(
        Vec2::splat(-MAX_TILE_SPEED),
        Vec2::splat(MAX_TILE_SPEED),
    );
    acting.angular_vel = acting
        .angular_vel
        .clamp(-MAX_ANGULAR_SPEED, MAX_ANGULAR_SPEED);
}

/// Emit a rotation request and track the tilt on the tile so the
/// stabilization rule can later see that it needs righting. Also used
/// by hazards when they slam into a tile.
pub(crate) fn request_tilt(tile: &mut TileInstance, events: &mut EventQueue, degrees: f32) {
    tile.set_visual_rotation(degrees);
    events.push_rotation(tile.id, degrees);
}
