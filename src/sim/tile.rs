//! Tile physics body
//!
//! Owns per-instance kinematic state and the cosmetic tilt angle. The
//! physics model is deliberately coarse: explicit Euler integration,
//! isotropic friction damping, and a hard vertical-velocity reset while
//! the tile is supported. Going static is a one-way settle latch that
//! freezes integration; it does not remove the tile from collision or
//! support queries.

use glam::Vec2;

use super::catalog::TileKind;
use super::mask::{Aabb, Mask};
use crate::consts::{MAX_VISUAL_ROTATION, SETTLE_SPEED, TILE_GRAVITY};

/// A tile instance, either resting in the selection strip or placed in
/// the build area. Owned by exactly one pool at a time.
#[derive(Debug, Clone)]
pub struct TileInstance {
    pub id: u32,
    pub kind: &'static TileKind,
    /// Canonical occupancy mask; never rotated.
    mask: Mask,
    /// World position of the tile's center point.
    pub pos: Vec2,
    pub vel: Vec2,
    pub angular_vel: f32,
    /// Cosmetic tilt in degrees, clamped to ±45. Never used for collision.
    visual_rotation: f32,
    /// Settle latch; frozen physics integration once true.
    pub is_static: bool,
    /// False while the tile is adequately supported.
    pub gravity_enabled: bool,
    /// Slot index in the selection strip, used to restore original order
    /// on level reset.
    pub home_slot: usize,
}

impl TileInstance {
    /// Create a tile of the given kind centered at `pos`.
    ///
    /// `gravity_enabled` is an explicit required parameter: each instance
    /// carries its own flag, set here and mutated only by the resolver
    /// and placement controller.
    pub fn new(id: u32, kind: &'static TileKind, pos: Vec2, gravity_enabled: bool) -> Self {
        Self {
            id,
            kind,
            mask: kind.mask(),
            pos,
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            visual_rotation: 0.0,
            is_static: false,
            gravity_enabled,
            home_slot: 0,
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Bounding box in world coordinates (canonical orientation).
    pub fn rect(&self) -> Aabb {
        Aabb::from_center(self.pos, self.kind.size)
    }

    /// Top-left corner of the canonical bounding box, in integer pixels.
    pub fn top_left(&self) -> (i32, i32) {
        let (w, h) = self.kind.size;
        (
            (self.pos.x - w as f32 / 2.0) as i32,
            (self.pos.y - h as f32 / 2.0) as i32,
        )
    }

    /// The three support detection points on the tile's underside:
    /// bottom-center, bottom-left corner, bottom-right corner. Derived
    /// from the canonical bounding box, never the cosmetic rotation.
    pub fn detection_points(&self) -> [(i32, i32); 3] {
        let (w, h) = (self.kind.size.0 as i32, self.kind.size.1 as i32);
        let (x, y) = self.top_left();
        [
            (x + w / 2, y + h), // bottom-center
            (x, y + h),         // bottom-left corner
            (x + w, y + h),     // bottom-right corner
        ]
    }

    /// Test whether a world-space pixel falls inside this tile's
    /// occupancy mask. Out-of-bounds pixels report `false`.
    pub fn occupies(&self, point: (i32, i32)) -> bool {
        let (tx, ty) = self.top_left();
        self.mask.get(point.0 - tx, point.1 - ty)
    }

    pub fn visual_rotation(&self) -> f32 {
        self.visual_rotation
    }

    /// Set the cosmetic tilt, clamped to the ±45° cap.
    pub fn set_visual_rotation(&mut self, degrees: f32) {
        self.visual_rotation = degrees.clamp(-MAX_VISUAL_ROTATION, MAX_VISUAL_ROTATION);
    }

    /// Decay the cosmetic tilt toward upright.
    pub fn decay_visual_rotation(&mut self, factor: f32) {
        self.visual_rotation *= factor;
    }

    /// Per-tick integration: gravity, friction damping, explicit Euler.
    ///
    /// No-op while static. A supported tile (gravity disabled) gets its
    /// vertical velocity reset outright rather than damped.
    pub fn apply_physics(&mut self, dt: f32) {
        if self.is_static {
            return;
        }

        if self.gravity_enabled {
            self.vel.y += TILE_GRAVITY * dt;
        } else {
            self.vel.y = 0.0;
        }

        self.vel *= self.kind.friction;
        self.pos += self.vel * dt;
    }

    /// Push the tile out of the ground, bounce with restitution, and
    /// settle (latch static) once the bounce speed is negligible.
    pub fn resolve_ground_collision(&mut self, ground_y: f32) {
        let bottom = self.rect().bottom();
        if bottom > ground_y {
            let overlap = bottom - ground_y;
            self.pos.y -= overlap;
            self.vel.y *= -self.kind.restitution;
            if self.vel.y.abs() < SETTLE_SPEED {
                self.vel.y = 0.0;
                self.is_static = true;
            }
        }
    }

    /// Clear all kinematic state, e.g. when returning to the selection
    /// strip on level reset.
    pub fn reset_physics(&mut self) {
        self.vel = Vec2::ZERO;
        self.angular_vel = 0.0;
        self.visual_rotation = 0.0;
        self.is_static = false;
        self.gravity_enabled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::TileKindId;

    fn square(id: u32, pos: Vec2) -> TileInstance {
        TileInstance::new(id, TileKind::of(TileKindId::Square), pos, true)
    }

    #[test]
    fn test_gravity_integration() {
        let mut tile = square(1, Vec2::new(100.0, 100.0));
        let dt = 1.0 / 60.0;
        tile.apply_physics(dt);

        // One tick of gravity, damped by friction, integrated into position
        let expected_vy = TILE_GRAVITY * dt * tile.kind.friction;
        assert!((tile.vel.y - expected_vy).abs() < 1e-4);
        assert!(tile.pos.y > 100.0);
    }

    #[test]
    fn test_gravity_disabled_resets_vertical_velocity() {
        let mut tile = square(1, Vec2::new(100.0, 100.0));
        tile.vel = Vec2::new(20.0, 150.0);
        tile.gravity_enabled = false;
        tile.apply_physics(1.0 / 60.0);

        assert_eq!(tile.vel.y, 0.0);
        // Horizontal velocity is only damped, not reset
        assert!((tile.vel.x - 20.0 * tile.kind.friction).abs() < 1e-4);
    }

    #[test]
    fn test_static_tile_skips_integration() {
        let mut tile = square(1, Vec2::new(100.0, 100.0));
        tile.is_static = true;
        tile.vel = Vec2::new(50.0, 50.0);
        tile.apply_physics(1.0 / 60.0);
        assert_eq!(tile.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_ground_collision_bounce_and_settle() {
        // Fast impact: pushed out and bounced with restitution
        let mut tile = square(1, Vec2::new(100.0, 870.0));
        tile.vel.y = 200.0;
        tile.resolve_ground_collision(900.0);
        assert_eq!(tile.rect().bottom(), 900.0);
        assert!((tile.vel.y + 200.0 * tile.kind.restitution).abs() < 1e-4);
        assert!(!tile.is_static);

        // Slow impact: bounce speed under threshold latches static
        let mut tile = square(2, Vec2::new(100.0, 854.0));
        tile.vel.y = 20.0;
        tile.resolve_ground_collision(900.0);
        assert_eq!(tile.vel.y, 0.0);
        assert!(tile.is_static);
    }

    #[test]
    fn test_detection_points_from_canonical_box() {
        let tile = square(1, Vec2::new(148.0, 148.0));
        let points = tile.detection_points();
        assert_eq!(points[0], (148, 196)); // bottom-center
        assert_eq!(points[1], (100, 196)); // bottom-left
        assert_eq!(points[2], (196, 196)); // bottom-right
    }

    #[test]
    fn test_visual_rotation_clamped_and_ignored_by_collision() {
        let mut tile = square(1, Vec2::new(100.0, 100.0));
        tile.set_visual_rotation(90.0);
        assert_eq!(tile.visual_rotation(), 45.0);
        tile.set_visual_rotation(-400.0);
        assert_eq!(tile.visual_rotation(), -45.0);

        // Collision queries read the canonical mask regardless of tilt
        assert!(tile.occupies((100, 100)));
        assert!(tile.occupies((52, 52)));
        assert!(!tile.occupies((51, 100)));
    }
}
