//! Meteorite shower hazard
//!
//! Spawns a stream of meteorites with randomized trajectories, sizes,
//! and masses. Each meteorite is single-use: it strikes at most one
//! tile, applies an impact proportional to its momentum, and
//! deactivates. The shower finishes only after its duration has elapsed
//! AND every meteorite in flight has landed or left the screen.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::{Hazard, HazardPhase};
use crate::sim::events::{EventQueue, GameEvent};
use crate::sim::mask::Aabb;
use crate::sim::support::request_tilt;
use crate::sim::tile::TileInstance;

/// Seconds between spawns while the shower is active.
const SPAWN_INTERVAL: f32 = 0.1;
/// Total meteorites per shower.
const MAX_METEORITES: u32 = 45;
/// Meteorite gravity; they fall faster than tiles.
const METEORITE_GRAVITY: f32 = 800.0;
/// Discrete size/mass table; jitter is applied to the mass.
const SIZES: [f32; 4] = [24.0, 30.0, 36.0, 50.0];
const MASSES: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
/// Impact force scale for game balance.
const IMPACT_SCALE: f32 = 0.7;
/// Spin per pixel of horizontal hit offset, scaled by impact.
const ANGULAR_IMPACT_SCALE: f32 = 0.01;
/// Cosmetic tilt on impact, degrees (sign follows hit side).
const IMPACT_TILT: f32 = 20.0;
/// Horizontal margin beyond which a meteorite is gone.
const EXIT_MARGIN: f32 = 100.0;

/// A single falling meteorite.
#[derive(Debug, Clone)]
pub struct Meteorite {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    active: bool,
    /// Tiles this meteorite has already struck (at most one, since a
    /// strike deactivates it).
    struck: Vec<u32>,
}

impl Meteorite {
    fn new(pos: Vec2, vel: Vec2, size: f32, mass: f32) -> Self {
        Self {
            pos,
            vel,
            radius: size / 2.0,
            mass,
            active: true,
            struck: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn update(&mut self, dt: f32, screen_width: f32, screen_height: f32) {
        if !self.active {
            return;
        }

        self.vel.y += METEORITE_GRAVITY * dt;
        self.pos += self.vel * dt;

        if self.pos.y > screen_height
            || self.pos.x < -EXIT_MARGIN
            || self.pos.x > screen_width
        {
            self.active = false;
        }
    }

    fn rect(&self) -> Aabb {
        let d = (self.radius * 2.0) as u32;
        Aabb::from_center(self.pos, (d, d))
    }

    /// Strike a tile if overlapping and not already struck by this
    /// meteorite. Applies impact, spin, tilt, and an instantaneous
    /// friction damping, then deactivates.
    fn check_tile_collision(&mut self, tile: &mut TileInstance, events: &mut EventQueue) {
        if !self.active || self.struck.contains(&tile.id) {
            return;
        }
        if !self.rect().intersects(&tile.rect()) {
            return;
        }

        let impact_force = self.mass * self.vel.length() * IMPACT_SCALE;

        let to_tile = tile.pos - self.pos;
        let distance = to_tile.length();
        if distance > 0.0 {
            let dir = to_tile / distance;
            let mass_factor = 1.0 / (1.0 + 0.5 * tile.kind.mass);

            tile.vel += dir * impact_force * mass_factor;

            // Off-center hits spin the tile
            let hit_offset = self.pos.x - tile.pos.x;
            tile.angular_vel += hit_offset * impact_force * mass_factor * ANGULAR_IMPACT_SCALE;

            let tilt = if hit_offset > 0.0 {
                IMPACT_TILT
            } else {
                -IMPACT_TILT
            };
            request_tilt(tile, events, tilt);

            // Impact damping: the tile absorbs part of the blow
            tile.vel *= tile.kind.friction;

            events.push(GameEvent::MeteoriteExplosion { pos: self.pos });
            log::debug!("meteorite struck tile {} at {}", tile.id, self.pos);

            self.struck.push(tile.id);
            self.active = false;
        }
    }
}

pub struct MeteoriteShower {
    trigger_time: f32,
    duration: f32,
    phase: HazardPhase,
    time_active: f32,
    spawn_timer: f32,
    spawned: u32,
    meteorites: Vec<Meteorite>,
    screen_width: f32,
    screen_height: f32,
}

impl MeteoriteShower {
    pub fn new(screen_width: f32, screen_height: f32, trigger_time: f32, duration: f32) -> Self {
        Self {
            trigger_time,
            duration,
            phase: HazardPhase::Pending,
            time_active: 0.0,
            spawn_timer: 0.0,
            spawned: 0,
            meteorites: Vec::new(),
            screen_width,
            screen_height,
        }
    }

    pub fn meteorites(&self) -> &[Meteorite] {
        &self.meteorites
    }

    fn spawn_meteorite(&mut self, rng: &mut Pcg32) {
        let pos = Vec2::new(
            rng.random_range(50.0..self.screen_width - 50.0),
            -50.0,
        );
        let vel = Vec2::new(
            rng.random_range(-100.0..100.0),
            rng.random_range(150.0..300.0),
        );

        let idx = rng.random_range(0..SIZES.len());
        let size = SIZES[idx];
        let mass = MASSES[idx] * rng.random_range(0.8..1.2);

        self.meteorites.push(Meteorite::new(pos, vel, size, mass));
        self.spawned += 1;
        log::debug!(
            "spawned meteorite {}/{} at x={:.1}",
            self.spawned,
            MAX_METEORITES,
            pos.x
        );
    }
}

impl Hazard for MeteoriteShower {
    fn name(&self) -> &'static str {
        "meteorite shower"
    }

    fn phase(&self) -> HazardPhase {
        self.phase
    }

    fn trigger_time(&self) -> f32 {
        self.trigger_time
    }

    fn update(&mut self, dt: f32, sim_time: f32, rng: &mut Pcg32) {
        if self.phase == HazardPhase::Pending && sim_time >= self.trigger_time {
            self.phase = HazardPhase::Active;
            log::info!("meteorite shower started");
        }

        if self.phase != HazardPhase::Active {
            return;
        }

        self.time_active += dt;

        self.spawn_timer += dt;
        if self.spawn_timer >= SPAWN_INTERVAL && self.spawned < MAX_METEORITES {
            self.spawn_meteorite(rng);
            self.spawn_timer = 0.0;
        }

        for meteorite in &mut self.meteorites {
            meteorite.update(dt, self.screen_width, self.screen_height);
        }
        self.meteorites.retain(Meteorite::is_active);

        // The shower lingers until the last meteorite lands
        if self.time_active >= self.duration && self.meteorites.is_empty() {
            self.phase = HazardPhase::Finished;
            log::info!("meteorite shower finished");
        }
    }

    fn check_tile_collision(&mut self, tile: &mut TileInstance, events: &mut EventQueue) {
        for meteorite in &mut self.meteorites {
            meteorite.check_tile_collision(tile, events);
        }
    }

    fn warning(&self, seconds_until: f32) -> String {
        format!("METEORITE SHOWER INCOMING! {seconds_until:.1}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::{TileKind, TileKindId};
    use rand::SeedableRng;

    fn square(id: u32, x: f32, y: f32) -> TileInstance {
        TileInstance::new(id, TileKind::of(TileKindId::Square), Vec2::new(x, y), true)
    }

    #[test]
    fn test_spawns_on_interval_up_to_cap() {
        let mut shower = MeteoriteShower::new(1200.0, 1000.0, 0.0, 5.0);
        let mut rng = Pcg32::seed_from_u64(3);

        // One spawn per 0.1s of active time
        for _ in 0..12 {
            shower.update(0.05, 1.0, &mut rng);
        }
        assert!(shower.spawned >= 5 && shower.spawned <= 7);

        // Run long enough to hit the cap
        for _ in 0..400 {
            shower.update(0.05, 30.0, &mut rng);
        }
        assert_eq!(shower.spawned, MAX_METEORITES);
    }

    #[test]
    fn test_single_strike_per_meteorite() {
        let mut meteorite = Meteorite::new(
            Vec2::new(600.0, 380.0),
            Vec2::new(0.0, 200.0),
            36.0,
            3.0,
        );
        let mut tile = square(1, 610.0, 400.0);
        let mut events = EventQueue::new();

        meteorite.check_tile_collision(&mut tile, &mut events);
        assert!(!meteorite.is_active());
        assert!(meteorite.struck.contains(&1));
        let vel_after = tile.vel;
        assert!(vel_after.length() > 0.0);

        // Overlap persists, but the strike cannot repeat
        meteorite.check_tile_collision(&mut tile, &mut events);
        assert_eq!(tile.vel, vel_after);
    }

    #[test]
    fn test_impact_direction_and_tilt() {
        // Meteorite left of tile center: pushes right, tilts left
        let mut meteorite = Meteorite::new(
            Vec2::new(580.0, 400.0),
            Vec2::new(0.0, 200.0),
            36.0,
            3.0,
        );
        let mut tile = square(1, 610.0, 400.0);
        let mut events = EventQueue::new();

        meteorite.check_tile_collision(&mut tile, &mut events);
        assert!(tile.vel.x > 0.0);

        let events = events.drain();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::RotationRequest { target_deg, .. } if *target_deg == -IMPACT_TILT
        )));
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::MeteoriteExplosion { .. })));
    }

    #[test]
    fn test_meteorite_leaves_bounds() {
        let mut meteorite = Meteorite::new(
            Vec2::new(600.0, 990.0),
            Vec2::new(0.0, 300.0),
            24.0,
            1.0,
        );
        meteorite.update(0.1, 1200.0, 1000.0);
        assert!(!meteorite.is_active());
    }

    #[test]
    fn test_finishes_only_when_sky_is_clear() {
        let mut shower = MeteoriteShower::new(1200.0, 1000.0, 0.0, 0.2);
        let mut rng = Pcg32::seed_from_u64(3);

        // Activate and spawn a couple of meteorites
        for _ in 0..6 {
            shower.update(0.05, 1.0, &mut rng);
        }
        assert_eq!(shower.phase(), HazardPhase::Active);
        assert!(!shower.meteorites().is_empty());

        // Duration elapsed but meteorites in flight: still active.
        // Keep ticking until they all fall off-screen.
        for _ in 0..2000 {
            shower.update(0.05, 2.0, &mut rng);
            if shower.phase() == HazardPhase::Finished {
                break;
            }
        }
        assert_eq!(shower.phase(), HazardPhase::Finished);
        assert!(shower.meteorites().is_empty());
    }
}
