//! Environmental hazards
//!
//! Each hazard is an independent timed force generator with its own
//! pending → active → finished timeline. Hazards never interact with
//! each other, only with placed tiles: they read tile state and write
//! back into tile velocities through the same clamped channels the
//! resolver uses.
//!
//! Dispatch is capability-based: the orchestrator asks a hazard whether
//! it `has_area_effect` instead of checking its concrete type. Wind is
//! currently the only hazard that answers yes.

pub mod meteorite;
pub mod wind;
pub mod wrecking_ball;

pub use meteorite::MeteoriteShower;
pub use wind::Wind;
pub use wrecking_ball::WreckingBall;

use rand_pcg::Pcg32;

use super::events::EventQueue;
use super::tile::TileInstance;
use crate::consts::WARNING_LOOKAHEAD;
use crate::levels::HazardSpec;

/// Lifecycle of a hazard within the simulation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardPhase {
    /// Waiting for its trigger time
    Pending,
    /// Applying forces
    Active,
    /// Done; skipped on all further ticks
    Finished,
}

/// An environmental force generator.
pub trait Hazard {
    fn name(&self) -> &'static str;

    fn phase(&self) -> HazardPhase;

    /// Simulation-relative time at which the hazard activates.
    fn trigger_time(&self) -> f32;

    /// Advance the hazard's clock and internal state machine.
    fn update(&mut self, dt: f32, sim_time: f32, rng: &mut Pcg32);

    /// Test and resolve a collision between this hazard's projectile(s)
    /// and one tile. No-op for hazards without projectiles.
    fn check_tile_collision(&mut self, tile: &mut TileInstance, events: &mut EventQueue);

    /// Whether this hazard applies a force field over all tiles at once
    /// (queried generically by the orchestrator instead of downcasting).
    fn has_area_effect(&self) -> bool {
        false
    }

    /// Apply the area force field. Only called while active and only
    /// when `has_area_effect` is true.
    fn apply_area_effect(
        &mut self,
        _tiles: &mut [TileInstance],
        _ground_y: f32,
        _events: &mut EventQueue,
        _rng: &mut Pcg32,
    ) {
    }

    /// Countdown warning line shown before the hazard triggers.
    fn warning(&self, seconds_until: f32) -> String;
}

/// Per-level hazard orchestrator: owns the ordered hazard set, advances
/// each hazard every tick, and dispatches tile-collision checks.
pub struct HazardSchedule {
    hazards: Vec<Box<dyn Hazard>>,
}

impl std::fmt::Debug for HazardSchedule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hazards.iter().map(|h| (h.name(), h.phase())))
            .finish()
    }
}

impl HazardSchedule {
    /// Build the schedule from a level's hazard configuration.
    pub fn from_specs(specs: &[HazardSpec], screen_width: f32, screen_height: f32) -> Self {
        let hazards = specs
            .iter()
            .map(|spec| -> Box<dyn Hazard> {
                match *spec {
                    HazardSpec::WreckingBall { trigger_time } => {
                        Box::new(WreckingBall::new(screen_width, trigger_time))
                    }
                    HazardSpec::Wind {
                        trigger_time,
                        duration,
                    } => Box::new(Wind::new(trigger_time, duration)),
                    HazardSpec::MeteoriteShower {
                        trigger_time,
                        duration,
                    } => Box::new(MeteoriteShower::new(
                        screen_width,
                        screen_height,
                        trigger_time,
                        duration,
                    )),
                }
            })
            .collect();
        Self { hazards }
    }

    /// Advance every hazard one tick and run its tile interactions.
    pub fn tick(
        &mut self,
        dt: f32,
        sim_time: f32,
        tiles: &mut [TileInstance],
        ground_y: f32,
        events: &mut EventQueue,
        rng: &mut Pcg32,
    ) {
        for hazard in &mut self.hazards {
            hazard.update(dt, sim_time, rng);

            for tile in tiles.iter_mut() {
                hazard.check_tile_collision(tile, events);
            }

            if hazard.has_area_effect() && hazard.phase() == HazardPhase::Active {
                hazard.apply_area_effect(tiles, ground_y, events, rng);
            }
        }
    }

    /// Countdown strings for hazards triggering within the lookahead
    /// window.
    pub fn warnings(&self, sim_time: f32) -> Vec<String> {
        self.hazards
            .iter()
            .filter(|h| h.phase() == HazardPhase::Pending)
            .filter_map(|h| {
                let until = h.trigger_time() - sim_time;
                (until > 0.0 && until <= WARNING_LOOKAHEAD).then(|| h.warning(until))
            })
            .collect()
    }

    /// Per-hazard (name, phase) readout for the frontend.
    pub fn states(&self) -> Vec<(&'static str, HazardPhase)> {
        self.hazards.iter().map(|h| (h.name(), h.phase())).collect()
    }

    pub fn all_finished(&self) -> bool {
        self.hazards
            .iter()
            .all(|h| h.phase() == HazardPhase::Finished)
    }
}
