//! Wind hazard
//!
//! A horizontal force field over all placed tiles. The strength
//! oscillates while active, and each tile's share depends on its mass,
//! how sheltered it is by upwind tiles, how firmly it is in contact
//! with the ground or other tiles, and its cross-sectional area. The
//! contact classification reuses the resolver's 3-point support model.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{Hazard, HazardPhase};
use crate::sim::events::{EventQueue, GameEvent};
use crate::sim::support::classify_support_all;
use crate::sim::tile::TileInstance;

const BASE_WIND_FORCE: f32 = 25.0;
/// Wind blows left-to-right.
const WIND_DIRECTION: f32 = 1.0;
const WIND_VARIANCE: f32 = 0.2;
/// Upwind tiles within this window shelter a tile from the wind.
const SHELTER_X_RANGE: f32 = 150.0;
const SHELTER_Y_RANGE: f32 = 100.0;
/// Maximum fraction of the wind one sheltering tile can block.
const MAX_BLOCK: f32 = 0.7;
/// Every tile catches at least 10% of the wind.
const MIN_EXPOSURE: f32 = 0.1;
/// Contact resistance multipliers
const GROUND_CONTACT_FACTOR: f32 = 0.1;
const STABLE_CONTACT_FACTOR: f32 = 0.15;
const SINGLE_CONTACT_FACTOR: f32 = 0.6;
/// Ground contact tolerance in pixels
const GROUND_TOLERANCE: f32 = 5.0;
/// Reference area for the cross-section factor (one standard tile).
const REFERENCE_AREA: f32 = 96.0 * 96.0;
const MAX_AREA_FACTOR: f32 = 2.0;
/// Random vertical turbulence amplitude, pixels/s per tick.
const TURBULENCE: f32 = 5.0;
/// Forces above this magnitude spawn wind streak particles.
const GUST_EVENT_THRESHOLD: f32 = 5.0;

pub struct Wind {
    trigger_time: f32,
    duration: f32,
    phase: HazardPhase,
    time_active: f32,
    current_strength: f32,
}

impl Wind {
    pub fn new(trigger_time: f32, duration: f32) -> Self {
        Self {
            trigger_time,
            duration,
            phase: HazardPhase::Pending,
            time_active: 0.0,
            current_strength: 0.0,
        }
    }

    pub fn current_strength(&self) -> f32 {
        self.current_strength
    }

    /// Wind force on one tile given the whole placed set.
    fn wind_force(&self, target: &TileInstance, all: &[TileInstance], ground_y: f32) -> f32 {
        let base_force = self.current_strength * WIND_DIRECTION;

        // Heavier tiles resist the push
        let mass_factor = 1.0 / (1.0 + 0.5 * target.kind.mass);

        let exposure_factor = exposure(target, all);
        let contact_factor = contact_resistance(target, all, ground_y);

        // Larger silhouettes catch more wind
        let area_factor = (target.kind.area() / REFERENCE_AREA)
            .sqrt()
            .min(MAX_AREA_FACTOR);

        base_force * mass_factor * exposure_factor * contact_factor * area_factor
    }
}

/// How exposed a tile is to the wind, reduced by upwind neighbors close
/// enough to shelter it.
fn exposure(target: &TileInstance, all: &[TileInstance]) -> f32 {
    let mut blocking_factor: f32 = 1.0;

    for other in all {
        if other.id == target.id {
            continue;
        }

        let is_upwind = if WIND_DIRECTION > 0.0 {
            other.pos.x < target.pos.x
        } else {
            other.pos.x > target.pos.x
        };
        if !is_upwind {
            continue;
        }

        let dx = (other.pos.x - target.pos.x).abs();
        let dy = (other.pos.y - target.pos.y).abs();
        if dx < SHELTER_X_RANGE && dy < SHELTER_Y_RANGE {
            let block = (1.0 - dx / SHELTER_X_RANGE - dy / SHELTER_Y_RANGE).max(0.0);
            blocking_factor *= 1.0 - block * MAX_BLOCK;
        }
    }

    blocking_factor.max(MIN_EXPOSURE)
}

/// Resistance from resting on the ground or on other tiles. Uses the
/// same 3-point classification as the collision resolver, recomputed
/// here without side effects.
fn contact_resistance(target: &TileInstance, all: &[TileInstance], ground_y: f32) -> f32 {
    let mut resistance: f32 = 1.0;

    if target.rect().bottom() >= ground_y - GROUND_TOLERANCE {
        resistance *= GROUND_CONTACT_FACTOR;
    }

    let class = classify_support_all(target, all);
    if class.is_stable() {
        resistance *= STABLE_CONTACT_FACTOR;
    } else if class.points() == 1 {
        resistance *= SINGLE_CONTACT_FACTOR;
    }

    resistance
}

impl Hazard for Wind {
    fn name(&self) -> &'static str {
        "wind"
    }

    fn phase(&self) -> HazardPhase {
        self.phase
    }

    fn trigger_time(&self) -> f32 {
        self.trigger_time
    }

    fn update(&mut self, dt: f32, sim_time: f32, _rng: &mut Pcg32) {
        if self.phase == HazardPhase::Pending && sim_time >= self.trigger_time {
            self.phase = HazardPhase::Active;
            self.time_active = 0.0;
            log::info!("wind picking up for {:.1}s", self.duration);
        }

        if self.phase != HazardPhase::Active {
            return;
        }

        self.time_active += dt;
        // Oscillating gusts around the base force
        let wind_phase = (self.time_active * 2.0).sin() * WIND_VARIANCE;
        self.current_strength = BASE_WIND_FORCE * (1.0 + wind_phase);

        if self.time_active >= self.duration {
            self.phase = HazardPhase::Finished;
            log::info!("wind died down");
        }
    }

    fn check_tile_collision(&mut self, _tile: &mut TileInstance, _events: &mut EventQueue) {
        // Wind has no projectile; it acts through the area effect.
    }

    fn has_area_effect(&self) -> bool {
        true
    }

    fn apply_area_effect(
        &mut self,
        tiles: &mut [TileInstance],
        ground_y: f32,
        events: &mut EventQueue,
        rng: &mut Pcg32,
    ) {
        // Forces are computed against a consistent snapshot of positions
        // before any velocity is touched.
        let forces: Vec<f32> = {
            let snapshot: &[TileInstance] = tiles;
            snapshot
                .iter()
                .map(|tile| self.wind_force(tile, snapshot, ground_y))
                .collect()
        };

        for (tile, force) in tiles.iter_mut().zip(forces) {
            if force == 0.0 {
                continue;
            }

            if force.abs() > GUST_EVENT_THRESHOLD {
                events.push(GameEvent::WindGust {
                    pos: tile.pos,
                    direction: WIND_DIRECTION,
                });
            }

            tile.vel.x += force;
            tile.vel.y += rng.random_range(-TURBULENCE..TURBULENCE);
        }
    }

    fn warning(&self, seconds_until: f32) -> String {
        format!("WIND STARTS IN {seconds_until:.1}s")
    }
}
