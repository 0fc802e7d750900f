//! Game session state
//!
//! One [`GameState`] per level attempt. It owns the tile pools, the
//! hazard schedule, the outbound event queue, and the seeded RNG, and
//! tracks the phase machine: build freely, then survive the timed
//! hazard phase, then read off the outcome.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::events::{EventQueue, GameEvent};
use super::hazard::{HazardPhase, HazardSchedule};
use super::placement::PlacementController;
use crate::consts::{
    GROUND_Y, SCREEN_HEIGHT, SCREEN_WIDTH, SELECTION_AREA_TOP, SIMULATION_DURATION,
};
use crate::levels::LevelConfig;

/// Top-level phase of a level attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Player is dragging tiles from the strip into the build area
    Building,
    /// Hazards run; the tower must survive
    Simulating,
    /// Survival window elapsed, outcome decided
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Lost,
}

/// Full simulation state for one level attempt.
#[derive(Debug)]
pub struct GameState {
    pub level: LevelConfig,
    pub placer: PlacementController,
    pub hazards: HazardSchedule,
    pub events: EventQueue,
    pub rng: Pcg32,
    seed: u64,
    pub phase: GamePhase,
    pub outcome: Option<GameOutcome>,
    /// Seconds elapsed in the simulation phase
    pub sim_time: f32,
    pub ground_y: f32,
}

impl GameState {
    /// Fresh attempt at a level. The seed fixes every random draw, so
    /// identical input sequences replay identically.
    pub fn new(level: LevelConfig, seed: u64) -> Self {
        let placer = PlacementController::new(&level, SELECTION_AREA_TOP);
        let hazards = HazardSchedule::from_specs(&level.hazards, SCREEN_WIDTH, SCREEN_HEIGHT);
        Self {
            placer,
            hazards,
            events: EventQueue::new(),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Building,
            outcome: None,
            sim_time: 0.0,
            ground_y: GROUND_Y,
            level,
        }
    }

    /// Leave the building phase and start the hazard clock. Ignored
    /// unless building with at least one tile placed.
    pub fn start_simulation(&mut self) {
        if self.phase != GamePhase::Building || !self.placer.has_placed_tiles() {
            return;
        }
        log::info!(
            "simulation started: level {} ({}), {} tiles placed",
            self.level.id,
            self.level.name,
            self.placer.placed_tiles().len()
        );
        self.phase = GamePhase::Simulating;
        self.sim_time = 0.0;
    }

    /// Abandon the attempt: tiles back to the strip, hazards rewound,
    /// RNG reseeded, phase back to building.
    pub fn reset(&mut self) {
        log::info!("level {} reset", self.level.id);
        self.placer.reset();
        self.hazards =
            HazardSchedule::from_specs(&self.level.hazards, SCREEN_WIDTH, SCREEN_HEIGHT);
        self.events.drain();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Building;
        self.outcome = None;
        self.sim_time = 0.0;
    }

    /// Called by the tick driver once the survival window elapses.
    pub(super) fn finish(&mut self) {
        let height = self.tower_height();
        let outcome = if height >= self.level.target_height {
            GameOutcome::Won
        } else {
            GameOutcome::Lost
        };
        log::info!(
            "level {} finished: tower {:.0}px of {:.0}px target, {:?}",
            self.level.id,
            height,
            self.level.target_height,
            outcome
        );
        self.phase = GamePhase::Finished;
        self.outcome = Some(outcome);
    }

    /// Current tower height above the ground, in pixels.
    pub fn tower_height(&self) -> f32 {
        self.placer.tower_height(self.ground_y)
    }

    /// Seconds left in the survival window, 0 outside the simulation
    /// phase.
    pub fn time_remaining(&self) -> f32 {
        match self.phase {
            GamePhase::Simulating => (SIMULATION_DURATION - self.sim_time).max(0.0),
            _ => 0.0,
        }
    }

    /// Countdown warnings for hazards about to trigger.
    pub fn warnings(&self) -> Vec<String> {
        match self.phase {
            GamePhase::Simulating => self.hazards.warnings(self.sim_time),
            _ => Vec::new(),
        }
    }

    /// Per-hazard (name, phase) readout.
    pub fn hazard_states(&self) -> Vec<(&'static str, HazardPhase)> {
        self.hazards.states()
    }

    /// Hand all pending events to the frontend.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
