//! Skystack - a physics-based tower building game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile physics, support detection, hazards)
//! - `levels`: Level catalog and configuration loading
//!
//! Rendering, menus, and the particle/animation system are external
//! collaborators. The simulation emits [`sim::GameEvent`]s for them and
//! exposes readouts (tower height, hazard warnings) but never calls back
//! into them.

pub mod levels;
pub mod sim;

pub use levels::{LevelConfig, LevelError};
pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Screen dimensions the simulation is laid out for
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 1000.0;

    /// Height of the ground strip at the bottom of the screen
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Y coordinate of the ground surface
    pub const GROUND_Y: f32 = SCREEN_HEIGHT - GROUND_HEIGHT;

    /// Top edge of the tile selection strip; drops below it are rejected
    pub const SELECTION_AREA_TOP: f32 = SCREEN_HEIGHT - 100.0;

    /// Gravity applied to falling tiles (pixels/s²)
    pub const TILE_GRAVITY: f32 = 500.0;
    /// Vertical bounce speed below which a grounded tile settles
    pub const SETTLE_SPEED: f32 = 10.0;

    /// Hard safety clamps against force accumulation blow-up
    pub const MAX_TILE_SPEED: f32 = 300.0;
    pub const MAX_ANGULAR_SPEED: f32 = 3.0;

    /// Cosmetic rotation is capped to this many degrees either way
    pub const MAX_VISUAL_ROTATION: f32 = 45.0;

    /// How long the player must survive the hazard phase (seconds)
    pub const SIMULATION_DURATION: f32 = 12.0;
    /// Frame delta cap (60 Hz); larger wall-clock gaps are truncated
    pub const MAX_FRAME_DT: f32 = 1.0 / 60.0;

    /// Hazard warnings appear this many seconds before trigger
    pub const WARNING_LOOKAHEAD: f32 = 1.0;

    /// Selection strip layout: first slot x and spacing between slots
    pub const STRIP_FIRST_X: f32 = 60.0;
    pub const STRIP_SPACING: f32 = 70.0;
    /// Vertical center of tiles resting in the selection strip
    pub const STRIP_TILE_Y: f32 = SCREEN_HEIGHT - 50.0;
}
