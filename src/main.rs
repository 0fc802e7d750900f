//! Skystack entry point
//!
//! Headless demo driver: builds a tower from the level's allotment with
//! scripted pointer input, then runs the hazard phase to completion and
//! reports the outcome. Useful for tuning and for watching a level play
//! out via `RUST_LOG=debug`.

use glam::Vec2;

use skystack::consts::{GROUND_Y, MAX_FRAME_DT};
use skystack::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use skystack::{LevelConfig, LevelError};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level_id: u32 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);
    let seed: u64 = args
        .next()
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);

    if let Err(err) = run(level_id, seed) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(level_id: u32, seed: u64) -> Result<(), LevelError> {
    let level = LevelConfig::by_id(level_id)?;
    println!("{} - {}", level.name, level.objective);

    let mut state = GameState::new(level, seed);
    build_tower(&mut state);
    println!(
        "built a {:.0}px tower from {} tiles",
        state.tower_height(),
        state.placer.placed_tiles().len()
    );

    tick(
        &mut state,
        &TickInput {
            start_simulation: true,
            ..Default::default()
        },
        MAX_FRAME_DT,
    );

    while state.phase == GamePhase::Simulating {
        tick(&mut state, &TickInput::default(), MAX_FRAME_DT);

        for warning in state.warnings() {
            println!("  [{:>5.2}s] {warning}", state.sim_time);
        }
        for event in state.drain_events() {
            match event {
                GameEvent::WreckingBallImpact { pos } => {
                    println!("  [{:>5.2}s] wrecking ball impact at {pos}", state.sim_time);
                }
                GameEvent::MeteoriteExplosion { pos } => {
                    println!("  [{:>5.2}s] meteorite explosion at {pos}", state.sim_time);
                }
                _ => {}
            }
        }
    }

    println!(
        "final height {:.0}px of {:.0}px target: {:?}",
        state.tower_height(),
        state.level.target_height,
        state.outcome
    );
    Ok(())
}

/// Drag every strip tile into a single column, spilling onto the ground
/// beside it once the column gets too tall to be sensible.
fn build_tower(state: &mut GameState) {
    const COLUMN_X: f32 = 300.0;
    let mut column_top = GROUND_Y;
    let mut spill_x = 600.0;

    loop {
        let Some(tile) = state.placer.selection_tiles().first() else {
            break;
        };
        let grab = tile.pos;
        let height = tile.kind.size.1 as f32;

        let drop = if column_top - height > 150.0 {
            let drop = Vec2::new(COLUMN_X, column_top - height / 2.0);
            column_top -= height;
            drop
        } else {
            let drop = Vec2::new(spill_x, GROUND_Y - height / 2.0);
            spill_x += 220.0;
            drop
        };

        drag(state, grab, drop);
    }
}

fn drag(state: &mut GameState, grab: Vec2, drop: Vec2) {
    tick(
        state,
        &TickInput {
            pointer_down: Some(grab),
            ..Default::default()
        },
        MAX_FRAME_DT,
    );
    tick(
        state,
        &TickInput {
            pointer_move: Some(drop),
            ..Default::default()
        },
        MAX_FRAME_DT,
    );
    tick(
        state,
        &TickInput {
            pointer_up: Some(drop),
            ..Default::default()
        },
        MAX_FRAME_DT,
    );
}
