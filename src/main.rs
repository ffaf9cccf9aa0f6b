//! Holly Knight headless runner
//!
//! Plays one autopilot run at the fixed tick rate (as fast as possible) and
//! prints the final snapshot as JSON. Useful for checking tuning files.
//!
//! Environment:
//! - `HOLLY_TUNING`: path to a JSON tuning file
//! - `HOLLY_SEED`: run seed (u64)
//! - `RUST_LOG`: log filter

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use holly_knight::Tuning;
    use holly_knight::consts::TICK_RATE;
    use holly_knight::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Longest run before giving up
    const MAX_RUN_SECS: u32 = 300;
    const DEFAULT_SEED: u64 = 0x5eed_cafe;

    env_logger::init();
    log::info!("Holly Knight (headless) starting...");

    let tuning_path = std::env::var_os("HOLLY_TUNING").map(PathBuf::from);
    let tuning = Tuning::load(tuning_path.as_deref());
    let seed = match std::env::var("HOLLY_SEED") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("HOLLY_SEED={raw:?} is not a u64; using {DEFAULT_SEED}");
            DEFAULT_SEED
        }),
        Err(_) => DEFAULT_SEED,
    };

    let mut state = GameState::with_tuning(seed, tuning);
    state.start();

    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    for _ in 0..MAX_RUN_SECS * TICK_RATE {
        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::ScoreChanged { score } => log::trace!("score {}", score),
                GameEvent::GameOver { final_score, cause } => {
                    log::info!("Game over: {:?}, final score {}", cause, final_score)
                }
                other => log::debug!("{:?}", other),
            }
        }

        if state.phase() == GamePhase::Ended {
            break;
        }
    }

    if state.phase() == GamePhase::Playing {
        log::info!("Survived {}s, score {}", MAX_RUN_SECS, state.score());
    }

    match state.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives the simulation through the library API.
}
