//! Thought-bubble captions shown above the duck
//!
//! Purely cosmetic; nothing in gameplay reads these.

use rand::Rng;

use super::events::GameEvent;
use super::state::{GameState, Thought};

pub const THOUGHTS: [&str; 11] = [
    "It works on my machine...",
    "Is it a bug or a feature?",
    "Just one more line...",
    "I use Arch btw",
    "git push --force",
    "Ctrl+C, Ctrl+V",
    "I speak Binary.",
    "Wait, did I save?",
    "Deploying on Friday...",
    "Who wrote this code? Oh, me.",
    "Searching Stack Overflow...",
];

/// Count down the current caption and start a new one on schedule
pub fn advance(state: &mut GameState) {
    if let Some(thought) = &mut state.thought {
        thought.display_ticks_remaining = thought.display_ticks_remaining.saturating_sub(1);
        if thought.display_ticks_remaining == 0 {
            state.thought = None;
        }
    }

    let interval = u64::from(state.tuning.thought_interval_ticks);
    if interval == 0 || state.sim.elapsed_ticks % interval != 0 {
        return;
    }

    let text = THOUGHTS[state.rng.random_range(0..THOUGHTS.len())].to_string();
    state.thought = Some(Thought {
        text: text.clone(),
        display_ticks_remaining: state.tuning.thought_display_ticks,
    });
    state.push_event(GameEvent::ThoughtShown { text });
}
