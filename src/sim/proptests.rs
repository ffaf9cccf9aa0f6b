//! Invariants that must hold for any seed and any input sequence

use proptest::prelude::*;

use super::{GamePhase, GameState, TickInput, tick};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn terrain_stays_sorted_and_bounded(
        seed in any::<u64>(),
        jumps in proptest::collection::vec(any::<bool>(), 1..900),
    ) {
        let mut state = GameState::new(seed);
        state.start();
        let lo = state.tuning.min_height(state.viewport.height);
        let hi = state.tuning.max_height(state.viewport.height);

        for jump in jumps {
            tick(&mut state, &TickInput { jump, ..Default::default() });
            let points = state.terrain.points();
            prop_assert!(!points.is_empty());
            for pair in points.windows(2) {
                prop_assert!(pair[0].x < pair[1].x);
            }
            for p in points {
                prop_assert!(p.height >= lo && p.height <= hi);
            }
            // Covers the camera from its left edge to the lookahead
            let distance = state.sim.distance;
            let ahead = state.viewport.width + state.tuning.lookahead;
            prop_assert!(points[0].x - distance <= 0.0);
            prop_assert!(points[points.len() - 1].x - distance >= ahead);
        }
    }

    #[test]
    fn distance_monotonic_speed_bounded(
        seed in any::<u64>(),
        jumps in proptest::collection::vec(any::<bool>(), 1..900),
    ) {
        let mut state = GameState::new(seed);
        state.start();
        let mut last_distance = state.sim.distance;
        let mut last_score = state.score();

        for jump in jumps {
            tick(&mut state, &TickInput { jump, ..Default::default() });
            prop_assert!(state.sim.distance >= last_distance);
            prop_assert!(state.score() >= last_score);
            prop_assert!(state.sim.speed >= state.tuning.min_speed);
            prop_assert!(state.sim.speed <= state.tuning.max_speed);
            last_distance = state.sim.distance;
            last_score = state.score();
            if state.phase() == GamePhase::Ended {
                break;
            }
        }
    }

    #[test]
    fn entity_collections_stay_sorted(seed in any::<u64>()) {
        let mut state = GameState::new(seed);
        state.start();
        let demo = TickInput { idle_mode: true, ..Default::default() };
        for _ in 0..1500 {
            tick(&mut state, &demo);
            prop_assert!(state.obstacles.windows(2).all(|w| w[0].x < w[1].x));
            prop_assert!(state.orbs.windows(2).all(|w| w[0].x <= w[1].x));
            prop_assert!(state.powerups.windows(2).all(|w| w[0].x <= w[1].x));
            prop_assert!(state.markers.windows(2).all(|w| w[0].x < w[1].x));
            prop_assert!(state.particles.iter().all(|p| p.life > 0.0 && p.life <= 1.0));
        }
    }

    #[test]
    fn double_jump_is_rejected(seed in any::<u64>(), warmup in 1usize..40) {
        let mut state = GameState::new(seed);
        state.start();
        for _ in 0..warmup {
            tick(&mut state, &TickInput::default());
        }
        // Whether or not the first one is accepted, the second never is
        let _ = state.jump();
        prop_assert!(!state.player.grounded || state.phase() != GamePhase::Playing);
        prop_assert!(!state.jump());
    }
}
