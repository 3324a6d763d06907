//! Property tests for the simulation over generated boards and starts.
//!
//! Invariants covered:
//! - The frame buffer has the advertised size, row shape and terminator.
//! - Board offsets are injective and land between the borders.
//! - The paddle never leaves its travel range, and is idle at its limits.
//! - Every game is lost or cycles within the state-space bound.
//! - Identical games fed identical operations render identical frames.
//! - The ball keeps its full footprint while running; the lost frame shows
//!   one lose glyph per ball row.
//! - The autopilot moves the paddle at most one row per tick.

use std::collections::HashSet;

use proptest::prelude::*;
use term_pong::sim::{
    BoardGeometry, GamePhase, Glyphs, Layout, PaddleFit, Pong, RunOutcome, StartState,
    run_headless, state_space_bound,
};

fn layouts() -> impl Strategy<Value = Layout> {
    (
        1u16..12,
        1u16..16,
        1u8..4,
        1u16..6,
        1u8..3,
        0u8..3,
        any::<bool>(),
    )
        .prop_filter_map(
            "geometry must satisfy the contract",
            |(height, width, ball_diameter, paddle_height, paddle_width, newlines, strict)| {
                BoardGeometry {
                    height,
                    width,
                    ball_diameter,
                    paddle_height,
                    paddle_width,
                    newlines,
                    paddle_fit: if strict {
                        PaddleFit::LossPossible
                    } else {
                        PaddleFit::Fits
                    },
                }
                .validate()
                .ok()
            },
        )
}

fn games() -> impl Strategy<Value = (Layout, StartState)> {
    layouts().prop_flat_map(|layout| {
        (
            Just(layout),
            1..=layout.width(),
            0..=layout.height(),
            any::<bool>(),
            any::<bool>(),
            0..=layout.paddle_max(),
        )
            .prop_map(|(layout, x, y, right, down, paddle_y)| {
                (
                    layout,
                    StartState {
                        x,
                        y,
                        right,
                        down,
                        paddle_y,
                    },
                )
            })
    })
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Step,
    Up,
    Down,
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![Just(Op::Step), Just(Op::Up), Just(Op::Down)],
        0..120,
    )
}

fn apply(pong: &mut Pong, op: Op) {
    match op {
        Op::Step => {
            pong.step();
        }
        Op::Up => pong.paddle_up(),
        Op::Down => pong.paddle_dn(),
    }
}

fn count(pong: &Pong, glyph: char) -> usize {
    pong.as_str().chars().filter(|&c| c == glyph).count()
}

proptest! {
    #[test]
    fn frame_has_fixed_shape((layout, start) in games()) {
        let pong = Pong::new(layout, Glyphs::default(), start).unwrap();
        let bytes = pong.screen().as_bytes_with_nul();

        let expected_len = layout.screen_height() as usize * layout.screen_width() as usize
            + layout.newlines()
            + 1;
        prop_assert_eq!(bytes.len(), expected_len);
        prop_assert_eq!(bytes.len(), layout.buffer_len());
        prop_assert_eq!(bytes.last(), Some(&0u8));
        prop_assert_eq!(bytes.iter().filter(|&&b| b == 0).count(), 1);

        let width = layout.screen_width() as usize;
        let frame = &bytes[..width * layout.screen_height() as usize];
        for row in frame.chunks_exact(width) {
            prop_assert_eq!(row[width - 1], b'\n');
            prop_assert!(!row[..width - 1].contains(&b'\n'));
        }
        prop_assert!(bytes[frame.len()..bytes.len() - 1].iter().all(|&b| b == b'\n'));
    }

    #[test]
    fn offsets_are_injective_and_inside_borders(layout in layouts()) {
        let pong = Pong::new(layout, Glyphs::default(), StartState {
            x: 1,
            y: 0,
            right: true,
            down: true,
            paddle_y: 0,
        }).unwrap();
        let screen = pong.screen();
        let width = layout.screen_width() as usize;
        let frame_len = width * layout.screen_height() as usize;

        let mut seen = HashSet::new();
        for y in 0..layout.board_height() {
            for x in 0..layout.board_width() {
                let offset = screen.offset(y, x);
                prop_assert!(seen.insert(offset));
                prop_assert!(offset >= width && offset < frame_len - width);
                let col = offset % width;
                prop_assert!(col >= layout.paddle_width() as usize && col < width - 2);
            }
        }
        prop_assert_eq!(seen.len() as u32, layout.board_area());
    }

    #[test]
    fn paddle_stays_in_range((layout, start) in games(), ops in ops()) {
        let mut pong = Pong::new(layout, Glyphs::default(), start).unwrap();
        for op in ops {
            if pong.phase() == GamePhase::Terminated {
                break;
            }
            let before = pong.paddle_y();
            apply(&mut pong, op);
            prop_assert!(pong.paddle_y() <= layout.paddle_max());
            match op {
                Op::Up if before == 0 => prop_assert_eq!(pong.paddle_y(), 0),
                Op::Down if before == layout.paddle_max() => {
                    prop_assert_eq!(pong.paddle_y(), layout.paddle_max())
                }
                _ => prop_assert!(pong.paddle_y().abs_diff(before) <= 1),
            }
            if pong.phase() == GamePhase::Running {
                let paddle_cells = count(&pong, ']');
                prop_assert_eq!(
                    paddle_cells,
                    layout.paddle_height() as usize * layout.paddle_width() as usize
                );
            }
        }
    }

    #[test]
    fn every_game_ends_or_cycles((layout, start) in games()) {
        let mut pong = Pong::new(layout, Glyphs::default(), start).unwrap();
        let outcome = run_headless(&mut pong, state_space_bound(&layout) + 1);
        prop_assert!(!matches!(outcome, RunOutcome::TickLimit { .. }), "{:?}", outcome);
        if let RunOutcome::Lost { .. } = outcome {
            prop_assert_eq!(pong.phase(), GamePhase::Terminated);
            prop_assert_eq!(count(&pong, 'X'), layout.ball_diameter() as usize);
        }
    }

    #[test]
    fn identical_games_render_identically((layout, start) in games(), ops in ops()) {
        let mut a = Pong::new(layout, Glyphs::default(), start).unwrap();
        let mut b = Pong::new(layout, Glyphs::default(), start).unwrap();
        for op in ops {
            apply(&mut a, op);
            apply(&mut b, op);
            prop_assert_eq!(a.as_str(), b.as_str());
            prop_assert_eq!(a.snapshot(), b.snapshot());
        }
    }

    #[test]
    fn ball_footprint_and_autopilot_step((layout, start) in games()) {
        let mut pong = Pong::new(layout, Glyphs::default(), start).unwrap();
        let diameter = layout.ball_diameter() as usize;
        for _ in 0..200 {
            let before = pong.paddle_y();
            if !pong.step() {
                prop_assert_eq!(count(&pong, 'O'), diameter * (diameter - 1));
                break;
            }
            prop_assert_eq!(count(&pong, 'O'), diameter * diameter);
            prop_assert!(pong.paddle_y().abs_diff(before) <= 1);
            let ball = pong.ball();
            prop_assert!(ball.x <= layout.width() && ball.y <= layout.height());
        }
    }
}

#[test]
fn coprime_board_rally_never_repeats_early() {
    let layout = BoardGeometry {
        height: 3,
        width: 5,
        ball_diameter: 1,
        paddle_height: 2,
        paddle_width: 1,
        newlines: 2,
        paddle_fit: PaddleFit::LossPossible,
    }
    .validate()
    .unwrap();
    let mut pong = Pong::new(layout, Glyphs::default(), StartState::default()).unwrap();
    match run_headless(&mut pong, state_space_bound(&layout) + 1) {
        RunOutcome::Cycled { period, .. } => {
            assert_eq!(period, layout.ball_period())
        }
        other => panic!("expected an endless rally, got {other:?}"),
    }
}
