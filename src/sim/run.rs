//! Headless runner
//!
//! Plays a game without rendering until it is lost or provably never will
//! be. The dynamics depend only on the `Snapshot`, so the first repeated
//! snapshot means the game cycles forever.

use std::collections::HashMap;

use serde::Serialize;

use super::geometry::Layout;
use super::state::{GamePhase, Pong};

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunOutcome {
    /// The paddle missed; `ticks` counts the losing tick
    Lost { ticks: u64 },
    /// The state at `ticks` was already seen `period` ticks earlier
    Cycled { ticks: u64, period: u64 },
    /// Stopped before either happened
    TickLimit { ticks: u64 },
}

/// Number of distinct snapshots a layout allows
///
/// Running this many ticks always ends in `Lost` or `Cycled`.
pub fn state_space_bound(layout: &Layout) -> u64 {
    let rows = layout.height() as u64 + 1;
    let cols = layout.width() as u64 + 1;
    let paddle_rows = layout.paddle_max() as u64 + 1;
    rows * cols * 4 * paddle_rows
}

/// Step `pong` until it is lost, cycles, or `max_ticks` more ticks have run
pub fn run_headless(pong: &mut Pong, max_ticks: u64) -> RunOutcome {
    if pong.phase() == GamePhase::Terminated {
        return RunOutcome::Lost {
            ticks: pong.ticks(),
        };
    }

    let mut seen = HashMap::new();
    for _ in 0..max_ticks {
        if let Some(first) = seen.insert(pong.snapshot(), pong.ticks()) {
            let outcome = RunOutcome::Cycled {
                ticks: pong.ticks(),
                period: pong.ticks() - first,
            };
            log::debug!("{outcome:?}");
            return outcome;
        }
        if !pong.step() {
            return RunOutcome::Lost {
                ticks: pong.ticks(),
            };
        }
    }
    RunOutcome::TickLimit {
        ticks: pong.ticks(),
    }
}
