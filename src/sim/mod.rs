//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One cell per axis per tick, integer grid only
//! - Randomness only through a caller-supplied RNG, and only at construction
//! - No I/O, timing or terminal handling

pub mod collision;
pub mod geometry;
pub mod run;
pub mod screen;
pub mod state;
pub mod tick;

pub use collision::{Contact, paddle_contact, spans_overlap};
pub use geometry::{BoardGeometry, GeometryError, Layout, PaddleFit};
pub use run::{RunOutcome, run_headless, state_space_bound};
pub use screen::{Glyphs, Screen, ScreenError};
pub use state::{GamePhase, Heading, Pong, PongError, Snapshot, StartState, Velocity};
