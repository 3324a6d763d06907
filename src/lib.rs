//! Term Pong - a single-player Pong simulation rendered into a text frame
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry contract, screen buffer, physics, autopilot)
//! - `settings`: JSON-backed configuration for the demo driver

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{BoardGeometry, GeometryError, Glyphs, Layout, Pong, PongError, StartState};

/// Game configuration constants
pub mod consts {
    /// Background of an empty board cell
    pub const EMPTY: u8 = b' ';
    /// Top and bottom border
    pub const H_BORDER: u8 = b'-';
    /// Right border
    pub const V_BORDER: u8 = b'|';
    pub const CORNER: u8 = b'+';
    pub const BALL: u8 = b'O';
    pub const PADDLE: u8 = b']';
    /// Marks the rows where the ball slipped past the paddle
    pub const LOSE: u8 = b'X';

    /// Width factor applied to the height when no width is given
    pub const GOLDEN_RATIO: f64 = 1.618;

    /// Pause between printed frames in the demo driver
    pub const FRAME_INTERVAL_MS: u64 = 250;
    /// The demo stops after one byte's worth of ticks
    pub const MAX_TICKS: u64 = u8::MAX as u64;
}

/// Greatest common divisor
#[inline]
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Least common multiple (0 if either side is 0)
#[inline]
pub const fn lcm(a: u64, b: u64) -> u64 {
    if a == 0 || b == 0 {
        return 0;
    }
    a / gcd(a, b) * b
}
