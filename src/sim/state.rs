//! Game state and construction
//!
//! A `Pong` owns everything that changes between ticks: paddle row, ball
//! position and heading, and the frame they are drawn into.

use glam::U16Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::{GeometryError, Layout};
use super::screen::{Glyphs, Screen, ScreenError};

/// Direction along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    /// Up, or left
    Decreasing,
    /// Down, or right
    Increasing,
}

impl Heading {
    #[inline]
    pub fn is_increasing(self) -> bool {
        self == Heading::Increasing
    }

    /// Move `pos` one cell along this heading
    #[inline]
    pub fn advance(self, pos: u16) -> u16 {
        match self {
            Heading::Increasing => pos + 1,
            Heading::Decreasing => pos - 1,
        }
    }
}

impl From<bool> for Heading {
    fn from(increasing: bool) -> Self {
        if increasing {
            Heading::Increasing
        } else {
            Heading::Decreasing
        }
    }
}

/// Ball velocity: one cell per tick along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Velocity {
    pub vertical: Heading,
    pub horizontal: Heading,
}

/// Whether the game is still being played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    /// The ball got past the paddle; the frame shows the loss
    Terminated,
}

/// Initial conditions for a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartState {
    /// Ball column, `1..=W`
    pub x: u16,
    /// Ball row, `0..=H`
    pub y: u16,
    /// Ball moving right
    pub right: bool,
    /// Ball moving down
    pub down: bool,
    /// Top row of the paddle, `0..=H - PaddleHeight`
    pub paddle_y: u16,
}

impl Default for StartState {
    fn default() -> Self {
        Self {
            x: 1,
            y: 1,
            right: true,
            down: true,
            paddle_y: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PongError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Screen(#[from] ScreenError),
    #[error("ball ({x}, {y}) is outside the {width} x {height} travel range")]
    BallOutOfRange {
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    },
    /// Column 0 is only ever reached moving left, never a starting point
    #[error("ball cannot start in column 0")]
    BallOnPaddleColumn,
    #[error("paddle row {paddle_y} is below the lowest row {max}")]
    PaddleOutOfRange { paddle_y: u16, max: u16 },
}

/// Everything that changes from tick to tick, minus the frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball_x: u16,
    pub ball_y: u16,
    pub velocity: Velocity,
    pub paddle_y: u16,
}

/// A single game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pong {
    pub(super) screen: Screen,
    pub(super) paddle_y: u16,
    /// `x` is the column, `y` the row
    pub(super) ball: U16Vec2,
    pub(super) velocity: Velocity,
    pub(super) phase: GamePhase,
    pub(super) ticks: u64,
}

impl Pong {
    /// Create a game and draw its first frame
    pub fn new(layout: Layout, glyphs: Glyphs, start: StartState) -> Result<Self, PongError> {
        if start.x > layout.width() || start.y > layout.height() {
            return Err(PongError::BallOutOfRange {
                x: start.x,
                y: start.y,
                width: layout.width(),
                height: layout.height(),
            });
        }
        if start.x == 0 {
            return Err(PongError::BallOnPaddleColumn);
        }
        if start.paddle_y > layout.paddle_max() {
            return Err(PongError::PaddleOutOfRange {
                paddle_y: start.paddle_y,
                max: layout.paddle_max(),
            });
        }

        let mut screen = Screen::new(layout, glyphs)?;
        let diameter = layout.ball_diameter();
        screen.fill_block(start.y, start.x, diameter, diameter, glyphs.ball);
        for row in start.paddle_y..start.paddle_y + layout.paddle_height() {
            screen.set_paddle_row(row, glyphs.paddle);
        }

        log::debug!(
            "new game: ball ({}, {}) paddle {} on a {}x{} board",
            start.x,
            start.y,
            start.paddle_y,
            layout.width(),
            layout.height()
        );

        Ok(Self {
            screen,
            paddle_y: start.paddle_y,
            ball: U16Vec2::new(start.x, start.y),
            velocity: Velocity {
                vertical: start.down.into(),
                horizontal: start.right.into(),
            },
            phase: GamePhase::Running,
            ticks: 0,
        })
    }

    /// Create a game from a randomly drawn valid start
    pub fn random<R: Rng>(
        layout: Layout,
        glyphs: Glyphs,
        rng: &mut R,
    ) -> Result<Self, PongError> {
        let start = StartState {
            x: rng.random_range(1..=layout.width()),
            y: rng.random_range(0..=layout.height()),
            right: rng.random(),
            down: rng.random(),
            paddle_y: rng.random_range(0..=layout.paddle_max()),
        };
        Self::new(layout, glyphs, start)
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        self.screen.layout()
    }

    #[inline]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The current frame, NUL terminated
    #[inline]
    pub fn as_c_str(&self) -> &std::ffi::CStr {
        self.screen.as_c_str()
    }

    /// The current frame as text
    #[inline]
    pub fn as_str(&self) -> &str {
        self.screen.as_str()
    }

    #[inline]
    pub fn paddle_y(&self) -> u16 {
        self.paddle_y
    }

    /// Top-left cell of the ball, `x` being the column
    #[inline]
    pub fn ball(&self) -> U16Vec2 {
        self.ball
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Ticks played so far
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball_x: self.ball.x,
            ball_y: self.ball.y,
            velocity: self.velocity,
            paddle_y: self.paddle_y,
        }
    }

    /// Move the paddle up one row; no-op at the top or once the game is over
    pub fn paddle_up(&mut self) {
        if self.paddle_y == 0 || self.phase == GamePhase::Terminated {
            return;
        }
        let glyphs = *self.screen.glyphs();
        let height = self.layout().paddle_height();
        self.paddle_y -= 1;
        self.screen.set_paddle_row(self.paddle_y, glyphs.paddle);
        self.screen.set_paddle_row(self.paddle_y + height, glyphs.empty);
    }

    /// Move the paddle down one row; no-op at the bottom or once the game is over
    pub fn paddle_dn(&mut self) {
        if self.phase == GamePhase::Terminated || self.paddle_y >= self.layout().paddle_max() {
            return;
        }
        let glyphs = *self.screen.glyphs();
        let height = self.layout().paddle_height();
        self.screen.set_paddle_row(self.paddle_y, glyphs.empty);
        self.paddle_y += 1;
        self.screen.set_paddle_row(self.paddle_y + height - 1, glyphs.paddle);
    }
}

impl std::fmt::Display for Pong {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.screen, f)
    }
}
