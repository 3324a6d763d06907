//! Board geometry and the contract it must satisfy
//!
//! A `BoardGeometry` is plain configuration. Only a validated `Layout` can be
//! used to build a screen or a game, so an invalid board never reaches the
//! simulation. `validate` is a `const fn`: binding a geometry through
//! `assert_valid` in a `const` item turns every contract violation into a
//! compile error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::GOLDEN_RATIO;
use crate::{gcd, lcm};

/// How much vertical room the paddle must leave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaddleFit {
    /// The paddle only has to fit on the board (`H >= PaddleHeight`)
    Fits,
    /// The paddle must leave room for the ball to slip past
    /// (`H >= PaddleHeight + BallDiameter`)
    #[default]
    LossPossible,
}

/// Board configuration, in grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardGeometry {
    /// Vertical travel range of the ball (rows `0..=height`)
    pub height: u16,
    /// Horizontal travel range of the ball (columns `0..=width`)
    pub width: u16,
    pub ball_diameter: u8,
    pub paddle_height: u16,
    pub paddle_width: u8,
    /// Blank lines printed after each frame
    #[serde(default = "default_newlines")]
    pub newlines: u8,
    #[serde(default)]
    pub paddle_fit: PaddleFit,
}

fn default_newlines() -> u8 {
    2
}

/// Reasons a geometry is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("{0} must be nonzero")]
    Zero(&'static str),
    #[error("paddle of height {paddle_height} needs {required} rows but the board has {height}")]
    PaddleTooTall {
        height: u16,
        paddle_height: u16,
        required: u32,
    },
    #[error("{0} overflows its integer width")]
    Overflow(&'static str),
    #[error("width {width} and height {height} share the factor {factor}")]
    NotCoprime { width: u16, height: u16, factor: u32 },
}

impl BoardGeometry {
    /// Geometry with every optional dimension derived from the height
    ///
    /// Width is the height times the golden ratio, the paddle covers a third
    /// of the board (rounded up), ball and paddle are one cell thick.
    pub fn with_height(height: u16) -> Self {
        Self {
            height,
            width: (f64::from(height) * GOLDEN_RATIO) as u16,
            ball_diameter: 1,
            paddle_height: height.div_ceil(3),
            paddle_width: 1,
            newlines: default_newlines(),
            paddle_fit: PaddleFit::default(),
        }
    }

    /// Check the contract and compute every derived size
    pub const fn validate(&self) -> Result<Layout, GeometryError> {
        if self.height == 0 {
            return Err(GeometryError::Zero("height"));
        }
        if self.width == 0 {
            return Err(GeometryError::Zero("width"));
        }
        if self.ball_diameter == 0 {
            return Err(GeometryError::Zero("ball diameter"));
        }
        if self.paddle_height == 0 {
            return Err(GeometryError::Zero("paddle height"));
        }
        if self.paddle_width == 0 {
            return Err(GeometryError::Zero("paddle width"));
        }

        let required = match self.paddle_fit {
            PaddleFit::Fits => self.paddle_height as u32,
            PaddleFit::LossPossible => self.paddle_height as u32 + self.ball_diameter as u32,
        };
        if (self.height as u32) < required {
            return Err(GeometryError::PaddleTooTall {
                height: self.height,
                paddle_height: self.paddle_height,
                required,
            });
        }

        let board_height = match self.height.checked_add(self.ball_diameter as u16) {
            Some(v) => v,
            None => return Err(GeometryError::Overflow("board height")),
        };
        let board_width = match self.width.checked_add(self.ball_diameter as u16) {
            Some(v) => v,
            None => return Err(GeometryError::Overflow("board width")),
        };
        // Top and bottom border
        let screen_height = match board_height.checked_add(2) {
            Some(v) => v,
            None => return Err(GeometryError::Overflow("screen height")),
        };
        // Paddle column(s), board, right border, newline
        let screen_width = match (self.paddle_width as u16).checked_add(board_width) {
            Some(v) => match v.checked_add(2) {
                Some(v) => v,
                None => return Err(GeometryError::Overflow("screen width")),
            },
            None => return Err(GeometryError::Overflow("screen width")),
        };
        let board_area = board_height as u32 * board_width as u32;
        let frame_len = match (screen_height as usize).checked_mul(screen_width as usize) {
            Some(v) => v,
            None => return Err(GeometryError::Overflow("screen area")),
        };
        // Trailing newlines plus the NUL terminator
        let buffer_len = match frame_len.checked_add(self.newlines as usize + 1) {
            Some(v) => v,
            None => return Err(GeometryError::Overflow("screen buffer")),
        };

        let factor = gcd(self.width as u64, self.height as u64) as u32;
        if factor != 1 {
            return Err(GeometryError::NotCoprime {
                width: self.width,
                height: self.height,
                factor,
            });
        }

        Ok(Layout {
            geometry: *self,
            board_height,
            board_width,
            screen_height,
            screen_width,
            board_area,
            buffer_len,
        })
    }

    /// `validate`, panicking on violation
    ///
    /// Meant for `const` items, where the panic becomes a compile error.
    pub const fn assert_valid(self) -> Layout {
        match self.validate() {
            Ok(layout) => layout,
            Err(GeometryError::Zero(_)) => panic!("board dimensions must be nonzero"),
            Err(GeometryError::PaddleTooTall { .. }) => panic!("paddle does not fit on the board"),
            Err(GeometryError::Overflow(_)) => panic!("board dimensions overflow"),
            Err(GeometryError::NotCoprime { .. }) => panic!("width and height must be coprime"),
        }
    }
}

/// A validated geometry together with its derived sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    geometry: BoardGeometry,
    board_height: u16,
    board_width: u16,
    screen_height: u16,
    screen_width: u16,
    board_area: u32,
    buffer_len: usize,
}

impl Layout {
    #[inline]
    pub const fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.geometry.height
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.geometry.width
    }

    #[inline]
    pub const fn ball_diameter(&self) -> u16 {
        self.geometry.ball_diameter as u16
    }

    #[inline]
    pub const fn paddle_height(&self) -> u16 {
        self.geometry.paddle_height
    }

    #[inline]
    pub const fn paddle_width(&self) -> u16 {
        self.geometry.paddle_width as u16
    }

    #[inline]
    pub const fn newlines(&self) -> usize {
        self.geometry.newlines as usize
    }

    /// Lowest row the paddle's top edge can reach
    #[inline]
    pub const fn paddle_max(&self) -> u16 {
        self.geometry.height - self.geometry.paddle_height
    }

    /// `H + BallDiameter`
    #[inline]
    pub const fn board_height(&self) -> u16 {
        self.board_height
    }

    /// `W + BallDiameter`
    #[inline]
    pub const fn board_width(&self) -> u16 {
        self.board_width
    }

    /// Board rows plus top and bottom border
    #[inline]
    pub const fn screen_height(&self) -> u16 {
        self.screen_height
    }

    /// Paddle column(s), board, right border and newline
    #[inline]
    pub const fn screen_width(&self) -> u16 {
        self.screen_width
    }

    #[inline]
    pub const fn board_area(&self) -> u32 {
        self.board_area
    }

    /// Bytes in the screen buffer, NUL terminator included
    #[inline]
    pub const fn buffer_len(&self) -> usize {
        self.buffer_len
    }

    /// Ticks before a ball that is always returned revisits a
    /// (position, velocity) state: `lcm(2W, 2H)`
    pub const fn ball_period(&self) -> u64 {
        lcm(2 * self.geometry.width as u64, 2 * self.geometry.height as u64)
    }
}

impl TryFrom<BoardGeometry> for Layout {
    type Error = GeometryError;

    fn try_from(geometry: BoardGeometry) -> Result<Self, Self::Error> {
        geometry.validate()
    }
}
