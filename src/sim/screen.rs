//! Fixed-capacity text frame
//!
//! The buffer is laid out row-major, one screen row per text line:
//!
//! ```text
//! +------+      top border
//! ]      |      paddle column, board row 0, right border
//! ] O    |
//!        |
//!        |
//! +------+      bottom border
//!               `newlines` blank lines, then a NUL
//! ```
//!
//! Board coordinates `(y, x)` cover the `BoardHeight x BoardWidth` cells
//! between the paddle column and the right border.

use std::ffi::CStr;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::geometry::Layout;
use crate::consts;

/// Characters used to draw a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Glyphs {
    pub empty: char,
    pub h_border: char,
    pub v_border: char,
    pub corner: char,
    pub ball: char,
    pub paddle: char,
    pub lose: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            empty: consts::EMPTY as char,
            h_border: consts::H_BORDER as char,
            v_border: consts::V_BORDER as char,
            corner: consts::CORNER as char,
            ball: consts::BALL as char,
            paddle: consts::PADDLE as char,
            lose: consts::LOSE as char,
        }
    }
}

impl Glyphs {
    /// Every glyph must occupy exactly one byte and one terminal column
    pub fn validate(&self) -> Result<(), ScreenError> {
        let all = [
            ("empty", self.empty),
            ("h_border", self.h_border),
            ("v_border", self.v_border),
            ("corner", self.corner),
            ("ball", self.ball),
            ("paddle", self.paddle),
            ("lose", self.lose),
        ];
        for (name, glyph) in all {
            if !(glyph.is_ascii_graphic() || glyph == ' ') {
                return Err(ScreenError::BadGlyph { name, glyph });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error("cell ({y}, {x}) is outside a ({height}, {width}) board")]
    OutOfRange {
        y: u16,
        x: u16,
        height: u16,
        width: u16,
    },
    #[error("glyph {name} = {glyph:?} is not a printable ASCII character")]
    BadGlyph { name: &'static str, glyph: char },
}

/// The rendered frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    layout: Layout,
    glyphs: Glyphs,
    buf: Box<[u8]>,
}

impl Screen {
    /// Allocate the buffer and draw the empty board with its borders
    pub fn new(layout: Layout, glyphs: Glyphs) -> Result<Self, ScreenError> {
        glyphs.validate()?;

        let width = layout.screen_width() as usize;
        let height = layout.screen_height() as usize;
        let frame_len = width * height;

        let mut buf = vec![glyphs.empty as u8; layout.buffer_len()].into_boxed_slice();
        buf[frame_len..].fill(b'\n');
        buf[layout.buffer_len() - 1] = 0;

        for row in buf[..frame_len].chunks_exact_mut(width) {
            row[width - 1] = b'\n';
            row[width - 2] = glyphs.v_border as u8;
        }
        for start in [0, frame_len - width] {
            let row = &mut buf[start..start + width - 1];
            row.fill(glyphs.h_border as u8);
            row[0] = glyphs.corner as u8;
            row[width - 2] = glyphs.corner as u8;
        }

        Ok(Self {
            layout,
            glyphs,
            buf,
        })
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn glyphs(&self) -> &Glyphs {
        &self.glyphs
    }

    /// Buffer offset of board cell `(y, x)`; no range check
    #[inline]
    pub fn offset(&self, y: u16, x: u16) -> usize {
        let width = self.layout.screen_width() as usize;
        width * (1 + y as usize) + self.layout.paddle_width() as usize + x as usize
    }

    fn check(&self, y: u16, x: u16) -> Result<(), ScreenError> {
        if y >= self.layout.board_height() || x >= self.layout.board_width() {
            return Err(ScreenError::OutOfRange {
                y,
                x,
                height: self.layout.board_height(),
                width: self.layout.board_width(),
            });
        }
        Ok(())
    }

    /// Read a board cell
    pub fn cell(&self, y: u16, x: u16) -> Result<char, ScreenError> {
        self.check(y, x)?;
        Ok(self.buf[self.offset(y, x)] as char)
    }

    /// Read the paddle column `col` at board row `y`
    pub fn paddle_cell(&self, y: u16, col: u16) -> Result<char, ScreenError> {
        if y >= self.layout.board_height() || col >= self.layout.paddle_width() {
            return Err(ScreenError::OutOfRange {
                y,
                x: col,
                height: self.layout.board_height(),
                width: self.layout.paddle_width(),
            });
        }
        Ok(self.buf[self.paddle_offset(y, col)] as char)
    }

    #[inline]
    fn paddle_offset(&self, y: u16, col: u16) -> usize {
        self.layout.screen_width() as usize * (1 + y as usize) + col as usize
    }

    /// Write a board cell. Checked builds panic on out-of-range coordinates.
    #[inline]
    pub(crate) fn set(&mut self, y: u16, x: u16, glyph: char) {
        if cfg!(debug_assertions) {
            if let Err(err) = self.check(y, x) {
                panic!("{err}");
            }
        }
        let idx = self.offset(y, x);
        self.buf[idx] = glyph as u8;
    }

    /// Paint one row of the paddle column(s)
    pub(crate) fn set_paddle_row(&mut self, y: u16, glyph: char) {
        debug_assert!(y < self.layout.board_height(), "paddle row {y} off the board");
        let start = self.paddle_offset(y, 0);
        let end = start + self.layout.paddle_width() as usize;
        self.buf[start..end].fill(glyph as u8);
    }

    /// Paint the innermost paddle column at row `y`
    pub(crate) fn set_paddle_edge(&mut self, y: u16, glyph: char) {
        debug_assert!(y < self.layout.board_height(), "paddle row {y} off the board");
        let idx = self.paddle_offset(y, self.layout.paddle_width() - 1);
        self.buf[idx] = glyph as u8;
    }

    /// Paint a `rows x cols` block with its top-left corner at `(y, x)`
    pub(crate) fn fill_block(&mut self, y: u16, x: u16, rows: u16, cols: u16, glyph: char) {
        for i in y..y + rows {
            for j in x..x + cols {
                self.set(i, j, glyph);
            }
        }
    }

    /// The whole buffer, NUL terminator included
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    #[inline]
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_with_nul(&self.buf)
            .expect("glyphs are printable ASCII, so the only NUL is the terminator")
    }

    /// The frame text without the terminator
    #[inline]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.buf.len() - 1])
            .expect("glyphs are validated as ASCII")
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
