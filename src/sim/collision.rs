//! Paddle contact on the left edge
//!
//! On an integer grid a collision is just an overlap of row spans: the
//! paddle covers `[paddle_y, paddle_y + PaddleHeight)`, the ball covers
//! `[ball_y, ball_y + BallDiameter)`.

/// Outcome of the ball reaching column 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Some paddle row covers some ball row
    Returned,
    /// The ball passes the paddle column
    Missed,
}

/// Whether the half-open spans `[a, a + a_len)` and `[b, b + b_len)` share a cell
#[inline]
pub fn spans_overlap(a: u16, a_len: u16, b: u16, b_len: u16) -> bool {
    let (a, a_len, b, b_len) = (a as u32, a_len as u32, b as u32, b_len as u32);
    a < b + b_len && b < a + a_len
}

/// Check the paddle against a ball sitting in column 0
#[inline]
pub fn paddle_contact(paddle_y: u16, paddle_height: u16, ball_y: u16, ball_diameter: u16) -> Contact {
    if spans_overlap(paddle_y, paddle_height, ball_y, ball_diameter) {
        Contact::Returned
    } else {
        Contact::Missed
    }
}
