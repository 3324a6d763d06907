//! One simulation tick
//!
//! Order within a tick: vertical bounce, horizontal bounce or miss, redraw
//! the ball one cell further along, then let the autopilot react.

use glam::U16Vec2;

use super::collision::{Contact, paddle_contact};
use super::state::{GamePhase, Heading, Pong};

impl Pong {
    /// Advance the game by one tick
    ///
    /// Returns `false` on the tick the ball gets past the paddle; the frame
    /// then shows the loss and is never redrawn. Further calls keep
    /// returning `false`.
    pub fn step(&mut self) -> bool {
        if self.phase == GamePhase::Terminated {
            log::warn!("step called on a finished game");
            return false;
        }
        let layout = *self.layout();

        if self.ball.y == layout.height() {
            self.velocity.vertical = Heading::Decreasing;
            log::trace!("tick {}: bounce off bottom wall", self.ticks);
        } else if self.ball.y == 0 {
            self.velocity.vertical = Heading::Increasing;
            log::trace!("tick {}: bounce off top wall", self.ticks);
        }

        if self.ball.x == layout.width() {
            self.velocity.horizontal = Heading::Decreasing;
            log::trace!("tick {}: bounce off right wall", self.ticks);
        } else if self.ball.x == 0 {
            let contact = paddle_contact(
                self.paddle_y,
                layout.paddle_height(),
                self.ball.y,
                layout.ball_diameter(),
            );
            match contact {
                Contact::Returned => {
                    self.velocity.horizontal = Heading::Increasing;
                    log::trace!("tick {}: paddle return at row {}", self.ticks, self.ball.y);
                }
                Contact::Missed => {
                    log::debug!(
                        "tick {}: ball at row {} missed paddle at row {}",
                        self.ticks,
                        self.ball.y,
                        self.paddle_y
                    );
                    self.end_game();
                    self.phase = GamePhase::Terminated;
                    self.ticks += 1;
                    return false;
                }
            }
        }

        self.move_ball();
        self.autopilot();
        self.ticks += 1;
        true
    }

    /// Erase the trailing row and column, move, draw the leading row and column
    fn move_ball(&mut self) {
        let diameter = self.layout().ball_diameter();
        let glyphs = *self.screen.glyphs();
        let down = self.velocity.vertical.is_increasing();
        let right = self.velocity.horizontal.is_increasing();

        let U16Vec2 { x, y } = self.ball;
        let row = if down { y } else { y + diameter - 1 };
        let col = if right { x } else { x + diameter - 1 };
        self.screen.fill_block(row, x, 1, diameter, glyphs.empty);
        self.screen.fill_block(y, col, diameter, 1, glyphs.empty);

        self.ball = U16Vec2::new(
            self.velocity.horizontal.advance(x),
            self.velocity.vertical.advance(y),
        );

        let U16Vec2 { x, y } = self.ball;
        let row = if down { y + diameter - 1 } else { y };
        let col = if right { x + diameter - 1 } else { x };
        self.screen.fill_block(row, x, 1, diameter, glyphs.ball);
        self.screen.fill_block(y, col, diameter, 1, glyphs.ball);
    }

    /// Follow the ball once it is directly above or below the paddle
    fn autopilot(&mut self) {
        let layout = *self.layout();
        if self.paddle_y + layout.paddle_height() == self.ball.y {
            self.paddle_dn();
        } else if self.ball.y + layout.ball_diameter() == self.paddle_y {
            self.paddle_up();
        }
    }

    /// Draw the final frame: the ball half inside the paddle column
    fn end_game(&mut self) {
        let diameter = self.layout().ball_diameter();
        let glyphs = *self.screen.glyphs();

        self.screen
            .fill_block(self.ball.y, 0, diameter, diameter, glyphs.empty);

        // Row the ball would have moved to; the column is one left of the board
        let y = self.velocity.vertical.advance(self.ball.y);
        for row in y..y + diameter {
            self.screen.set_paddle_edge(row, glyphs.lose);
        }
        self.screen.fill_block(y, 0, diameter, diameter - 1, glyphs.ball);
    }
}
