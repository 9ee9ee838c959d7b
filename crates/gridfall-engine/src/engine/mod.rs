//! Game logic orchestrating the core data structures.
//!
//! - [`Field`] - placed-cell grid: collision queries, moves, rotation with
//!   kick resolution, affixing, row clearing
//! - [`SevenBagGenerator`] - randomized repeating piece sequencer
//! - [`ScoreBoard`] - score and drop statistics
//! - [`Game`] - one play session: spawning, gravity, player actions,
//!   ghost position, game-over detection
//!
//! # Game flow
//!
//! An external driver (timer plus input handler) repeatedly invokes the
//! action methods and a periodic gravity tick:
//!
//! 1. Construct a [`Game`] with a row/column configuration
//! 2. Player input drives [`Game::attempt_move`],
//!    [`Game::attempt_rotate_right`], [`Game::hard_drop`],
//!    [`Game::attempt_hold`]
//! 3. The timer drives [`Game::apply_gravity`]; a piece that can no longer
//!    fall is affixed, completed rows are cleared and scored, and the next
//!    piece spawns
//! 4. Repeat until top-out, then discard the session and construct a new one
//!
//! # Example
//!
//! ```
//! use gridfall_engine::{Direction, FieldConfig, Game};
//!
//! let mut game = Game::new(FieldConfig::default());
//!
//! game.attempt_move(Direction::Left);
//! game.attempt_rotate_right().unwrap();
//! game.hard_drop();
//! let outcome = game.apply_gravity();
//!
//! assert!(outcome.is_locked());
//! ```

pub use self::{bag_generator::*, field::*, game::*, score_board::*};

mod bag_generator;
mod field;
mod game;
mod score_board;
