//! Game state machine and supporting services.
//!
//! - [`Game`] - The update/scoring state machine driving a single run
//! - [`Progress`] - Score, cleared-line total, derived level and speed
//! - [`PieceSource`] - Seeded uniform piece draw
//! - [`GameEvent`] - Discrete cue notifications for front-end collaborators
//!
//! # Game Flow
//!
//! 1. A [`Game`] spawns the first piece from its [`PieceSource`]
//! 2. The front-end feeds input and elapsed time ([`Game::update`])
//! 3. Gravity steps the piece down; a blocked step locks it into the board
//! 4. Full lines enter a timed clearing phase, then are removed and scored
//! 5. Repeat until a spawn is blocked (game over), then [`Game::restart`]

pub use self::{events::*, game::*, piece_source::*, progress::*};

mod events;
mod game;
mod piece_source;
mod progress;
