pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;

/// Playable board width in cells.
pub const BOARD_WIDTH: usize = 10;
/// Playable board height in cells.
pub const BOARD_HEIGHT: usize = 20;
