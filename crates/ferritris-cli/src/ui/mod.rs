pub use self::{
    board::BoardDisplay, layout::AppLayout, next_piece::NextPieceDisplay, stats::StatsDisplay,
    volume::VolumeSlider,
};

mod board;
mod layout;
mod next_piece;
mod stats;
pub(crate) mod style;
mod volume;
