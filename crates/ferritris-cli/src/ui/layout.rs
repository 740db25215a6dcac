use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::ui::{BoardDisplay, NextPieceDisplay, StatsDisplay, VolumeSlider};

/// Width of the side column (next piece, stats, volume).
const SIDE_WIDTH: u16 = 18;

/// Fixed frame layout, shared by drawing and mouse handling so both agree
/// on where the volume slider sits.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub board: Rect,
    pub next: Rect,
    pub stats: Rect,
    pub volume: Rect,
    pub help: Rect,
}

impl AppLayout {
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let [main, help] = Layout::vertical([
            Constraint::Min(BoardDisplay::height()),
            Constraint::Length(1),
        ])
        .areas(area);

        let [board_column, side_column] = Layout::horizontal([
            Constraint::Length(BoardDisplay::width()),
            Constraint::Length(SIDE_WIDTH),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main);

        let [board] = Layout::vertical([Constraint::Length(BoardDisplay::height())])
            .areas(board_column);
        let [next, stats, volume] = Layout::vertical([
            Constraint::Length(NextPieceDisplay::height()),
            Constraint::Length(StatsDisplay::height()),
            Constraint::Length(VolumeSlider::height()),
        ])
        .areas(side_column);

        Self {
            board,
            next,
            stats,
            volume,
            help,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_a_regular_terminal() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.board.width, BoardDisplay::width());
        assert_eq!(layout.board.height, BoardDisplay::height());
        assert_eq!(layout.volume.height, VolumeSlider::height());
        assert!(!layout.volume.is_empty());
        assert!(layout.board.intersection(layout.volume).is_empty());
        assert_eq!(layout.help.height, 1);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let area = Rect::new(0, 0, 100, 30);
        let a = AppLayout::new(area);
        let b = AppLayout::new(area);
        assert_eq!(a.volume, b.volume);
        assert_eq!(a.board, b.board);
    }
}
