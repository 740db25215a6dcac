use ferritris_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::style;

/// Terminal columns per board cell; two make the grid roughly square.
const CELL_WIDTH: u16 = 2;

/// The play field: locked blocks, the falling piece, and any rows
/// mid-clear rendered at their current fade intensity.
#[derive(Debug)]
pub struct BoardDisplay<'a> {
    game: &'a Game,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(game: &'a Game) -> Self {
        Self { game, block: None }
    }

    #[must_use]
    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Widget footprint including the border.
    #[must_use]
    pub const fn width() -> u16 {
        10 * CELL_WIDTH + 2
    }

    /// Widget footprint including the border.
    #[must_use]
    pub const fn height() -> u16 {
        20 + 2
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let clearing = self.game.clear_animation();
        for (y, row) in self.game.board().rows().enumerate() {
            let fade = clearing
                .as_ref()
                .filter(|animation| animation.rows.contains(&y))
                .map(|animation| animation.intensity);
            for (x, cell) in row.iter().enumerate() {
                match cell {
                    Some(kind) => {
                        let color = match fade {
                            Some(intensity) => style::faded_piece_color(*kind, intensity),
                            None => style::piece_color(*kind),
                        };
                        draw_cell(area, buf, x, y, Style::default().bg(color), [" ", " "]);
                    }
                    None => {
                        let style = Style::default().fg(Color::DarkGray);
                        draw_cell(area, buf, x, y, style, [" ", "."]);
                    }
                }
            }
        }

        if let Some(piece) = self.game.active_piece() {
            let style = Style::default().bg(style::piece_color(piece.kind()));
            for p in piece.blocks() {
                // Blocks above the board are not visible yet.
                let (Ok(x), Ok(y)) = (usize::try_from(p.x), usize::try_from(p.y)) else {
                    continue;
                };
                draw_cell(area, buf, x, y, style, [" ", " "]);
            }
        }
    }
}

fn draw_cell(area: Rect, buf: &mut Buffer, x: usize, y: usize, style: Style, symbols: [&str; 2]) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    let row = area.y + y;
    if row >= area.bottom() {
        return;
    }
    for dx in 0..CELL_WIDTH {
        let col = area.x + x * CELL_WIDTH + dx;
        if col >= area.right() {
            return;
        }
        if let Some(cell) = buf.cell_mut((col, row)) {
            cell.set_style(style);
            cell.set_symbol(symbols[usize::from(dx)]);
        }
    }
}
