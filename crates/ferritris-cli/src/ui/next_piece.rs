use ferritris_engine::{PieceKind, Rotation};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use crate::ui::style;

/// Preview of the upcoming piece at its spawn rotation.
#[derive(Debug)]
pub struct NextPieceDisplay<'a> {
    kind: PieceKind,
    block: Option<BlockWidget<'a>>,
}

impl<'a> NextPieceDisplay<'a> {
    pub fn new(kind: PieceKind) -> Self {
        Self { kind, block: None }
    }

    #[must_use]
    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    /// Every base shape fits a 4×2 box; plus the border.
    #[must_use]
    pub const fn height() -> u16 {
        2 + 2
    }
}

impl Widget for NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &NextPieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let style = Style::default().bg(style::piece_color(self.kind));
        for offset in self.kind.block_offsets(Rotation::default()) {
            let (Ok(x), Ok(y)) = (u16::try_from(offset.x), u16::try_from(offset.y)) else {
                continue;
            };
            let row = area.y + y;
            if row >= area.bottom() {
                continue;
            }
            for dx in 0..2 {
                let col = area.x + x * 2 + dx;
                if col >= area.right() {
                    break;
                }
                if let Some(cell) = buf.cell_mut((col, row)) {
                    cell.set_style(style);
                    cell.set_symbol(" ");
                }
            }
        }
    }
}
