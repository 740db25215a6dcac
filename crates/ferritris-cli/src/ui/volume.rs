use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect},
    style::{Color, Style},
    widgets::{Block as BlockWidget, Widget},
};

use crate::audio::{AudioSettings, MAX_VOLUME};

/// Mouse-draggable volume bar.
///
/// The bar occupies the inner row of a bordered 3-row widget; the same
/// geometry backs both rendering and the pointer hit-test, so clicks land
/// where the bar is drawn.
#[derive(Debug)]
pub struct VolumeSlider<'a> {
    settings: AudioSettings,
    block: Option<BlockWidget<'a>>,
}

impl<'a> VolumeSlider<'a> {
    pub fn new(settings: AudioSettings) -> Self {
        Self {
            settings,
            block: None,
        }
    }

    #[must_use]
    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[must_use]
    pub const fn height() -> u16 {
        3
    }

    /// The bar row inside the border.
    fn bar_area(area: Rect) -> Rect {
        area.inner(Margin::new(1, 1))
    }

    /// Maps a pointer press inside the slider to a volume; `None` when
    /// the press misses the bar.
    #[must_use]
    pub fn volume_at(area: Rect, column: u16, row: u16) -> Option<u8> {
        Self::bar_area(area)
            .contains(Position::new(column, row))
            .then(|| Self::volume_for_column(area, column))
    }

    /// Maps a pointer column to a volume, clamping columns outside the
    /// bar; used while dragging, where the pointer may leave the widget.
    #[must_use]
    pub fn volume_for_column(area: Rect, column: u16) -> u8 {
        let bar = Self::bar_area(area);
        if bar.width <= 1 {
            return MAX_VOLUME;
        }
        let span = bar.width - 1;
        let offset = column.clamp(bar.x, bar.x + span) - bar.x;
        let volume = (u32::from(offset) * u32::from(MAX_VOLUME) + u32::from(span) / 2)
            / u32::from(span);
        u8::try_from(volume).unwrap_or(MAX_VOLUME)
    }
}

impl Widget for VolumeSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &VolumeSlider<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let bar = VolumeSlider::bar_area(area);
        if bar.is_empty() {
            return;
        }

        let fill_color = if self.settings.muted {
            Color::DarkGray
        } else {
            Color::Cyan
        };
        let filled =
            u32::from(bar.width) * u32::from(self.settings.volume) / u32::from(MAX_VOLUME);
        for i in 0..bar.width {
            let color = if u32::from(i) < filled {
                fill_color
            } else {
                Color::Black
            };
            if let Some(cell) = buf.cell_mut((bar.x + i, bar.y)) {
                cell.set_style(Style::default().bg(color));
                cell.set_symbol(" ");
            }
        }

        let label = if self.settings.muted {
            " MUTED ".to_string()
        } else {
            format!(" {}% ", self.settings.volume)
        };
        let label_width = u16::try_from(label.chars().count()).unwrap_or(bar.width);
        let start = bar.x + bar.width.saturating_sub(label_width) / 2;
        for (i, ch) in label.chars().enumerate() {
            let Ok(i) = u16::try_from(i) else { break };
            let col = start + i;
            if col >= bar.right() {
                break;
            }
            if let Some(cell) = buf.cell_mut((col, bar.y)) {
                cell.set_char(ch);
            }
        }
    }
}
