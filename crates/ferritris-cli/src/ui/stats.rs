use ferritris_engine::Game;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block as BlockWidget, BlockExt as _, Paragraph, Widget},
};

/// Score, level, and line counters plus the run-state banner.
#[derive(Debug)]
pub struct StatsDisplay<'a> {
    game: &'a Game,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
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

    #[must_use]
    pub const fn height() -> u16 {
        5 + 2
    }
}

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let progress = self.game.progress();
        let banner = if self.game.is_game_over() {
            Line::from("GAME OVER").style(Style::default().fg(Color::Red))
        } else if self.game.is_paused() {
            Line::from("PAUSED").style(Style::default().fg(Color::Yellow))
        } else {
            Line::default()
        };

        let text = Text::from(vec![
            Line::from(format!("Score {:>9}", progress.score())),
            Line::from(format!("Level {:>9}", progress.level())),
            Line::from(format!("Lines {:>9}", progress.total_lines())),
            Line::default(),
            banner.centered(),
        ]);
        Paragraph::new(text).render(area, buf);
    }
}
