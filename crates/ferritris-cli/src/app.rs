use std::time::Duration;

use crossterm::event::{Event, MouseButton, MouseEvent, MouseEventKind};
use ferritris_engine::Game;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::Block,
};

use crate::{
    audio::{AudioSettings, SoundCue, SoundSink, cue_for_event},
    input::{Action, action_for_key},
    tui::{App, RenderMode, Tui},
    ui::{AppLayout, BoardDisplay, NextPieceDisplay, StatsDisplay, VolumeSlider},
};

/// The interactive game application: owns the state machine, the audio
/// settings collaborator, and the sound sink.
#[derive(Debug)]
pub struct GameApp {
    game: Game,
    audio: AudioSettings,
    sink: Box<dyn SoundSink>,
    fps: f64,
    dragging_volume: bool,
    is_exiting: bool,
}

impl GameApp {
    #[must_use]
    pub fn new(game: Game, audio: AudioSettings, sink: Box<dyn SoundSink>, fps: f64) -> Self {
        Self {
            game,
            audio,
            sink,
            fps,
            dragging_volume: false,
            is_exiting: false,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::MoveLeft => _ = self.game.try_move_left(),
            Action::MoveRight => _ = self.game.try_move_right(),
            Action::SoftDrop => _ = self.game.try_soft_drop(),
            Action::Rotate => _ = self.game.try_rotate(),
            Action::HardDrop => self.game.hard_drop(),
            Action::TogglePause => self.game.toggle_pause(),
            Action::Restart => self.game.restart(),
            Action::ToggleMute => {
                self.audio.toggle_mute();
                self.click();
            }
            Action::VolumeDown => {
                self.audio.step_down();
                self.click();
            }
            Action::VolumeUp => {
                self.audio.step_up();
                self.click();
            }
            Action::Quit => self.is_exiting = true,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // The slider position is recomputed from the terminal size, which
        // matches the layout used by draw().
        let Ok((width, height)) = crossterm::terminal::size() else {
            return;
        };
        let layout = AppLayout::new(Rect::new(0, 0, width, height));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(volume) =
                    VolumeSlider::volume_at(layout.volume, mouse.column, mouse.row)
                {
                    self.dragging_volume = true;
                    self.audio.set_volume(volume);
                    self.click();
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging_volume => {
                let volume = VolumeSlider::volume_for_column(layout.volume, mouse.column);
                self.audio.set_volume(volume);
            }
            MouseEventKind::Up(MouseButton::Left) => self.dragging_volume = false,
            _ => {}
        }
    }

    fn click(&mut self) {
        self.sink.play(SoundCue::UiClick, self.audio.effective_volume());
    }

    /// Forwards queued game events to the sound sink at the current
    /// effective volume.
    fn pump_events(&mut self) {
        for event in self.game.take_events() {
            self.sink
                .play(cue_for_event(event), self.audio.effective_volume());
        }
    }

    fn border_style(&self) -> Style {
        let color = if self.game.is_game_over() {
            Color::Red
        } else if self.game.is_paused() {
            Color::Yellow
        } else {
            Color::White
        };
        Style::default().fg(color)
    }
}

impl App for GameApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_rate(self.fps);
        tui.set_render_mode(RenderMode::interval_from_rate(self.fps));
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(action) = action_for_key(key) {
                    self.apply(action);
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
        self.pump_events();
    }

    fn draw(&self, frame: &mut Frame) {
        let layout = AppLayout::new(frame.area());
        let border_style = self.border_style();

        frame.render_widget(
            BoardDisplay::new(&self.game).block(Block::bordered().border_style(border_style)),
            layout.board,
        );
        frame.render_widget(
            NextPieceDisplay::new(self.game.next_kind()).block(
                Block::bordered()
                    .title(Line::from("NEXT").centered())
                    .border_style(border_style),
            ),
            layout.next,
        );
        frame.render_widget(
            StatsDisplay::new(&self.game).block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .border_style(border_style),
            ),
            layout.stats,
        );
        frame.render_widget(
            VolumeSlider::new(self.audio).block(
                Block::bordered()
                    .title(Line::from("VOLUME").centered())
                    .border_style(border_style),
            ),
            layout.volume,
        );

        let help = if self.game.is_game_over() {
            "Controls: R (Restart) | Q (Quit)"
        } else if self.game.is_paused() {
            "Controls: P (Resume) | Q (Quit)"
        } else {
            "Controls: ← → (Move) | ↓ (Soft Drop) | ↑ (Rotate) | Space (Hard Drop) | P (Pause) | M (Mute) | - + (Volume) | Q (Quit)"
        };
        frame.render_widget(
            Text::from(help)
                .style(Style::default().fg(Color::DarkGray))
                .centered(),
            layout.help,
        );
    }

    fn update(&mut self, _tui: &mut Tui, dt: Duration) {
        self.game.update(dt);
        self.pump_events();
    }
}
