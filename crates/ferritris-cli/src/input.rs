use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Semantic game actions decoded from terminal input.
///
/// The game state machine only ever sees these; key codes stay here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
    HardDrop,
    TogglePause,
    Restart,
    ToggleMute,
    VolumeDown,
    VolumeUp,
    Quit,
}

/// Maps a key event to its action, if it is bound.
///
/// Key releases are ignored; repeats count as presses so held movement
/// keys keep working on terminals that report them.
#[must_use]
pub fn action_for_key(event: KeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }
    match event.code {
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Down => Some(Action::SoftDrop),
        KeyCode::Up => Some(Action::Rotate),
        KeyCode::Char(' ') => Some(Action::HardDrop),
        KeyCode::Char('p' | 'P') => Some(Action::TogglePause),
        KeyCode::Char('r' | 'R') => Some(Action::Restart),
        KeyCode::Char('m' | 'M') => Some(Action::ToggleMute),
        KeyCode::Char('-') => Some(Action::VolumeDown),
        KeyCode::Char('+' | '=') => Some(Action::VolumeUp),
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}
