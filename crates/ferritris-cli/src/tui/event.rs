use std::time::Duration;

use crossterm::event::Event as CrosstermEvent;

/// Events processed by the TUI application.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// Game logic update timing; carries the time elapsed since the
    /// previous tick so updates are simulation-time based.
    Tick(Duration),
    /// Screen render timing (based on the render mode).
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(CrosstermEvent),
}
