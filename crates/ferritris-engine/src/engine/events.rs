/// Discrete notifications emitted by the state machine for front-end
/// collaborators (audio, UI cues).
///
/// The core queues these during input handling and updates; the front-end
/// drains them once per frame with
/// [`Game::take_events`](super::Game::take_events). The core carries no
/// volume or playback state — that lives with whoever consumes the
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GameEvent {
    /// The active piece rotated successfully.
    PieceRotated,
    /// The active piece moved down one row from player input.
    SoftDropped,
    /// The active piece was dropped to its resting position and locked.
    HardDropped,
    /// Full lines were detected at lock time; removal follows once the
    /// clear animation finishes.
    LinesCleared {
        /// Number of rows cleared at once (1-4).
        count: usize,
    },
    /// A finalized clear crossed a level boundary.
    LevelUp,
}
