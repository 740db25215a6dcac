use std::{mem, time::Duration};

use rand::Rng as _;

use crate::{
    PieceCollisionError,
    core::{Board, Piece, PieceKind},
    engine::{GameEvent, PieceSource, Progress, SourceSeed},
};

/// Duration of the line-clear animation, during which gravity and
/// spawning are suspended.
pub const LINE_CLEAR_DURATION: Duration = Duration::from_millis(600);

/// The coarse state of a run.
///
/// The clearing phase is a real state, not a flag on top of normal play:
/// while lines are mid-clear there is no active piece and gravity does
/// not run.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Normal play; the active piece falls and accepts input.
    Falling,
    /// Full lines were detected at lock time and are animating out.
    ClearingLines {
        /// Row indices captured by the full-line scan, top to bottom.
        rows: Vec<usize>,
        /// Time spent in this phase so far.
        elapsed: Duration,
    },
    /// Terminal: a spawn was blocked. Only restart is accepted.
    GameOver,
}

/// Rows mid-clear and their current fade intensity, for the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearAnimation<'a> {
    /// Row indices being removed, top to bottom.
    pub rows: &'a [usize],
    /// Fade intensity in `0.0..=1.0`.
    pub intensity: f32,
}

/// Cosine easing for the line-clear fade: `(1 - cos(π·t)) / 2`.
///
/// Monotonic from 0 at `t = 0` to 1 at `t = 1`; `t` is clamped.
#[must_use]
pub fn fade_intensity(progress: f32) -> f32 {
    0.5 * (1.0 - (std::f32::consts::PI * progress.clamp(0.0, 1.0)).cos())
}

/// The game state machine: board, active piece, progress, and the timed
/// gravity / line-clear / game-over transitions.
///
/// The whole struct is pure in-memory state driven by
/// [`update`](Self::update) with measured elapsed time and by the input
/// methods. It owns every mutable piece of game state; renderers get
/// read-only accessors and audio gets drained [`GameEvent`]s.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Piece,
    next_kind: PieceKind,
    source: PieceSource,
    progress: Progress,
    phase: Phase,
    paused: bool,
    drop_timer: Duration,
    drop_interval: Duration,
    events: Vec<GameEvent>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game with a randomly seeded piece source and spawns the
    /// first piece.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a deterministic piece sequence.
    #[must_use]
    pub fn with_seed(seed: SourceSeed) -> Self {
        let mut source = PieceSource::with_seed(seed);
        let next_kind = source.next_kind();
        let progress = Progress::new();
        let drop_interval = progress.drop_interval();
        let mut game = Self {
            board: Board::EMPTY,
            active: Piece::spawn(next_kind),
            next_kind,
            source,
            progress,
            phase: Phase::Falling,
            paused: false,
            drop_timer: Duration::ZERO,
            drop_interval,
            events: Vec::new(),
        };
        game.spawn_piece();
        game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece, present only during normal play.
    #[must_use]
    pub fn active_piece(&self) -> Option<&Piece> {
        self.phase.is_falling().then_some(&self.active)
    }

    /// The piece type that spawns next.
    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// The in-flight clear animation, if lines are mid-clear.
    #[must_use]
    pub fn clear_animation(&self) -> Option<ClearAnimation<'_>> {
        match &self.phase {
            Phase::ClearingLines { rows, elapsed } => {
                let progress = elapsed.as_secs_f32() / LINE_CLEAR_DURATION.as_secs_f32();
                Some(ClearAnimation {
                    rows: rows.as_slice(),
                    intensity: fade_intensity(progress),
                })
            }
            Phase::Falling | Phase::GameOver => None,
        }
    }

    /// Drains the queued cue notifications.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        mem::take(&mut self.events)
    }

    /// Advances the simulation by `dt` of real time.
    ///
    /// Gravity is accumulator-based: when the accumulated time reaches
    /// the drop interval it resets and exactly one gravity step runs, so
    /// behavior is independent of frame rate. Paused and game-over states
    /// ignore time entirely.
    pub fn update(&mut self, dt: Duration) {
        if self.paused || self.phase.is_game_over() {
            return;
        }

        if let Phase::ClearingLines { elapsed, .. } = &mut self.phase {
            *elapsed += dt;
            if *elapsed >= LINE_CLEAR_DURATION {
                self.finish_line_clear();
            }
            return;
        }

        self.drop_timer += dt;
        if self.drop_timer >= self.drop_interval {
            self.drop_timer = Duration::ZERO;
            self.step_gravity();
        }
    }

    pub fn try_move_left(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(-1, 0)
    }

    pub fn try_move_right(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(1, 0)
    }

    /// Player-driven one-row drop.
    pub fn try_soft_drop(&mut self) -> Result<(), PieceCollisionError> {
        self.try_shift(0, 1)?;
        self.events.push(GameEvent::SoftDropped);
        Ok(())
    }

    /// Rotates the active piece clockwise at its current origin.
    ///
    /// No kick search: if the rotated footprint collides, the rotation is
    /// rejected outright.
    pub fn try_rotate(&mut self) -> Result<(), PieceCollisionError> {
        if !self.is_accepting_moves() {
            return Err(PieceCollisionError);
        }
        let candidate = self.active.rotated();
        if !self.board.is_valid_position(&candidate.blocks()) {
            return Err(PieceCollisionError);
        }
        self.active = candidate;
        self.events.push(GameEvent::PieceRotated);
        Ok(())
    }

    /// Drops the active piece to its lowest valid position and locks it
    /// immediately.
    pub fn hard_drop(&mut self) {
        if !self.is_accepting_moves() {
            return;
        }
        loop {
            let candidate = self.active.down();
            if !self.board.is_valid_position(&candidate.blocks()) {
                break;
            }
            self.active = candidate;
        }
        self.events.push(GameEvent::HardDropped);
        self.lock_piece();
    }

    /// Toggles the pause flag. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        if !self.phase.is_game_over() {
            self.paused = !self.paused;
        }
    }

    /// Starts a fresh run after a game over: board, progress, timers and
    /// the pause flag are reset, then a piece spawns. The piece source
    /// keeps its stream. Ignored while a run is in progress.
    pub fn restart(&mut self) {
        if !self.phase.is_game_over() {
            return;
        }
        self.board = Board::EMPTY;
        self.progress = Progress::new();
        self.phase = Phase::Falling;
        self.paused = false;
        self.drop_timer = Duration::ZERO;
        self.drop_interval = self.progress.drop_interval();
        self.events.clear();
        self.spawn_piece();
    }

    /// Replaces the active piece, rejecting a colliding placement.
    pub fn set_active_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if !self.board.is_valid_position(&piece.blocks()) {
            return Err(PieceCollisionError);
        }
        self.active = piece;
        Ok(())
    }

    fn is_accepting_moves(&self) -> bool {
        self.phase.is_falling() && !self.paused
    }

    fn try_shift(&mut self, dx: i32, dy: i32) -> Result<(), PieceCollisionError> {
        if !self.is_accepting_moves() {
            return Err(PieceCollisionError);
        }
        let candidate = self.active.shifted(dx, dy);
        if !self.board.is_valid_position(&candidate.blocks()) {
            return Err(PieceCollisionError);
        }
        self.active = candidate;
        Ok(())
    }

    fn step_gravity(&mut self) {
        let candidate = self.active.down();
        if self.board.is_valid_position(&candidate.blocks()) {
            self.active = candidate;
        } else {
            self.lock_piece();
        }
    }

    fn lock_piece(&mut self) {
        self.board.place(&self.active.blocks(), self.active.kind());
        let rows = self.board.full_lines();
        if rows.is_empty() {
            self.spawn_piece();
        } else {
            self.events.push(GameEvent::LinesCleared { count: rows.len() });
            self.phase = Phase::ClearingLines {
                rows,
                elapsed: Duration::ZERO,
            };
        }
    }

    fn finish_line_clear(&mut self) {
        let Phase::ClearingLines { rows, .. } = mem::replace(&mut self.phase, Phase::Falling)
        else {
            return;
        };
        self.board.remove_lines(&rows);
        if self.progress.record_clear(rows.len()) {
            self.events.push(GameEvent::LevelUp);
        }
        self.drop_interval = self.progress.drop_interval();
        self.spawn_piece();
    }

    /// Promotes the "next" type to the active piece and draws a new one.
    /// A blocked spawn position is the game-over transition.
    fn spawn_piece(&mut self) {
        self.active = Piece::spawn(self.next_kind);
        self.next_kind = self.source.next_kind();
        if !self.board.is_valid_position(&self.active.blocks()) {
            self.phase = Phase::GameOver;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point, Rotation};

    fn game() -> Game {
        Game::with_seed(SourceSeed::from([7; 16]))
    }

    /// Marks a single board cell occupied.
    fn occupy(game: &mut Game, x: i32, y: i32) {
        game.board.place(&[Point::new(x, y); 4], PieceKind::O);
    }

    fn active_origin(game: &Game) -> Point {
        game.active_piece().expect("piece should be falling").origin()
    }

    #[test]
    fn test_initial_spawn_on_empty_board() {
        let game = game();
        assert!(game.phase().is_falling());
        assert_eq!(active_origin(&game), Piece::SPAWN_ORIGIN);
        assert_eq!(game.progress().score(), 0);
        assert!((game.drop_interval.as_secs_f32() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_same_seed_spawns_same_pieces() {
        let a = Game::with_seed(SourceSeed::from([3; 16]));
        let b = Game::with_seed(SourceSeed::from([3; 16]));
        assert_eq!(a.active, b.active);
        assert_eq!(a.next_kind(), b.next_kind());
    }

    #[test]
    fn test_gravity_is_time_accumulated() {
        let mut game = game();
        let spawn_y = active_origin(&game).y;

        game.update(Duration::from_millis(790));
        assert_eq!(active_origin(&game).y, spawn_y, "interval not reached");

        // The remaining 10 ms completes the 800 ms interval.
        game.update(Duration::from_millis(10));
        assert_eq!(active_origin(&game).y, spawn_y + 1);

        // The accumulator restarted from zero.
        game.update(Duration::from_millis(790));
        assert_eq!(active_origin(&game).y, spawn_y + 1);
    }

    #[test]
    fn test_movement_rejected_at_walls() {
        let mut game = game();
        while game.try_move_left().is_ok() {}
        let min_x = game
            .active_piece()
            .unwrap()
            .blocks()
            .iter()
            .map(|p| p.x)
            .min()
            .unwrap();
        assert_eq!(min_x, 0);

        while game.try_move_right().is_ok() {}
        let max_x = game
            .active_piece()
            .unwrap()
            .blocks()
            .iter()
            .map(|p| p.x)
            .max()
            .unwrap();
        assert_eq!(max_x, 9);
    }

    #[test]
    fn test_rotation_rejected_on_collision() {
        let mut game = game();
        game.set_active_piece(Piece::new(
            PieceKind::T,
            Rotation::default(),
            Point::new(3, 5),
        ))
        .unwrap();

        // T at rotation 1 adds a block at origin+(1,2); occupy it.
        occupy(&mut game, 4, 7);
        assert!(game.try_rotate().is_err());
        assert_eq!(game.active_piece().unwrap().rotation(), Rotation::default());
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_soft_drop_moves_and_signals() {
        let mut game = game();
        let y = active_origin(&game).y;
        game.try_soft_drop().unwrap();
        assert_eq!(active_origin(&game).y, y + 1);
        assert_eq!(game.take_events(), vec![GameEvent::SoftDropped]);
    }

    #[test]
    fn test_plain_moves_emit_no_events() {
        let mut game = game();
        game.try_move_left().unwrap();
        game.try_move_right().unwrap();
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_hard_drop_locks_immediately() {
        let mut game = game();
        game.set_active_piece(Piece::new(
            PieceKind::I,
            Rotation::default(),
            Point::new(0, 5),
        ))
        .unwrap();
        game.hard_drop();

        // I-piece rests on the floor: row 19, columns 0-3.
        for x in 0..4 {
            assert_eq!(game.board().cell(x, 19), Some(PieceKind::I));
        }
        // No full line, so the next piece spawned immediately.
        assert!(game.phase().is_falling());
        assert_eq!(active_origin(&game), Piece::SPAWN_ORIGIN);
        assert!(game.take_events().contains(&GameEvent::HardDropped));
    }

    #[test]
    fn test_lock_on_blocked_gravity_step() {
        let mut game = game();
        game.set_active_piece(Piece::new(
            PieceKind::O,
            Rotation::default(),
            Point::new(0, 18),
        ))
        .unwrap();

        // O at (0,18) covers rows 18-19 already; one gravity step locks.
        game.update(Duration::from_millis(800));
        assert_eq!(game.board().cell(1, 19), Some(PieceKind::O));
        assert!(game.phase().is_falling());
    }

    /// Rows 18/19 occupied except columns 0-3; an I-piece hard-dropped
    /// into the gap completes row 19 only, then the timed clear removes
    /// it and scores.
    #[test]
    fn test_line_clear_scenario() {
        let mut game = game();
        for x in 4..10 {
            occupy(&mut game, x, 18);
            occupy(&mut game, x, 19);
        }
        game.set_active_piece(Piece::new(
            PieceKind::I,
            Rotation::default(),
            Point::new(0, 10),
        ))
        .unwrap();
        game.hard_drop();

        // Row 19 full, row 18 not; the clear phase holds the row index.
        let events = game.take_events();
        assert!(events.contains(&GameEvent::LinesCleared { count: 1 }));
        let animation = game.clear_animation().expect("clearing should start");
        assert_eq!(animation.rows, &[19]);
        assert!(animation.intensity.abs() < 1e-6);
        assert!(game.active_piece().is_none());
        assert_eq!(game.progress().score(), 0, "scored only when finalized");

        // Mid-animation: gravity suspended, fade half way.
        game.update(Duration::from_millis(300));
        let animation = game.clear_animation().unwrap();
        assert!((animation.intensity - 0.5).abs() < 1e-3);
        assert!(game.board().cell(4, 19).is_some());

        // Animation completes: row removed, score applied, next spawn.
        game.update(Duration::from_millis(300));
        assert!(game.phase().is_falling());
        assert_eq!(game.progress().score(), 100);
        assert_eq!(game.progress().total_lines(), 1);
        // Old row 18 shifted down into row 19; row 18 now clear.
        assert_eq!(game.board().cell(4, 19), Some(PieceKind::O));
        assert_eq!(game.board().cell(4, 18), None);
        assert!(game.board().full_lines().is_empty());
    }

    #[test]
    fn test_input_ignored_while_clearing() {
        let mut game = game();
        for x in 1..10 {
            occupy(&mut game, x, 19);
        }
        game.set_active_piece(Piece::new(
            PieceKind::I,
            Rotation::ALL[1],
            Point::new(-1, 10),
        ))
        .unwrap();
        game.hard_drop();
        assert!(game.phase().is_clearing_lines());

        assert!(game.try_move_left().is_err());
        assert!(game.try_rotate().is_err());
        let board_before = game.board.clone();
        game.hard_drop();
        assert_eq!(game.board, board_before);
    }

    #[test]
    fn test_level_up_adjusts_speed_and_signals() {
        let mut game = game();
        // Nine lines already cleared this run.
        for _ in 0..9 {
            game.progress.record_clear(1);
        }

        for x in 1..10 {
            occupy(&mut game, x, 19);
        }
        // Vertical I in column 0 fills the gap.
        game.set_active_piece(Piece::new(
            PieceKind::I,
            Rotation::ALL[1],
            Point::new(-1, 10),
        ))
        .unwrap();
        game.hard_drop();
        game.update(LINE_CLEAR_DURATION);

        assert_eq!(game.progress().level(), 1);
        assert!((game.drop_interval.as_secs_f32() - 0.75).abs() < 1e-6);
        assert!(game.take_events().contains(&GameEvent::LevelUp));
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut game = game();
        for x in 0..10 {
            occupy(&mut game, x, 0);
        }
        game.spawn_piece();
        assert!(game.is_game_over());
        assert!(game.active_piece().is_none());

        // Gravity ticks and inputs mutate nothing until restart.
        let board_before = game.board.clone();
        for _ in 0..5 {
            game.update(Duration::from_secs(1));
        }
        assert!(game.try_move_left().is_err());
        game.hard_drop();
        game.toggle_pause();
        assert!(!game.is_paused());
        assert_eq!(game.board, board_before);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut game = game();
        game.progress.record_clear(4);
        for x in 0..10 {
            occupy(&mut game, x, 0);
        }
        game.spawn_piece();
        assert!(game.is_game_over());

        game.restart();
        assert!(game.phase().is_falling());
        assert_eq!(game.progress().score(), 0);
        assert_eq!(game.progress().total_lines(), 0);
        assert!(game.board().full_lines().is_empty());
        assert!(game.board().rows().all(|row| row.iter().all(Option::is_none)));
        assert_eq!(active_origin(&game), Piece::SPAWN_ORIGIN);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut game = game();
        game.progress.record_clear(2);
        game.restart();
        assert_eq!(game.progress().total_lines(), 2);
    }

    #[test]
    fn test_pause_freezes_time_and_input() {
        let mut game = game();
        let y = active_origin(&game).y;

        game.toggle_pause();
        assert!(game.is_paused());
        game.update(Duration::from_secs(10));
        assert!(game.try_move_left().is_err());
        assert_eq!(active_origin(&game).y, y);

        game.toggle_pause();
        game.update(Duration::from_millis(800));
        assert_eq!(active_origin(&game).y, y + 1);
    }

    #[test]
    fn test_fade_intensity_easing() {
        assert!(fade_intensity(0.0).abs() < 1e-6);
        assert!((fade_intensity(0.5) - 0.5).abs() < 1e-6);
        assert!((fade_intensity(1.0) - 1.0).abs() < 1e-6);
        // Clamped outside the animation window.
        assert!(fade_intensity(-1.0).abs() < 1e-6);
        assert!((fade_intensity(2.0) - 1.0).abs() < 1e-6);

        let mut previous = fade_intensity(0.0);
        for step in 1..=20 {
            #[expect(clippy::cast_precision_loss)]
            let t = step as f32 / 20.0;
            let value = fade_intensity(t);
            assert!(value >= previous, "not monotonic at t={t}");
            previous = value;
        }
    }
}
