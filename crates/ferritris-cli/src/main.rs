use clap::Parser;
use ferritris_engine::{Game, SourceSeed};

use crate::{
    app::GameApp,
    audio::{AudioSettings, NullSink},
    tui::Tui,
};

mod app;
mod audio;
mod input;
mod tui;
mod ui;

/// Falling-block puzzle for the terminal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Piece-sequence seed as 32 hex characters; random when omitted
    #[clap(long)]
    seed: Option<SourceSeed>,
    /// Simulation tick rate and render frame rate
    #[clap(long, default_value_t = 60.0)]
    fps: f64,
    /// Initial sound volume (0-100)
    #[clap(long, default_value_t = 100)]
    volume: u8,
    /// Start with sound muted
    #[clap(long)]
    muted: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let game = match args.seed {
        Some(seed) => Game::with_seed(seed),
        None => Game::new(),
    };
    let audio = AudioSettings {
        volume: args.volume,
        muted: args.muted,
    }
    .clamped();

    let mut app = GameApp::new(game, audio, Box::new(NullSink), args.fps);
    Tui::new().run(&mut app)
}
