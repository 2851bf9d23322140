use anyhow::Context as _;
use stackfall_engine::Game;

use crate::{command::GameArg, tui::Tui};

use self::{app::PlayApp, screen::PlayScreen};

mod app;
mod screen;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    game: GameArg,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let config = arg.game.load_config()?;
    let game = Game::new(&config).context("Failed to start game")?;

    let mut app = PlayApp::new(PlayScreen::new(game));
    Tui::new().run(&mut app)?;

    let game = app.into_game();
    let stats = game.stats();
    eprintln!(
        "Ticks: {}, pieces locked: {}, lines cleared: {}",
        stats.ticks(),
        stats.locked_pieces(),
        stats.lines_cleared()
    );
    Ok(())
}
