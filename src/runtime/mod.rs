use std::sync::mpsc;

use anyhow::Context;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::audio::RodioEngine;
use crate::config::ConfigStore;
use crate::mpris::{self, ControlCmd};
use crate::player::Player;

mod event_loop;
mod startup;

pub fn run() -> anyhow::Result<()> {
    startup::init_logging();

    let mut config = ConfigStore::open();

    // The one fatal startup error; everything after this degrades softly.
    let engine = RodioEngine::new().context("failed to open an audio output device")?;
    let mut player = Player::new(&engine);

    startup::apply_settings(&mut player, config.settings());
    startup::import_initial_tracks(&mut player, &config);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = {
        let mut state = event_loop::EventLoopState::new();
        event_loop::run(
            &mut terminal,
            &mut player,
            &mut config,
            &mpris,
            &control_rx,
            &mut state,
        )
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Persist on the way out no matter how the loop ended.
    if let Some(path) = config.autosave_path() {
        if player.save_playlist(&path) {
            log::info!("autosaved playlist to {}", path.display());
        }
    }
    config.flush();

    run_result
}
