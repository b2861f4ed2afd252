use std::fs::OpenOptions;
use std::path::PathBuf;

use crate::config::{ConfigStore, Settings, resolve_config_path};
use crate::player::Player;

/// Route logs to a file next to the config; the terminal owns stderr
/// while the TUI runs. `RUST_LOG` filters as usual.
pub fn init_logging() {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = resolve_config_path().map(|p| p.with_file_name("quaver.log")) {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = builder.try_init();
}

pub fn apply_settings(player: &mut Player, settings: &Settings) {
    player.set_volume(settings.volume);
    player.set_balance(settings.balance);
    player.set_repeat(settings.repeat);
}

/// Re-import the autosaved playlist (never autoplays), then treat CLI
/// arguments as a dropped batch (autoplays when the list was empty).
pub fn import_initial_tracks(player: &mut Player, config: &ConfigStore) {
    if let Some(path) = config.autosave_path() {
        player.restore_playlist(&path);
    }

    let args: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    if !args.is_empty() {
        player.push_paths(args);
    }
}
