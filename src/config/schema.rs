use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::player::Repeat;

/// Application settings, persisted to `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/quaver/config.toml` or
/// `~/.config/quaver/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `QUAVER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playback volume, 0 to 100.
    pub volume: i64,
    /// Stereo balance, -1.0 (left) to 1.0 (right).
    pub balance: f32,
    /// Repeat mode restored at startup: "none", "one" or "all".
    pub repeat: Repeat,
    /// Whether the tracklist is saved on quit and restored at startup.
    pub autosave: bool,
    /// Autosave playlist location; a relative path lives next to the
    /// config file.
    pub autosave_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            volume: 100,
            balance: 0.0,
            repeat: Repeat::None,
            autosave: true,
            autosave_path: PathBuf::from("quaver.m3u"),
        }
    }
}
