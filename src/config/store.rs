use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::player::Repeat;

use super::load::resolve_config_path;
use super::schema::Settings;

/// Changes sit in memory at least this long before they hit the disk.
const SAVE_DEBOUNCE: Duration = Duration::from_secs(1);

/// Balance changes smaller than this are not worth a rewrite.
const BALANCE_EPSILON: f32 = 0.01;

/// Owns the loaded [`Settings`] and writes changes back, debounced.
///
/// All setters are change-detecting: feeding the store the same value
/// every frame never marks it dirty.
pub struct ConfigStore {
    path: Option<PathBuf>,
    settings: Settings,
    dirty_since: Option<Instant>,
}

impl ConfigStore {
    /// Load settings, falling back to defaults when the file is broken or
    /// out of range. Never fails; a config problem is not worth refusing
    /// to start the player.
    pub fn open() -> Self {
        let path = resolve_config_path();
        let settings = match Settings::load() {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(err) => {
                    log::warn!("invalid settings, using defaults: {err}");
                    Settings::default()
                }
            },
            Err(err) => {
                log::warn!("failed to load settings, using defaults: {err}");
                Settings::default()
            }
        };
        Self {
            path,
            settings,
            dirty_since: None,
        }
    }

    #[cfg(test)]
    pub(super) fn with_path(path: Option<PathBuf>, settings: Settings) -> Self {
        Self {
            path,
            settings,
            dirty_since: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the autosaved playlist lives, or `None` when autosave is off.
    pub fn autosave_path(&self) -> Option<PathBuf> {
        if !self.settings.autosave {
            return None;
        }
        let target = &self.settings.autosave_path;
        if target.is_absolute() {
            return Some(target.clone());
        }
        match self.path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => Some(dir.join(target)),
            None => Some(target.clone()),
        }
    }

    pub fn set_volume(&mut self, volume: i64) {
        if self.settings.volume != volume {
            self.settings.volume = volume;
            self.mark_dirty();
        }
    }

    pub fn set_balance(&mut self, balance: f32) {
        if (self.settings.balance - balance).abs() >= BALANCE_EPSILON {
            self.settings.balance = balance;
            self.mark_dirty();
        }
    }

    pub fn set_repeat(&mut self, repeat: Repeat) {
        if self.settings.repeat != repeat {
            self.settings.repeat = repeat;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        if self.dirty_since.is_none() {
            self.dirty_since = Some(Instant::now());
        }
    }

    /// Called once per frame; saves when a change has been pending at
    /// least [`SAVE_DEBOUNCE`].
    pub fn update(&mut self) {
        let Some(since) = self.dirty_since else {
            return;
        };
        if since.elapsed() >= SAVE_DEBOUNCE {
            self.save();
        }
    }

    /// Save pending changes immediately; used on shutdown.
    pub fn flush(&mut self) {
        if self.dirty_since.is_some() {
            self.save();
        }
    }

    fn save(&mut self) {
        // Whatever happens, stop retrying this change every frame.
        self.dirty_since = None;
        let Some(path) = self.path.clone() else {
            return;
        };
        let contents = match toml::to_string_pretty(&self.settings) {
            Ok(contents) => contents,
            Err(err) => {
                log::warn!("failed to serialize settings: {err}");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    log::warn!("failed to create {}: {err}", parent.display());
                    return;
                }
            }
        }
        match fs::write(&path, contents) {
            Ok(()) => log::debug!("saved settings to {}", path.display()),
            Err(err) => log::warn!("failed to save settings to {}: {err}", path.display()),
        }
    }
}
