use std::{env, path::PathBuf};

use super::schema::Settings;

impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("QUAVER")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=100).contains(&self.volume) {
            return Err(format!("volume must be 0-100, got {}", self.volume));
        }
        if !(-1.0..=1.0).contains(&self.balance) {
            return Err(format!("balance must be -1.0..1.0, got {}", self.balance));
        }
        if self.autosave && self.autosave_path.as_os_str().is_empty() {
            return Err("autosave_path must not be empty when autosave is on".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `QUAVER_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("QUAVER_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/quaver/config.toml`
/// or `~/.config/quaver/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("quaver").join("config.toml"))
}
