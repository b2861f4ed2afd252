use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use crate::player::Repeat;

use super::load::{default_config_path, resolve_config_path};
use super::schema::Settings;
use super::store::ConfigStore;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_quaver_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("QUAVER_CONFIG_PATH", "/tmp/quaver-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/quaver-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/xdg-config-home")
            .join("quaver")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("quaver")
            .join("config.toml")
    );
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
volume = 40
balance = -0.5
repeat = "all"
autosave = false
autosave_path = "lists/current.m3u"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("QUAVER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("QUAVER__VOLUME");

    let s = Settings::load().unwrap();
    assert_eq!(s.volume, 40);
    assert!((s.balance + 0.5).abs() < f32::EPSILON);
    assert_eq!(s.repeat, Repeat::All);
    assert!(!s.autosave);
    assert_eq!(s.autosave_path, PathBuf::from("lists/current.m3u"));
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(&cfg_path, "volume = 40\n").unwrap();

    let _g1 = EnvGuard::set("QUAVER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("QUAVER__VOLUME", "70");

    let s = Settings::load().unwrap();
    assert_eq!(s.volume, 70);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    assert!(s.validate().is_ok());

    s.volume = 150;
    assert!(s.validate().is_err());

    s = Settings {
        balance: 1.5,
        ..Settings::default()
    };
    assert!(s.validate().is_err());

    s = Settings {
        autosave_path: PathBuf::new(),
        ..Settings::default()
    };
    assert!(s.validate().is_err());
}

#[test]
fn store_round_trips_changed_settings() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");

    let mut store = ConfigStore::with_path(Some(cfg_path.clone()), Settings::default());
    store.set_volume(40);
    store.set_repeat(Repeat::One);
    store.flush();

    let contents = std::fs::read_to_string(&cfg_path).unwrap();
    let reloaded: Settings = toml::from_str(&contents).unwrap();
    assert_eq!(reloaded.volume, 40);
    assert_eq!(reloaded.repeat, Repeat::One);
    assert!((reloaded.balance).abs() < f32::EPSILON);
}

#[test]
fn store_ignores_unchanged_values() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");

    let mut store = ConfigStore::with_path(Some(cfg_path.clone()), Settings::default());
    store.set_volume(100);
    store.set_repeat(Repeat::None);
    // Below the balance epsilon.
    store.set_balance(0.005);
    store.flush();

    assert!(!cfg_path.exists());
}

#[test]
fn store_debounces_saves() {
    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");

    let mut store = ConfigStore::with_path(Some(cfg_path.clone()), Settings::default());
    store.set_volume(30);

    store.update();
    assert!(!cfg_path.exists());

    std::thread::sleep(Duration::from_millis(1100));
    store.update();
    assert!(cfg_path.exists());
}

#[test]
fn relative_autosave_path_lives_next_to_the_config_file() {
    let store = ConfigStore::with_path(
        Some(PathBuf::from("/home/u/.config/quaver/config.toml")),
        Settings::default(),
    );
    assert_eq!(
        store.autosave_path(),
        Some(PathBuf::from("/home/u/.config/quaver/quaver.m3u"))
    );
}

#[test]
fn autosave_path_is_none_when_autosave_is_off() {
    let store = ConfigStore::with_path(
        None,
        Settings {
            autosave: false,
            ..Settings::default()
        },
    );
    assert_eq!(store.autosave_path(), None);
}
