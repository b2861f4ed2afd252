//! Configuration schema, loader and persistent store.
//!
//! Settings are read once at startup (environment over file over
//! defaults) and written back debounced while the player runs, so a held
//! volume key does not hammer the disk.

mod load;
mod schema;
mod store;

pub use load::{default_config_path, resolve_config_path};
pub use schema::Settings;
pub use store::ConfigStore;

#[cfg(test)]
mod tests;
