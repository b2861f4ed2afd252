//! Track model, playlist codec and import helpers.
//!
//! A [`Track`] describes one playable item and its probing result. The
//! playlist codec reads and writes the newline-delimited path-list format
//! used both for persisted playlists and for batch imports.

mod import;
mod model;
mod playlist;
mod probe;

pub use import::{FileKind, classify, expand};
pub use model::{Track, TrackStatus};
pub use playlist::{load_playlist, save_playlist};
pub use probe::{tag_duration, tag_title};

#[cfg(test)]
mod tests;
