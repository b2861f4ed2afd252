use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions accepted as audio. The match is case-sensitive: persisted
/// playlists have always carried lowercase extensions.
const AUDIO_EXTENSIONS: [&str; 3] = ["wav", "mp3", "flac"];
const PLAYLIST_EXTENSIONS: [&str; 2] = ["m3u", "m3u8"];

/// How a dropped/imported path is treated.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FileKind {
    Audio,
    Playlist,
    Unknown,
}

pub fn classify(path: &Path) -> FileKind {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return FileKind::Unknown;
    };
    if AUDIO_EXTENSIONS.contains(&extension) {
        FileKind::Audio
    } else if PLAYLIST_EXTENSIONS.contains(&extension) {
        FileKind::Playlist
    } else {
        FileKind::Unknown
    }
}

/// Expand an imported path into pushable files.
///
/// A directory yields its audio files in file-name order; anything else
/// passes through unchanged and is validated by `Tracklist::push`.
pub fn expand(path: &Path) -> Vec<PathBuf> {
    if !path.is_dir() {
        return vec![path.to_path_buf()];
    }

    WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file() && classify(entry.path()) == FileKind::Audio)
        .map(|entry| entry.path().to_path_buf())
        .collect()
}
