use std::path::PathBuf;
use std::time::Duration;

/// Probing result for a track.
///
/// A track starts out `Unprobed`; opening it on an audio source moves it to
/// `Ok` or `Error`. An `Error` track is never resurrected without being
/// pushed again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TrackStatus {
    Unprobed,
    Ok,
    Error,
}

/// One playable item in the tracklist.
#[derive(Debug, Clone)]
pub struct Track {
    pub path: PathBuf,
    /// Final path component, used as the fallback display text.
    pub name: String,
    /// Tag title read during probing, preferred for display when present.
    pub title: Option<String>,
    /// Zero until probing or loading fills it in.
    pub duration: Duration,
    pub status: TrackStatus,
}

impl Track {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            name,
            title: None,
            duration: Duration::ZERO,
            status: TrackStatus::Unprobed,
        }
    }

    /// Text shown in the tracklist and the now-playing header.
    pub fn display(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    pub fn is_playable(&self) -> bool {
        self.status != TrackStatus::Error
    }
}
