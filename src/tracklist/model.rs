use std::path::Path;

use crate::library::{self, FileKind, Track};

/// Opaque handle to a tracklist entry.
///
/// Ids are handed out monotonically and never reused, so a stale handle can
/// never alias a different track. They travel with their track through
/// swaps, which is what keeps `active` and `cursor` pointing at the same
/// logical element across mutation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(u64);

struct Entry {
    id: TrackId,
    track: Track,
}

/// Result of removing the cursor track.
pub struct Removal {
    pub track: Track,
    /// True when the removed track was the active one; the caller must
    /// unload the audio source.
    pub unload_active: bool,
}

/// The ordered collection of tracks plus the `active` and `cursor`
/// positions.
#[derive(Default)]
pub struct Tracklist {
    entries: Vec<Entry>,
    next_id: u64,
    active: Option<TrackId>,
    cursor: Option<TrackId>,
}

impl Tracklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TrackId, &Track)> {
        self.entries.iter().map(|entry| (entry.id, &entry.track))
    }

    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.track)
    }

    pub fn get_mut(&mut self, id: TrackId) -> Option<&mut Track> {
        self.entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .map(|entry| &mut entry.track)
    }

    pub fn index_of(&self, id: TrackId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<TrackId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    pub fn active_id(&self) -> Option<TrackId> {
        self.active
    }

    pub fn active(&self) -> Option<&Track> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn cursor_id(&self) -> Option<TrackId> {
        self.cursor
    }

    pub fn set_cursor(&mut self, id: TrackId) {
        if self.index_of(id).is_some() {
            self.cursor = Some(id);
        }
    }

    /// Move the cursor one entry down (toward the end) without wrapping.
    pub fn select_next(&mut self) {
        let next = match self.cursor.and_then(|id| self.index_of(id)) {
            Some(index) => (index + 1).min(self.entries.len().saturating_sub(1)),
            None => 0,
        };
        self.cursor = self.id_at(next);
    }

    /// Move the cursor one entry up (toward the start) without wrapping.
    pub fn select_prev(&mut self) {
        let prev = match self.cursor.and_then(|id| self.index_of(id)) {
            Some(index) => index.saturating_sub(1),
            None => 0,
        };
        self.cursor = self.id_at(prev);
    }

    /// True iff at least one track is not in the `Error` state.
    pub fn has_playable_track(&self) -> bool {
        self.entries.iter().any(|entry| entry.track.is_playable())
    }

    /// True if a track exists after `active` in forward order, or if nothing
    /// is active yet and the list is non-empty.
    pub fn has_next_track(&self) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        match self.active.and_then(|id| self.index_of(id)) {
            Some(index) => index + 1 < self.entries.len(),
            None => true,
        }
    }

    /// Accept a music, playlist or directory path.
    ///
    /// Music paths are appended as one `Unprobed` track. Playlist paths are
    /// expanded through the codec and every listed path is appended as a
    /// track (one level of expansion, sub-entries are not re-validated).
    /// Directories are walked recursively for audio files. Anything else is
    /// rejected and the list is left untouched.
    pub fn push(&mut self, path: &Path) -> bool {
        if path.is_dir() {
            let files = library::expand(path);
            if files.is_empty() {
                return false;
            }
            for file in &files {
                self.append(file);
            }
            return true;
        }
        match library::classify(path) {
            FileKind::Audio => {
                self.append(path);
                true
            }
            FileKind::Playlist => self.append_playlist(path),
            FileKind::Unknown => false,
        }
    }

    fn append_playlist(&mut self, path: &Path) -> bool {
        match library::load_playlist(path) {
            Ok(paths) => {
                for entry in &paths {
                    self.append(entry);
                }
                true
            }
            Err(err) => {
                log::warn!("failed to read playlist {}: {err}", path.display());
                false
            }
        }
    }

    fn append(&mut self, path: &Path) {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        self.next_id += 1;
        let id = TrackId(self.next_id);
        self.entries.push(Entry {
            id,
            track: Track::new(absolute),
        });
        if self.cursor.is_none() {
            self.cursor = Some(id);
        }
    }

    /// Remove the cursor track.
    ///
    /// The cursor advances to the following entry, or goes empty when the
    /// removed element was last. Removing the active track clears `active`
    /// and reports `unload_active` so the caller unloads the source.
    pub fn remove_cursor(&mut self) -> Option<Removal> {
        let cursor = self.cursor?;
        let index = self.index_of(cursor)?;
        let unload_active = self.active == Some(cursor);
        if unload_active {
            self.active = None;
        }
        let entry = self.entries.remove(index);
        self.cursor = self.id_at(index);
        Some(Removal {
            track: entry.track,
            unload_active,
        })
    }

    /// Swap the cursor track with its predecessor. The cursor handle travels
    /// with the track, as does `active` if it pointed at either slot.
    pub fn move_cursor_up(&mut self) -> bool {
        let Some(index) = self.cursor.and_then(|id| self.index_of(id)) else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.entries.swap(index - 1, index);
        true
    }

    /// Swap the cursor track with its successor.
    pub fn move_cursor_down(&mut self) -> bool {
        let Some(index) = self.cursor.and_then(|id| self.index_of(id)) else {
            return false;
        };
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Activate the track after the active one, wrapping to the first when
    /// the active track is last or nothing is active. `None` only when the
    /// list is empty.
    pub fn cycle_next(&mut self) -> Option<TrackId> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.active.and_then(|id| self.index_of(id)) {
            Some(index) if index + 1 < self.entries.len() => index + 1,
            _ => 0,
        };
        let id = self.entries[next].id;
        self.active = Some(id);
        Some(id)
    }

    /// Activate the track before the active one, wrapping to the last when
    /// the active track is first or nothing is active.
    pub fn cycle_prev(&mut self) -> Option<TrackId> {
        if self.entries.is_empty() {
            return None;
        }
        let prev = match self.active.and_then(|id| self.index_of(id)) {
            Some(index) if index > 0 => index - 1,
            _ => self.entries.len() - 1,
        };
        let id = self.entries[prev].id;
        self.active = Some(id);
        Some(id)
    }

    /// Make the cursor track the active one (play-this-track gesture).
    pub fn activate_cursor(&mut self) -> Option<TrackId> {
        self.active = self.cursor;
        self.active
    }

    pub fn reset_active(&mut self) {
        self.active = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.active = None;
        self.cursor = None;
    }

    /// Write the current paths to a playlist file. False for an empty list
    /// or empty path, or when the write fails.
    pub fn save_as_playlist(&self, path: &Path) -> bool {
        if self.entries.is_empty() || path.as_os_str().is_empty() {
            return false;
        }
        let paths = self.entries.iter().map(|entry| entry.track.path.as_path());
        match library::save_playlist(paths, path) {
            Ok(written) => written,
            Err(err) => {
                log::warn!("failed to write playlist {}: {err}", path.display());
                false
            }
        }
    }
}
