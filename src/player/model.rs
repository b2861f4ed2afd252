use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioEngine, AudioSource};
use crate::library::{self, TrackStatus};
use crate::tracklist::{TrackId, Tracklist};

/// Restarting the current track instead of jumping to the previous one
/// happens past this playback position.
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

const BALANCE_STEP: f32 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    #[default]
    None,
    One,
    All,
}

impl Repeat {
    pub fn cycle(self) -> Self {
        match self {
            Self::None => Self::One,
            Self::One => Self::All,
            Self::All => Self::None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::None => "off",
            Self::One => "one",
            Self::All => "all",
        }
    }
}

/// Direction of a stepped adjustment (seek, volume, balance).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Polarity {
    Up,
    Down,
}

/// Modifier held during a stepped adjustment; selects the step size.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum InputModifier {
    #[default]
    None,
    Shift,
    Alt,
    Ctrl,
}

impl InputModifier {
    fn seek_step(self) -> Duration {
        Duration::from_secs(match self {
            Self::Shift => 3,
            Self::None => 5,
            Self::Alt => 10,
            Self::Ctrl => 30,
        })
    }

    fn volume_step(self) -> i64 {
        match self {
            Self::Shift => 2,
            Self::None => 5,
            Self::Alt => 10,
            Self::Ctrl => 20,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
}

impl PlaybackStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

pub struct Player {
    tracklist: Tracklist,
    source: Box<dyn AudioSource>,
    /// Throwaway source used only to validate freshly pushed tracks.
    checker: Box<dyn AudioSource>,
    repeat: Repeat,
    /// Whether playback was running at the end of the previous tick; an
    /// `at_end` source only triggers advancement when it was.
    was_playing: bool,
}

impl Player {
    pub fn new(engine: &dyn AudioEngine) -> Self {
        Self {
            tracklist: Tracklist::new(),
            source: engine.create_source(),
            checker: engine.create_source(),
            repeat: Repeat::default(),
            was_playing: false,
        }
    }

    pub fn tracklist(&self) -> &Tracklist {
        &self.tracklist
    }

    pub fn status(&self) -> PlaybackStatus {
        if self.source.is_playing() {
            PlaybackStatus::Playing
        } else if self.source.is_bound() {
            PlaybackStatus::Paused
        } else {
            PlaybackStatus::Stopped
        }
    }

    pub fn active_title(&self) -> Option<&str> {
        self.tracklist.active().map(|track| track.display())
    }

    pub fn position(&self) -> Duration {
        self.source.cursor()
    }

    pub fn duration(&self) -> Duration {
        self.source.duration()
    }

    /// Load the track behind `id` into the playing source. A failed open
    /// flags the track as broken so the advancement loops never retry it.
    fn load(&mut self, id: TrackId) -> bool {
        let Some(track) = self.tracklist.get(id) else {
            return false;
        };
        if !track.is_playable() {
            return false;
        }
        let path = track.path.clone();
        match self.source.open(&path) {
            Ok(()) => {
                let duration = self.source.duration();
                if let Some(track) = self.tracklist.get_mut(id) {
                    track.status = TrackStatus::Ok;
                    track.duration = duration;
                }
                self.source.set_looping(self.repeat == Repeat::One);
                true
            }
            Err(err) => {
                log::warn!("{err}");
                if let Some(track) = self.tracklist.get_mut(id) {
                    track.status = TrackStatus::Error;
                }
                false
            }
        }
    }

    /// Step the active position with `step` until a track loads. Bounded:
    /// every failed load shrinks the set of playable tracks.
    fn cycle_until_loaded(&mut self, step: fn(&mut Tracklist) -> Option<TrackId>) -> bool {
        while self.tracklist.has_playable_track() {
            let Some(id) = step(&mut self.tracklist) else {
                return false;
            };
            if self.load(id) {
                return true;
            }
        }
        false
    }

    fn stop_unloaded(&mut self) {
        self.source.close();
        self.tracklist.reset_active();
        self.was_playing = false;
    }

    /// End-of-track advancement. Walks forward while a next track is
    /// admissible (always, under `Repeat::All`) and something playable
    /// remains; otherwise playback stops and no track stays active.
    pub fn advance(&mut self) {
        while (self.repeat == Repeat::All || self.tracklist.has_next_track())
            && self.tracklist.has_playable_track()
        {
            let Some(id) = self.tracklist.cycle_next() else {
                break;
            };
            if self.load(id) {
                self.source.play();
                self.was_playing = true;
                return;
            }
        }
        self.stop_unloaded();
    }

    /// User-initiated skip; wraps regardless of the repeat mode and only
    /// resumes playback if it was running.
    pub fn skip_next(&mut self) {
        let was_playing = self.source.is_playing();
        if self.cycle_until_loaded(Tracklist::cycle_next) {
            if was_playing {
                self.source.play();
            }
            self.was_playing = self.source.is_playing();
        } else {
            self.stop_unloaded();
        }
    }

    /// Early in a track this jumps to the previous one; past the restart
    /// threshold it rewinds the current track instead.
    pub fn skip_prev(&mut self) {
        if self.source.is_playing() && self.source.cursor() > RESTART_THRESHOLD {
            self.source.set_cursor(Duration::ZERO);
            return;
        }
        let was_playing = self.source.is_playing();
        if self.cycle_until_loaded(Tracklist::cycle_prev) {
            if was_playing {
                self.source.play();
            }
            self.was_playing = self.source.is_playing();
        } else {
            self.stop_unloaded();
        }
    }

    pub fn toggle_playback(&mut self) {
        if self.source.is_playing() {
            self.source.pause();
        } else {
            if !self.source.is_bound() {
                if !self.tracklist.has_next_track() {
                    return;
                }
                self.skip_next();
            }
            self.source.play();
        }
        self.was_playing = self.source.is_playing();
    }

    pub fn play(&mut self) {
        if !self.source.is_playing() {
            self.toggle_playback();
        }
    }

    pub fn pause(&mut self) {
        self.source.pause();
        self.was_playing = false;
    }

    /// MPRIS Stop: rewind and pause, but keep the track loaded.
    pub fn stop(&mut self) {
        if self.source.is_bound() {
            self.source.pause();
            self.source.set_cursor(Duration::ZERO);
        }
        self.was_playing = false;
    }

    /// Once per frame: advance past a finished track. A source in
    /// `Repeat::One` mode loops natively and never reports the end.
    pub fn tick(&mut self) {
        if self.was_playing && self.source.at_end() {
            self.advance();
        }
        self.was_playing = self.source.is_playing();
    }

    /// Activate and play the cursor track; failure leaves nothing active.
    pub fn play_cursor(&mut self) {
        let Some(id) = self.tracklist.activate_cursor() else {
            return;
        };
        if self.load(id) {
            self.source.play();
            self.was_playing = true;
        } else {
            self.stop_unloaded();
        }
    }

    pub fn seek(&mut self, polarity: Polarity, modifier: InputModifier) {
        if !self.source.is_bound() {
            return;
        }
        let step = modifier.seek_step();
        let cursor = self.source.cursor();
        let target = match polarity {
            Polarity::Up => cursor.saturating_add(step),
            Polarity::Down => cursor.saturating_sub(step),
        };
        self.source.set_cursor(target);
    }

    pub fn volume(&self) -> i64 {
        (self.source.gain() * 100.0).round() as i64
    }

    pub fn set_volume(&mut self, volume: i64) {
        self.source.set_gain(volume.clamp(0, 100) as f32 / 100.0);
    }

    pub fn adjust_volume(&mut self, polarity: Polarity, modifier: InputModifier) {
        let step = modifier.volume_step();
        let delta = match polarity {
            Polarity::Up => step,
            Polarity::Down => -step,
        };
        self.set_volume(self.volume() + delta);
    }

    pub fn balance(&self) -> f32 {
        self.source.pan()
    }

    pub fn set_balance(&mut self, balance: f32) {
        self.source.set_pan(balance.clamp(-1.0, 1.0));
    }

    pub fn adjust_balance(&mut self, polarity: Polarity) {
        let delta = match polarity {
            Polarity::Up => BALANCE_STEP,
            Polarity::Down => -BALANCE_STEP,
        };
        self.set_balance(self.balance() + delta);
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.repeat = repeat;
        self.source.set_looping(repeat == Repeat::One);
    }

    pub fn toggle_repeat(&mut self) {
        self.set_repeat(self.repeat.cycle());
    }

    /// Batch import. Each path is pushed independently; a rejected path is
    /// logged and the rest of the batch still goes in. Playback starts
    /// automatically only when the list was empty beforehand.
    pub fn push_paths<I>(&mut self, paths: I)
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let was_empty = self.tracklist.is_empty();
        for path in paths {
            let path = path.as_ref();
            if !self.tracklist.push(path) {
                log::warn!("not a track or playlist: {}", path.display());
            }
        }
        self.probe_new();
        if was_empty && !self.tracklist.is_empty() {
            self.advance();
        }
    }

    /// Load a persisted playlist without starting playback. A missing file
    /// is the normal first-run case, not an error.
    pub fn restore_playlist(&mut self, path: &Path) {
        if self.tracklist.push(path) {
            self.probe_new();
        } else {
            log::info!("no playlist restored from {}", path.display());
        }
    }

    /// Open every unprobed track on the checker source to validate it and
    /// learn its duration, then read the tag title.
    fn probe_new(&mut self) {
        let pending: Vec<TrackId> = self
            .tracklist
            .iter()
            .filter(|(_, track)| track.status == TrackStatus::Unprobed)
            .map(|(id, _)| id)
            .collect();
        for id in pending {
            let Some(track) = self.tracklist.get(id) else {
                continue;
            };
            let path = track.path.clone();
            let (status, duration) = match self.checker.open(&path) {
                Ok(()) => {
                    let duration = self.checker.duration();
                    self.checker.close();
                    (TrackStatus::Ok, duration)
                }
                Err(err) => {
                    log::warn!("{err}");
                    (TrackStatus::Error, Duration::ZERO)
                }
            };
            let title = if status == TrackStatus::Ok {
                library::tag_title(&path)
            } else {
                None
            };
            if let Some(track) = self.tracklist.get_mut(id) {
                track.status = status;
                track.duration = duration;
                track.title = title;
            }
        }
    }

    pub fn remove_cursor(&mut self) {
        if let Some(removal) = self.tracklist.remove_cursor() {
            if removal.unload_active {
                self.source.close();
                self.was_playing = false;
            }
            log::info!("removed {}", removal.track.display());
        }
    }

    pub fn select_next(&mut self) {
        self.tracklist.select_next();
    }

    pub fn select_prev(&mut self) {
        self.tracklist.select_prev();
    }

    pub fn move_cursor_up(&mut self) -> bool {
        self.tracklist.move_cursor_up()
    }

    pub fn move_cursor_down(&mut self) -> bool {
        self.tracklist.move_cursor_down()
    }

    pub fn save_playlist(&self, path: &Path) -> bool {
        self.tracklist.save_as_playlist(path)
    }
}
