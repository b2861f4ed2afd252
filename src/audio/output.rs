//! `rodio`-backed implementation of the audio capability.
//!
//! Seeking rebuilds the sink with `skip_duration` into the file; even a
//! mid-track balance change reuses that primitive, since a playing sink
//! cannot be re-panned in place.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use rodio::source::ChannelVolume;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use crate::library;

use super::source::{AudioEngine, AudioError, AudioSource};

pub struct RodioEngine {
    stream: Arc<OutputStream>,
}

impl RodioEngine {
    pub fn new() -> Result<Self, AudioError> {
        let mut stream = OutputStreamBuilder::open_default_stream()?;
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        stream.log_on_drop(false);
        Ok(Self {
            stream: Arc::new(stream),
        })
    }
}

impl AudioEngine for RodioEngine {
    fn create_source(&self) -> Box<dyn AudioSource> {
        Box::new(RodioSource::new(self.stream.clone()))
    }
}

/// Per-channel gains for a balance value in -1.0..1.0.
fn pan_gains(pan: f32) -> [f32; 2] {
    [1.0 - pan.max(0.0), 1.0 + pan.min(0.0)]
}

struct RodioSource {
    stream: Arc<OutputStream>,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Duration,
    /// Position where the current sink started; `Sink::get_pos` counts from
    /// the skip point, not the start of the file.
    base: Duration,
    gain: f32,
    pan: f32,
    looping: bool,
    paused: bool,
}

impl RodioSource {
    fn new(stream: Arc<OutputStream>) -> Self {
        Self {
            stream,
            sink: None,
            path: None,
            duration: Duration::ZERO,
            base: Duration::ZERO,
            gain: 1.0,
            pan: 0.0,
            looping: false,
            paused: true,
        }
    }

    /// Decode `path` into a paused sink starting at `start`.
    fn build_sink(&self, path: &Path, start: Duration) -> Result<(Sink, Duration), AudioError> {
        let file = File::open(path).map_err(|source| AudioError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|source| AudioError::Decode {
            path: path.display().to_string(),
            source,
        })?;
        // Some containers (notably mp3) cannot report a total duration from
        // the decoder; fall back to the tag properties.
        let duration = decoder
            .total_duration()
            .or_else(|| library::tag_duration(path))
            .unwrap_or_default();

        let sink = Sink::connect_new(self.stream.mixer());
        sink.set_volume(self.gain);
        if self.pan == 0.0 {
            sink.append(decoder.skip_duration(start));
        } else {
            sink.append(ChannelVolume::new(
                decoder.skip_duration(start),
                pan_gains(self.pan).to_vec(),
            ));
        }
        sink.pause();
        Ok((sink, duration))
    }
}

impl AudioSource for RodioSource {
    fn open(&mut self, path: &Path) -> Result<(), AudioError> {
        let (sink, duration) = self.build_sink(path, Duration::ZERO)?;
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.duration = duration;
        self.base = Duration::ZERO;
        self.paused = true;
        Ok(())
    }

    fn close(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.duration = Duration::ZERO;
        self.base = Duration::ZERO;
        self.paused = true;
    }

    fn is_bound(&self) -> bool {
        self.sink.is_some()
    }

    fn play(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
            self.paused = false;
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            self.paused = true;
        }
    }

    fn is_playing(&self) -> bool {
        match &self.sink {
            Some(sink) => !self.paused && !sink.empty(),
            None => false,
        }
    }

    fn at_end(&mut self) -> bool {
        let Some(sink) = &self.sink else {
            return false;
        };
        if !sink.empty() {
            return false;
        }
        if self.looping && !self.paused {
            // Native repeat-one: restart instead of reporting the end.
            if let Some(path) = self.path.clone() {
                match self.build_sink(&path, Duration::ZERO) {
                    Ok((sink, duration)) => {
                        sink.play();
                        self.sink = Some(sink);
                        self.duration = duration;
                        self.base = Duration::ZERO;
                        return false;
                    }
                    Err(err) => log::warn!("failed to loop {}: {err}", path.display()),
                }
            }
        }
        true
    }

    fn cursor(&self) -> Duration {
        match &self.sink {
            Some(sink) => self.base + sink.get_pos(),
            None => Duration::ZERO,
        }
    }

    fn set_cursor(&mut self, position: Duration) {
        let Some(path) = self.path.clone() else {
            return;
        };
        let position = if self.duration > Duration::ZERO {
            position.min(self.duration)
        } else {
            position
        };
        let was_playing = self.is_playing();
        match self.build_sink(&path, position) {
            Ok((sink, _)) => {
                if let Some(old) = self.sink.take() {
                    old.stop();
                }
                if was_playing {
                    sink.play();
                }
                self.sink = Some(sink);
                self.base = position;
            }
            Err(err) => log::warn!("failed to seek {}: {err}", path.display()),
        }
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn gain(&self) -> f32 {
        self.gain
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.gain);
        }
    }

    fn pan(&self) -> f32 {
        self.pan
    }

    fn set_pan(&mut self, pan: f32) {
        let pan = pan.clamp(-1.0, 1.0);
        if pan == self.pan {
            return;
        }
        self.pan = pan;
        if self.is_bound() {
            // Rebuild at the current position to apply the new channel gains.
            self.set_cursor(self.cursor());
        }
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }
}
