use std::path::Path;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable output device / stream. Fatal at startup.
    #[error("failed to open audio output: {0}")]
    Output(#[from] rodio::StreamError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}

/// Creates playback sources. Construction failure aborts startup; this is
/// the one unrecoverable error in the subsystem.
pub trait AudioEngine {
    fn create_source(&self) -> Box<dyn AudioSource>;
}

/// One playback slot: holds at most one opened file.
///
/// Probing reuses `open` + `duration` + `close` on a throwaway source.
/// Methods other than `open` never fail; on an unbound source they are
/// no-ops with zero/false results.
pub trait AudioSource {
    fn open(&mut self, path: &Path) -> Result<(), AudioError>;
    fn close(&mut self);
    fn is_bound(&self) -> bool;

    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
    /// True once the opened file has played to completion. A looping source
    /// restarts itself instead of reporting the end.
    fn at_end(&mut self) -> bool;

    fn cursor(&self) -> Duration;
    fn set_cursor(&mut self, position: Duration);
    fn duration(&self) -> Duration;

    fn gain(&self) -> f32;
    fn set_gain(&mut self, gain: f32);
    fn pan(&self) -> f32;
    fn set_pan(&mut self, pan: f32);
    fn set_looping(&mut self, looping: bool);
}
