//! Playback orchestrator.
//!
//! [`Player`] is the single owner of the tracklist and the audio source;
//! the UI, the event loop and the MPRIS bridge all go through it. Load
//! failures are absorbed here: a track that fails to open is flagged and
//! the advancement loops walk past it.

mod model;

pub use model::*;
