//! Audio capability boundary.
//!
//! The orchestrator only ever talks to [`AudioSource`]; the `rodio`-backed
//! implementation lives in `audio::output`. Engine construction is the one
//! unrecoverable failure in the subsystem, everything else is reported per
//! call and absorbed by the caller.

mod output;
mod source;

pub use output::RodioEngine;
pub use source::{AudioEngine, AudioError, AudioSource};
