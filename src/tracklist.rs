//! Ordered track container with stable element identity.
//!
//! Two movable positions track logical elements, not slots: `active` (the
//! track loaded into the audio source) and `cursor` (the track selected for
//! editing). Both are [`TrackId`] handles that survive insertion, removal
//! and reordering of unrelated entries.

mod model;

pub use model::*;
