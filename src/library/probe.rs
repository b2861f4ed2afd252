use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;
use lofty::probe::Probe;

/// Read the tag title from a file, if it has one.
pub fn tag_title(path: &Path) -> Option<String> {
    let tagged = Probe::open(path).and_then(|p| p.read()).ok()?;
    let tag = tagged.primary_tag().or_else(|| tagged.first_tag())?;
    tag.title()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Duration fallback for containers whose decoder cannot report one.
pub fn tag_duration(path: &Path) -> Option<Duration> {
    let tagged = Probe::open(path).and_then(|p| p.read()).ok()?;
    Some(tagged.properties().duration())
}
