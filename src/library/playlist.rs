use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Read a playlist file: one path per line, in file order.
///
/// Blank lines and `#`-prefixed comment lines are skipped. A missing or
/// unreadable file surfaces as the `Err` case; callers treat it as a soft
/// failure.
pub fn load_playlist(path: &Path) -> io::Result<Vec<PathBuf>> {
    let contents = fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(PathBuf::from)
        .collect())
}

/// Write one path per line in list order, creating parent directories as
/// needed.
///
/// An empty list is "nothing to save": returns `Ok(false)` without touching
/// the file, so an existing playlist is never clobbered with emptiness.
pub fn save_playlist<'a, I>(paths: I, path: &Path) -> io::Result<bool>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut contents = String::new();
    for entry in paths {
        contents.push_str(&entry.to_string_lossy());
        contents.push('\n');
    }
    if contents.is_empty() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(true)
}
