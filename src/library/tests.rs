use super::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

#[test]
fn classify_matches_known_extensions() {
    assert_eq!(classify(Path::new("/tmp/a.mp3")), FileKind::Audio);
    assert_eq!(classify(Path::new("/tmp/a.wav")), FileKind::Audio);
    assert_eq!(classify(Path::new("/tmp/a.flac")), FileKind::Audio);
    assert_eq!(classify(Path::new("/tmp/a.m3u")), FileKind::Playlist);
    assert_eq!(classify(Path::new("/tmp/a.m3u8")), FileKind::Playlist);
    assert_eq!(classify(Path::new("/tmp/readme.txt")), FileKind::Unknown);
    assert_eq!(classify(Path::new("/tmp/noext")), FileKind::Unknown);
}

#[test]
fn classify_is_case_sensitive() {
    assert_eq!(classify(Path::new("/tmp/a.MP3")), FileKind::Unknown);
    assert_eq!(classify(Path::new("/tmp/a.Flac")), FileKind::Unknown);
    assert_eq!(classify(Path::new("/tmp/a.M3U")), FileKind::Unknown);
}

#[test]
fn load_playlist_skips_comments_and_blank_lines() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("list.m3u");
    fs::write(&file, "# header\n/music/a.mp3\n\n#EXTINF:1,x\n/music/b.mp3\n").unwrap();

    let paths = load_playlist(&file).unwrap();
    assert_eq!(
        paths,
        vec![PathBuf::from("/music/a.mp3"), PathBuf::from("/music/b.mp3")]
    );
}

#[test]
fn load_playlist_missing_file_is_err() {
    let dir = tempdir().unwrap();
    assert!(load_playlist(&dir.path().join("nope.m3u")).is_err());
}

#[test]
fn playlist_round_trips_order_and_text() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("list.m3u");
    let paths = [Path::new("a.mp3"), Path::new("b.mp3")];

    assert!(save_playlist(paths.iter().copied(), &file).unwrap());
    assert_eq!(
        load_playlist(&file).unwrap(),
        vec![PathBuf::from("a.mp3"), PathBuf::from("b.mp3")]
    );
}

#[test]
fn save_playlist_refuses_empty_list_and_keeps_existing_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("list.m3u");
    fs::write(&file, "/music/keep.mp3\n").unwrap();

    let written = save_playlist(std::iter::empty::<&Path>(), &file).unwrap();
    assert!(!written);
    assert_eq!(fs::read_to_string(&file).unwrap(), "/music/keep.mp3\n");
}

#[test]
fn save_playlist_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("nested").join("deep").join("list.m3u");

    assert!(save_playlist([Path::new("a.mp3")].into_iter(), &file).unwrap());
    assert!(file.is_file());
}

#[test]
fn expand_directory_yields_sorted_audio_files() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.mp3"), b"x").unwrap();
    fs::write(dir.path().join("a.flac"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    let files = expand(dir.path());
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a.flac", "b.mp3"]);
}

#[test]
fn expand_passes_plain_files_through() {
    let path = Path::new("/music/a.mp3");
    assert_eq!(expand(path), vec![path.to_path_buf()]);
}

#[test]
fn track_name_is_final_path_component() {
    let track = Track::new(PathBuf::from("/music/album/song.mp3"));
    assert_eq!(track.name, "song.mp3");
    assert_eq!(track.display(), "song.mp3");
    assert_eq!(track.status, TrackStatus::Unprobed);
    assert_eq!(track.duration, std::time::Duration::ZERO);
}

#[test]
fn track_display_prefers_tag_title() {
    let mut track = Track::new(PathBuf::from("/music/song.mp3"));
    track.title = Some("Proper Title".to_string());
    assert_eq!(track.display(), "Proper Title");
}
