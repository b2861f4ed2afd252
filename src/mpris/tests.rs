use super::*;
use std::sync::mpsc;

#[test]
fn handle_updates_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let handle = MprisHandle {
        state: state.clone(),
    };

    handle.set_status(PlaybackStatus::Playing);
    handle.set_track(Some("Test Title".to_string()), Some(Duration::from_secs(180)));
    {
        let s = state.lock().unwrap();
        assert_eq!(s.status, PlaybackStatus::Playing);
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.length, Some(Duration::from_secs(180)));
    }

    handle.set_track(None, None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.length, None);
    }
}

#[test]
fn playback_status_maps_state_to_dbus_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().status = PlaybackStatus::Playing;
    assert_eq!(iface.playback_status(), "Playing");

    state.lock().unwrap().status = PlaybackStatus::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_title_and_length_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.length = Some(Duration::from_micros(1_234_567));
    }

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(map.contains_key("mpris:length"));
}

#[test]
fn metadata_omits_length_when_unknown() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(!map.contains_key("mpris:length"));
}
