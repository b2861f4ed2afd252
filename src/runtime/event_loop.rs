use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config::ConfigStore;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::player::{InputModifier, PlaybackStatus, Player, Polarity};
use crate::ui;

enum PromptKind {
    AddPaths,
    SavePlaylist,
}

/// One-line text input opened by `a` (add paths) and `s` (save playlist).
struct Prompt {
    kind: PromptKind,
    buffer: String,
}

impl Prompt {
    fn title(&self) -> &'static str {
        match self.kind {
            PromptKind::AddPaths => "add paths",
            PromptKind::SavePlaylist => "save playlist as",
        }
    }
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    prompt: Option<Prompt>,
    /// Last playback state emitted to MPRIS.
    last_status: PlaybackStatus,
    /// Last track title emitted to MPRIS.
    last_title: Option<String>,
}

impl EventLoopState {
    pub fn new() -> Self {
        Self {
            prompt: None,
            last_status: PlaybackStatus::Stopped,
            last_title: None,
        }
    }
}

/// Main terminal event loop: advances playback, syncs config and MPRIS,
/// draws, and handles input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    player: &mut Player,
    config: &mut ConfigStore,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        player.tick();

        // Mirror live playback values into the config store; its setters
        // are change-detecting, so feeding them every frame is cheap.
        config.set_volume(player.volume());
        config.set_balance(player.balance());
        config.set_repeat(player.repeat());
        config.update();

        sync_mpris(player, mpris, state);

        let prompt = state
            .prompt
            .as_ref()
            .map(|p| (p.title(), p.buffer.as_str()));
        terminal.draw(|f| ui::draw(f, player, prompt))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, player) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, player, state) {
                    return Ok(());
                }
            }
        }
    }
}

/// Push playback changes to the MPRIS thread only when something moved.
fn sync_mpris(player: &Player, mpris: &MprisHandle, state: &mut EventLoopState) {
    let status = player.status();
    let title = player.active_title().map(str::to_string);
    if status != state.last_status || title != state.last_title {
        mpris.set_status(status);
        let length = player
            .tracklist()
            .active()
            .map(|t| t.duration)
            .filter(|d| *d > Duration::ZERO);
        mpris.set_track(title.clone(), length);
        state.last_status = status;
        state.last_title = title;
    }
}

fn handle_control_cmd(cmd: ControlCmd, player: &mut Player) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => player.play(),
        ControlCmd::Pause => player.pause(),
        ControlCmd::PlayPause => player.toggle_playback(),
        ControlCmd::Stop => player.stop(),
        ControlCmd::Next => player.skip_next(),
        ControlCmd::Prev => player.skip_prev(),
    }
    false
}

fn modifier_of(modifiers: KeyModifiers) -> InputModifier {
    if modifiers.contains(KeyModifiers::CONTROL) {
        InputModifier::Ctrl
    } else if modifiers.contains(KeyModifiers::ALT) {
        InputModifier::Alt
    } else if modifiers.contains(KeyModifiers::SHIFT) {
        InputModifier::Shift
    } else {
        InputModifier::None
    }
}

fn confirm_prompt(prompt: Prompt, player: &mut Player) {
    let input = prompt.buffer.trim();
    if input.is_empty() {
        return;
    }
    match prompt.kind {
        PromptKind::AddPaths => {
            // Whitespace-separated so a shell-style multi-path paste works.
            let paths: Vec<PathBuf> = input.split_whitespace().map(PathBuf::from).collect();
            player.push_paths(paths);
        }
        PromptKind::SavePlaylist => {
            if !player.save_playlist(Path::new(input)) {
                log::warn!("nothing saved to {input}");
            }
        }
    }
}

fn handle_key_event(key: KeyEvent, player: &mut Player, state: &mut EventLoopState) -> bool {
    if state.prompt.is_some() {
        match key.code {
            KeyCode::Esc => state.prompt = None,
            KeyCode::Enter => {
                if let Some(prompt) = state.prompt.take() {
                    confirm_prompt(prompt, player);
                }
            }
            KeyCode::Backspace => {
                if let Some(prompt) = state.prompt.as_mut() {
                    prompt.buffer.pop();
                }
            }
            KeyCode::Char(c) if !c.is_control() => {
                if let Some(prompt) = state.prompt.as_mut() {
                    prompt.buffer.push(c);
                }
            }
            _ => {}
        }
        return false;
    }

    let modifier = modifier_of(key.modifiers);
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => player.select_next(),
        KeyCode::Char('k') | KeyCode::Up => player.select_prev(),
        KeyCode::Char('J') => {
            player.move_cursor_down();
        }
        KeyCode::Char('K') => {
            player.move_cursor_up();
        }
        KeyCode::Char('x') => player.remove_cursor(),
        KeyCode::Enter => player.play_cursor(),
        KeyCode::Char(' ') | KeyCode::Char('p') => player.toggle_playback(),
        KeyCode::Char('h') => player.skip_prev(),
        KeyCode::Char('l') => player.skip_next(),
        KeyCode::Left => player.seek(Polarity::Down, modifier),
        KeyCode::Right => player.seek(Polarity::Up, modifier),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            player.adjust_volume(Polarity::Up, modifier);
        }
        KeyCode::Char('-') | KeyCode::Char('_') => {
            player.adjust_volume(Polarity::Down, modifier);
        }
        KeyCode::Char('[') => player.adjust_balance(Polarity::Down),
        KeyCode::Char(']') => player.adjust_balance(Polarity::Up),
        KeyCode::Char('r') => player.toggle_repeat(),
        KeyCode::Char('a') => {
            state.prompt = Some(Prompt {
                kind: PromptKind::AddPaths,
                buffer: String::new(),
            });
        }
        KeyCode::Char('s') => {
            state.prompt = Some(Prompt {
                kind: PromptKind::SavePlaylist,
                buffer: String::new(),
            });
        }
        _ => {}
    }

    false
}
