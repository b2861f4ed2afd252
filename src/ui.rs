//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::library::TrackStatus;
use crate::player::Player;

const CONTROLS_TEXT: &str = "[j/k] cursor | [J/K] move track | [enter] play | [space/p] play/pause | \
     [h/l] prev/next | [←/→] seek | [+/-] volume | [[/]] balance | [r] repeat | \
     [a] add | [s] save | [x] remove | [q] quit";

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the entire UI into the provided `frame` from the player state.
/// `prompt` is a `(title, input)` pair when a one-line input is open.
pub fn draw(frame: &mut Frame, player: &Player, prompt: Option<(&str, &str)>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header: status and the now-playing title.
    let header_text = match player.active_title() {
        Some(title) => format!("{}: {}", player.status().label(), title),
        None => player.status().label().to_string(),
    };
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" quaver ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Seek bar with elapsed/total label; levels live in the block title.
    {
        let position = player.position();
        let duration = player.duration();
        let ratio = if duration > Duration::ZERO {
            (position.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let label = if duration > Duration::ZERO {
            format!("{} / {}", format_mmss(position), format_mmss(duration))
        } else {
            format_mmss(position)
        };
        let info = format!(
            " vol {:3}% | bal {:+.1} | repeat {} ",
            player.volume(),
            player.balance(),
            player.repeat().label()
        );
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(info))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio)
            .label(label);
        frame.render_widget(gauge, chunks[1]);
    }

    // Tracklist. Center the cursor when possible by rendering only a
    // visible window (avoid allocating items for the entire list).
    {
        let tracklist = player.tracklist();
        let active = tracklist.active_id();
        let total = tracklist.len();
        let list_height = chunks[2].height.saturating_sub(2) as usize;
        let sel_pos = tracklist
            .cursor_id()
            .and_then(|id| tracklist.index_of(id))
            .unwrap_or(0);
        let (start, end, selected_pos_in_visible) = if total <= list_height || list_height == 0 {
            (0, total, sel_pos)
        } else {
            let half = list_height / 2;
            let mut start = if sel_pos > half { sel_pos - half } else { 0 };
            if start + list_height > total {
                start = total - list_height;
            }
            (start, start + list_height, sel_pos - start)
        };

        let visible_items: Vec<ListItem> = tracklist
            .iter()
            .skip(start)
            .take(end - start)
            .map(|(id, track)| {
                let mut text = track.display().to_string();
                if track.duration > Duration::ZERO {
                    text = format!("{} [{}]", text, format_mmss(track.duration));
                }
                let marker = if Some(id) == active { "▶ " } else { "  " };
                let mut style = Style::default();
                if track.status == TrackStatus::Error {
                    style = style.fg(Color::Red);
                }
                if Some(id) == active {
                    style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                }
                ListItem::new(format!("{marker}{text}")).style(style)
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ratatui::widgets::ListState::default();
        if total > 0 {
            state.select(Some(selected_pos_in_visible));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Input prompt popup (keeps the list visible under it).
    if let Some((title, input)) = prompt {
        let popup_area = centered_rect_sized(64, 3, chunks[2]);
        frame.render_widget(Clear, popup_area);
        let prompt_paragraph = Paragraph::new(format!("{input}_"))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .title(format!(" {title} (enter confirms, esc cancels) ")),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(prompt_paragraph, popup_area);
    }

    let footer = Paragraph::new(CONTROLS_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}
