//! Root layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ lyrics-finder · Theme · vibe                 │
//! ├──────────────────────────────────────────────┤
//! │ Search / Lyrics (+ karaoke bar) / Help       │
//! ├──────────────────────────────────────────────┤
//! │ key hints · status · toast                   │
//! └──────────────────────────────────────────────┘
//! ```

use super::{controls, help, lyrics_view, search, truncate_str};
use crate::app::state::{AppState, SearchFocus, ToastKind, View};
use crate::config::APP_NAME;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, state: &mut AppState) {
    let theme = theme_for(state);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.palette.bg_primary)),
        frame.area(),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, &theme, state, rows[0]);
    match state.view {
        View::Search => search::render(frame, &theme, state, rows[1]),
        View::Lyrics => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(5), Constraint::Length(4)])
                .split(rows[1]);
            lyrics_view::render(frame, &theme, state, parts[0]);
            controls::render(frame, &theme, state, parts[1]);
        }
        View::Help => help::render(frame, &theme, rows[1]),
    }
    render_footer(frame, &theme, state, rows[2]);
}

/// Colours follow the genre of the song on screen.
fn theme_for(state: &AppState) -> Theme {
    let genre = state
        .lyrics
        .as_ref()
        .map(|l| l.genre.as_str())
        .unwrap_or("Unknown");
    Theme::for_genre(genre)
}

fn render_header(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(
            format!(" {} {APP_NAME} ", theme.icons.music),
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("{} · {}", theme.name, theme.vibe),
            Style::default().fg(theme.palette.accent_alt),
        ),
    ];
    if let Some(l) = &state.lyrics {
        spans.push(Span::styled(
            format!("  {} - {}", l.title, l.artist),
            Style::default().fg(theme.palette.fg_secondary),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.palette.bg_secondary)),
        area,
    );
}

fn render_footer(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let hints = match (state.view, state.search_focus) {
        (View::Search, SearchFocus::Input) => "Enter search · Tab results · ? help · Esc quit",
        (View::Search, SearchFocus::Results) => "Enter open · j/k move · / edit · ? help · q quit",
        (View::Lyrics, _) => "m mode · v variant · t latin · Space play · r reset · +/- pitch · Esc back",
        (View::Help, _) => "Esc close · q quit",
    };

    let width = area.width as usize;
    let mut spans = vec![Span::styled(
        format!(" {hints}"),
        Style::default().fg(theme.palette.fg_secondary),
    )];

    if let Some(toast) = &state.toast
        && !toast.is_expired()
    {
        let (icon, color) = match toast.kind {
            ToastKind::Success => (theme.icons.success, theme.palette.accent_alt),
            ToastKind::Error => (theme.icons.error, theme.palette.error),
        };
        spans.push(Span::styled(
            format!("  {icon} {}", truncate_str(&toast.message, width / 2)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    } else if !state.status.is_empty() {
        spans.push(Span::styled(
            format!("  {}", truncate_str(&state.status, width / 2)),
            Style::default().fg(theme.palette.fg_primary),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.palette.bg_secondary)),
        area,
    );
}
