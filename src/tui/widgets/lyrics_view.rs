//! Song info panel and the lyrics body, as plain text or karaoke.

use super::truncate_str;
use crate::app::state::{AppState, LyricsMode};
use crate::lyrics::ResolvedLyrics;
use crate::tui::theme::{LoadingSpinner, Theme};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let Some(lyrics) = &state.lyrics else {
        let msg = if state.resolving {
            format!("{} Fetching lyrics...", LoadingSpinner::frame(state.tick))
        } else {
            "No song selected".to_string()
        };
        let p = Paragraph::new(Line::from(msg))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(p, area);
        return;
    };

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(20)])
        .split(area);

    render_info(frame, theme, lyrics, cols[0]);
    render_body(frame, theme, state, cols[1]);
}

fn render_info(frame: &mut Frame, theme: &Theme, lyrics: &ResolvedLyrics, area: Rect) {
    let icons = &theme.icons;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Song ", icons.music))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = (inner.width as usize).saturating_sub(3);
    let label = Style::default().fg(theme.palette.fg_secondary);
    let value = Style::default().fg(theme.palette.fg_primary);

    let mut lines = vec![
        Line::from(Span::styled(
            truncate_str(&lyrics.title, width + 2),
            Style::default()
                .fg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(format!("{} ", icons.artist), label),
            Span::styled(truncate_str(&lyrics.artist, width), value),
        ]),
        Line::from(vec![
            Span::styled(format!("{} ", icons.album), label),
            Span::styled(truncate_str(&lyrics.genre, width), value),
        ]),
        Line::default(),
    ];

    let available = [
        ("Plain", lyrics.primary_plain.is_some()),
        ("Synced", lyrics.primary_synced.is_some()),
        ("Original", lyrics.has_secondary),
    ];
    for (name, present) in available {
        let (mark, color) = if present {
            (icons.success, theme.palette.accent_alt)
        } else {
            (icons.error, theme.palette.fg_secondary)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{mark} "), Style::default().fg(color)),
            Span::styled(name, value),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", icons.link), label),
        Span::styled(truncate_str(&lyrics.external_link, width), label),
    ]));
    if let Some(art) = &lyrics.artwork {
        lines.push(Line::from(Span::styled(truncate_str(art, width + 2), label)));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_body(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let icons = &theme.icons;
    let mut title = format!(
        " {} {} · {} ",
        icons.lyrics,
        state.mode.label(),
        state.variant.label()
    );
    if state.localized {
        title.push_str(&format!("· {} Latin ", icons.language));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(title)
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let padded = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner)[1];

    match state.mode {
        LyricsMode::Text => render_text(frame, theme, state, padded),
        LyricsMode::Karaoke => render_karaoke(frame, theme, state, padded),
    }
}

fn render_text(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    if state.text_lines.is_empty() {
        let p = Paragraph::new(Line::from("No plain lyrics for this version"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(p, area);
        return;
    }

    let max_width = area.width as usize;
    let lines: Vec<Line> = state
        .text_lines
        .iter()
        .skip(state.scroll)
        .take(area.height as usize)
        .map(|l| {
            Line::from(Span::styled(
                truncate_str(l, max_width),
                Style::default().fg(theme.palette.fg_primary),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_karaoke(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let timed = state.karaoke.lines();
    if timed.is_empty() {
        let p = Paragraph::new(Line::from("No synced lyrics for this version"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(p, area);
        return;
    }

    let active = state.karaoke.active_index();
    let centre = state.focus_line.unwrap_or(state.scroll);
    let (start, end) = window(centre, timed.len(), area.height as usize);
    let max_width = (area.width as usize).saturating_sub(2);

    let lines: Vec<Line> = (start..end)
        .map(|i| {
            let is_current = Some(i) == active;
            let style = if is_current {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else if active.is_some_and(|a| i < a) {
                Style::default().fg(theme.palette.fg_secondary)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };
            let prefix = if is_current { "♪ " } else { "  " };
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(truncate_str(&timed[i].text, max_width), style),
            ])
        })
        .collect();

    // Centre vertically while the song is shorter than the view.
    let top_padding = (area.height as usize).saturating_sub(lines.len()) / 2;
    let mut centered: Vec<Line> = vec![Line::default(); top_padding];
    centered.extend(lines);

    frame.render_widget(
        Paragraph::new(centered).alignment(Alignment::Center),
        area,
    );
}

/// Range of `len` lines that fits `height` rows with `centre` in the middle.
fn window(centre: usize, len: usize, height: usize) -> (usize, usize) {
    if len <= height {
        return (0, len);
    }
    let start = centre.saturating_sub(height / 2).min(len - height);
    (start, start + height)
}
