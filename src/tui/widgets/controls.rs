//! Karaoke transport bar: clock, progress, pitch and the backing track.

use super::truncate_str;
use crate::app::state::AppState;
use crate::lyrics::parser::format_timestamp;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

pub fn render(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let icons = &theme.icons;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Karaoke ", icons.music))
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

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(padded);

    let playback = state.karaoke.state(Instant::now());
    // The last line's start stands in for the song length.
    let end = state
        .karaoke
        .lines()
        .last()
        .map(|l| l.time_secs)
        .unwrap_or(0.0);
    let ratio = if end > 0.0 {
        (playback.current_time / end).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let bar = progress_bar(rows[0].width as usize, ratio, icons);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            bar,
            Style::default().fg(theme.palette.accent),
        ))),
        rows[0],
    );

    let secondary = Style::default().fg(theme.palette.fg_secondary);
    let play_icon = if playback.is_playing { icons.pause } else { icons.play };
    let mut spans = vec![
        Span::styled(
            format!(
                "{}/{}",
                format_timestamp(playback.current_time),
                format_timestamp(end)
            ),
            secondary,
        ),
        Span::raw("  "),
        Span::styled(
            play_icon,
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(format!("{} ", icons.pitch), secondary),
        Span::styled(
            pitch_label(playback.pitch),
            Style::default().fg(theme.palette.fg_primary),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} · {}", state.mode.label(), state.variant.label()),
            secondary,
        ),
    ];
    if state.localized {
        spans.push(Span::styled(
            format!(" · {} Latin", icons.language),
            Style::default().fg(theme.palette.accent_alt),
        ));
    }

    if let Some(name) = &state.audio_name {
        let status = if state.audio_ready { "" } else { " (loading)" };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(format!("{} ", icons.music), secondary));
        spans.push(Span::styled(
            truncate_str(&format!("{name}{status}"), 40),
            secondary,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), rows[1]);
}

/// Semitone offset with an explicit sign, "0" at the original key.
fn pitch_label(semitones: i8) -> String {
    if semitones > 0 {
        format!("+{semitones}")
    } else {
        semitones.to_string()
    }
}

fn progress_bar(width: usize, ratio: f64, icons: &Icons) -> String {
    if width < 3 {
        return String::new();
    }

    let filled = ((width - 1) as f64 * ratio).round() as usize;
    let empty = width.saturating_sub(filled + 1);

    let mut bar = String::with_capacity(width * 3);
    for _ in 0..filled {
        bar.push_str(icons.progress_full);
    }
    bar.push_str(icons.progress_head);
    for _ in 0..empty {
        bar.push_str(icons.progress_empty);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_label() {
        assert_eq!(pitch_label(0), "0");
        assert_eq!(pitch_label(3), "+3");
        assert_eq!(pitch_label(-12), "-12");
    }

    #[test]
    fn test_progress_bar_width() {
        let icons = Icons::nerd();
        let bar = progress_bar(10, 0.5, &icons);
        let cells = bar.matches(icons.progress_full).count()
            + bar.matches(icons.progress_head).count()
            + bar.matches(icons.progress_empty).count();
        assert_eq!(cells, 10);
        assert!(progress_bar(2, 1.0, &icons).is_empty());
    }
}
