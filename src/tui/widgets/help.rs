//! Keybinding reference

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, theme: &Theme, area: Rect) {
    let icons = &theme.icons;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(theme.palette.border))
        .title(format!(" {} Keybinds ", icons.help))
        .title_style(Style::default().fg(theme.palette.accent));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let left_content = vec![
        section_header(&format!("{} Search", icons.search), theme),
        keybind("Enter", "Search / open result", theme),
        keybind("Tab / Down", "Focus results", theme),
        keybind("/ / i", "Back to the search box", theme),
        keybind("Ctrl+u", "Clear input", theme),
        keybind("j / k", "Move down / up", theme),
        keybind("g / G", "Top / bottom", theme),
        keybind("Ctrl+d", "Page down", theme),
        Line::default(),
        section_header(&format!("{} Lyrics", icons.lyrics), theme),
        keybind("m", "Text / karaoke", theme),
        keybind("v", "Primary / original text", theme),
        keybind("t", "Latin letters on / off", theme),
        keybind("j / k", "Scroll", theme),
        keybind("Esc", "Back to results", theme),
    ];
    frame.render_widget(
        Paragraph::new(left_content).wrap(Wrap { trim: false }),
        cols[0],
    );

    let right_content = vec![
        section_header(&format!("{} Karaoke", icons.music), theme),
        keybind("Space", "Play / pause", theme),
        keybind("r", "Reset to the start", theme),
        keybind("] / Right", "Seek forward 5s", theme),
        keybind("[ / Left", "Seek back 5s", theme),
        keybind("+ / =", "Pitch up a semitone", theme),
        keybind("- / _", "Pitch down a semitone", theme),
        Line::default(),
        section_header("General", theme),
        keybind("?", "Toggle this help", theme),
        keybind("q", "Quit", theme),
        keybind("Ctrl+c", "Quit from anywhere", theme),
    ];
    frame.render_widget(
        Paragraph::new(right_content).wrap(Wrap { trim: false }),
        cols[1],
    );
}

fn section_header(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("━━ {title} ━━"),
        Style::default()
            .fg(theme.palette.accent)
            .add_modifier(Modifier::BOLD),
    )])
}

fn keybind(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(
            format!("{key:12}"),
            Style::default()
                .fg(theme.palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_string(), Style::default().fg(theme.palette.fg_primary)),
    ])
}
