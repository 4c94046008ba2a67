//! Search box and LRCLIB result list

use super::truncate_str;
use crate::app::state::{AppState, SearchFocus};
use crate::lyrics::LyricCandidate;
use crate::tui::theme::{LoadingSpinner, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, theme: &Theme, state: &mut AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_search_box(frame, theme, state, rows[0]);
    render_results(frame, theme, state, rows[1]);
}

fn render_search_box(frame: &mut Frame, theme: &Theme, state: &AppState, area: Rect) {
    let is_focused = state.search_focus == SearchFocus::Input;
    let border_color = if is_focused {
        theme.palette.accent
    } else {
        theme.palette.border
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} Song or artist ", theme.icons.search))
        .title_style(Style::default().fg(theme.palette.accent));

    let prompt = if state.results.loading {
        format!("{} {}", state.search_query, LoadingSpinner::frame(state.tick))
    } else {
        let cursor = if is_focused { "▏" } else { "" };
        format!("{}{}", state.search_query, cursor)
    };

    let p = Paragraph::new(Line::from(prompt))
        .style(Style::default().fg(theme.palette.fg_primary))
        .block(block);
    frame.render_widget(p, area);
}

fn render_results(frame: &mut Frame, theme: &Theme, state: &mut AppState, area: Rect) {
    let focused = state.search_focus == SearchFocus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(theme.border_set())
        .border_style(Style::default().fg(if focused {
            theme.palette.accent
        } else {
            theme.palette.border
        }))
        .title(format!(" {} Results ", theme.icons.lyrics))
        .title_style(Style::default().fg(theme.palette.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.resolving || state.results.loading {
        let what = if state.resolving { "Fetching lyrics..." } else { "Searching..." };
        let loading = Paragraph::new(Line::from(format!(
            "{} {}",
            LoadingSpinner::frame(state.tick),
            what
        )))
        .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(loading, inner);
        return;
    }

    if state.results.items.is_empty() {
        let msg = if state.results.loaded {
            "No lyrics found for that search"
        } else {
            "Type a song or artist and press Enter"
        };
        let empty = Paragraph::new(Line::from(msg))
            .style(Style::default().fg(theme.palette.fg_secondary));
        frame.render_widget(empty, inner);
        return;
    }

    // Bottom row carries the selected result's artwork once it is known.
    let thumbnail = state.results.artwork.get(&state.results.selected).cloned().flatten();
    let (inner, art_row) = match thumbnail {
        Some(url) if inner.height > 2 => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(inner);
            let width = (rows[1].width as usize).saturating_sub(2);
            let line = Line::from(vec![
                Span::styled(
                    format!("{} ", theme.icons.album),
                    Style::default().fg(theme.palette.accent_alt),
                ),
                Span::styled(
                    truncate_str(&url, width),
                    Style::default().fg(theme.palette.fg_secondary),
                ),
            ]);
            (rows[0], Some((line, rows[1])))
        }
        _ => (inner, None),
    };
    if let Some((line, row)) = art_row {
        frame.render_widget(Paragraph::new(line), row);
    }

    let visible_height = inner.height as usize;
    state.results.update_scroll(visible_height);
    let list = &state.results;
    let max_width = (inner.width as usize).saturating_sub(6);

    let items: Vec<ListItem> = list
        .items
        .iter()
        .enumerate()
        .skip(list.scroll_offset)
        .take(visible_height)
        .map(|(i, c)| {
            let style = if i == list.selected {
                Style::default()
                    .fg(theme.palette.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.palette.fg_primary)
            };
            let (marker, marker_color) = if c.synced().is_some() {
                (theme.icons.synced, theme.palette.accent_alt)
            } else {
                (" ", theme.palette.fg_secondary)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker} "), Style::default().fg(marker_color)),
                Span::styled(truncate_str(&result_label(c), max_width), style),
            ]))
        })
        .collect();

    let mut list_state = ListState::default();
    if focused {
        list_state.select(Some(list.selected.saturating_sub(list.scroll_offset)));
    }

    let widget = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.palette.bg_primary)
                .bg(theme.palette.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("\u{f054} ");
    frame.render_stateful_widget(widget, inner, &mut list_state);

    if list.items.len() > visible_height {
        let pos_text = format!("{}/{}", list.selected + 1, list.items.len());
        let pos_len = pos_text.len() as u16;
        let pos_x = inner.x + inner.width.saturating_sub(pos_len);
        if pos_x > inner.x {
            frame.render_widget(
                Paragraph::new(pos_text).style(Style::default().fg(theme.palette.fg_secondary)),
                Rect::new(pos_x, inner.y, pos_len, 1),
            );
        }
    }
}

/// "Title - Artist (Album)" for one result row.
fn result_label(c: &LyricCandidate) -> String {
    let mut label = c.track_name.clone();
    if !c.artist_name.is_empty() {
        label.push_str(" - ");
        label.push_str(&c.artist_name);
    }
    if let Some(album) = c.album_name.as_deref().filter(|a| !a.is_empty()) {
        label.push_str(&format!(" ({album})"));
    }
    label
}
