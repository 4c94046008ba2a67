use crate::app::actions::Action;
use crate::app::events::{Event, InputEvent};
use crate::app::state::{AppState, SearchFocus, View};
use crossterm::event::{
    self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use tokio::sync::mpsc;

pub fn spawn_input_task(tx: mpsc::Sender<Event>) {
    tokio::task::spawn_blocking(move || {
        loop {
            if !event::poll(std::time::Duration::from_millis(250)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let ev = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind == KeyEventKind::Press => InputEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => InputEvent::Mouse(m),
                Ok(CtEvent::Resize(_, _)) => InputEvent::Resize,
                _ => continue,
            };
            if tx.blocking_send(Event::Input(ev)).is_err() {
                break;
            }
        }
    });
}

pub fn map_input_to_action(state: &AppState, ev: InputEvent) -> Option<Action> {
    match ev {
        InputEvent::Resize => Some(Action::Resize),
        InputEvent::Mouse(m) => match m.kind {
            MouseEventKind::ScrollUp => Some(Action::ListUp),
            MouseEventKind::ScrollDown => Some(Action::ListDown),
            _ => None,
        },
        InputEvent::Key(k) => {
            if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Action::Quit);
            }
            match state.view {
                View::Search => match state.search_focus {
                    SearchFocus::Input => handle_search_input(state, k),
                    SearchFocus::Results => handle_search_results(k),
                },
                View::Lyrics => handle_lyrics(k),
                View::Help => handle_help(k),
            }
        }
    }
}

fn handle_search_input(state: &AppState, k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Enter => Some(Action::StartSearch),
        KeyCode::Esc | KeyCode::Down | KeyCode::Tab if !state.results.items.is_empty() => {
            Some(Action::SetSearchFocus(SearchFocus::Results))
        }
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::ClearInput)
        }
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Action::InputChar(c))
        }
        _ => None,
    }
}

fn handle_search_results(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('/') | KeyCode::Char('i') | KeyCode::Tab => {
            Some(Action::SetSearchFocus(SearchFocus::Input))
        }
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        _ => None,
    }
}

fn handle_lyrics(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Backspace => Some(Action::Back),
        KeyCode::Char('?') => Some(Action::ToggleHelp),

        KeyCode::Char('m') => Some(Action::ToggleMode),
        KeyCode::Char('v') => Some(Action::ToggleVariant),
        KeyCode::Char('t') => Some(Action::ToggleLocalize),

        KeyCode::Char(' ') => Some(Action::TogglePlay),
        KeyCode::Char('r') => Some(Action::ResetKaraoke),
        KeyCode::Char('=') | KeyCode::Char('+') => Some(Action::PitchUp),
        KeyCode::Char('-') | KeyCode::Char('_') => Some(Action::PitchDown),
        KeyCode::Char(']') | KeyCode::Right => Some(Action::SeekForward),
        KeyCode::Char('[') | KeyCode::Left => Some(Action::SeekBack),

        KeyCode::Up | KeyCode::Char('k') => Some(Action::ListUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ListDown),
        KeyCode::Char('g') => Some(Action::GoTop),
        KeyCode::Char('G') => Some(Action::GoBottom),
        KeyCode::Char('d') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageDown),
        KeyCode::Char('u') if k.modifiers.contains(KeyModifiers::CONTROL) => Some(Action::PageUp),
        _ => None,
    }
}

fn handle_help(k: KeyEvent) -> Option<Action> {
    match k.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Backspace => Some(Action::Back),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::LyricCandidate;

    fn key(code: KeyCode) -> InputEvent {
        InputEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> InputEvent {
        InputEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_typing_goes_to_query() {
        let state = AppState::new();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::InputChar('q')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char(' '))), Some(Action::InputChar(' ')));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::StartSearch));
        assert_eq!(map_input_to_action(&state, ctrl('u')), Some(Action::ClearInput));
        assert_eq!(map_input_to_action(&state, ctrl('c')), Some(Action::Quit));
    }

    #[test]
    fn test_esc_in_empty_search_quits() {
        let mut state = AppState::new();
        assert_eq!(map_input_to_action(&state, key(KeyCode::Esc)), Some(Action::Quit));

        state.results.set_items(vec![LyricCandidate::default()]);
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Esc)),
            Some(Action::SetSearchFocus(SearchFocus::Results))
        );
    }

    #[test]
    fn test_results_navigation() {
        let mut state = AppState::new();
        state.search_focus = SearchFocus::Results;
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('j'))), Some(Action::ListDown));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Enter)), Some(Action::Activate));
        assert_eq!(
            map_input_to_action(&state, key(KeyCode::Char('/'))),
            Some(Action::SetSearchFocus(SearchFocus::Input))
        );
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('q'))), Some(Action::Quit));
    }

    #[test]
    fn test_lyrics_controls() {
        let mut state = AppState::new();
        state.view = View::Lyrics;
        let cases = [
            (KeyCode::Char(' '), Action::TogglePlay),
            (KeyCode::Char('r'), Action::ResetKaraoke),
            (KeyCode::Char('+'), Action::PitchUp),
            (KeyCode::Char('-'), Action::PitchDown),
            (KeyCode::Char('m'), Action::ToggleMode),
            (KeyCode::Char('v'), Action::ToggleVariant),
            (KeyCode::Char('t'), Action::ToggleLocalize),
            (KeyCode::Char(']'), Action::SeekForward),
            (KeyCode::Esc, Action::Back),
        ];
        for (code, action) in cases {
            assert_eq!(map_input_to_action(&state, key(code)), Some(action));
        }
    }

    #[test]
    fn test_help_closes() {
        let mut state = AppState::new();
        state.view = View::Help;
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('?'))), Some(Action::Back));
        assert_eq!(map_input_to_action(&state, key(KeyCode::Char('x'))), None);
    }
}
