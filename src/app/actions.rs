use super::state::SearchFocus;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Back,
    ToggleHelp,
    SetSearchFocus(SearchFocus),

    ListUp,
    ListDown,
    GoTop,
    GoBottom,
    PageUp,
    PageDown,
    Activate,

    InputChar(char),
    Backspace,
    ClearInput,
    StartSearch,

    // Lyrics view
    ToggleMode,
    ToggleVariant,
    ToggleLocalize,
    TogglePlay,
    ResetKaraoke,
    PitchUp,
    PitchDown,
    SeekForward,
    SeekBack,

    Resize,
}
