//! keyboard shortcut mapping

/// id of the read-only field holding the generated url
pub const GENERATED_URL_ID: &str = "generatedUrl";

/// a key press as seen by the window listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
    /// id of the focused element, if any
    pub focused_id: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Submit,
    Copy,
}

impl Shortcut {
    /// ctrl/cmd + enter submits, ctrl/cmd + c copies while the url field has focus
    pub fn from_chord(chord: KeyChord<'_>) -> Option<Self> {
        if !(chord.ctrl || chord.meta) {
            return None;
        }
        match chord.key {
            "Enter" => Some(Shortcut::Submit),
            "c" if chord.focused_id == Some(GENERATED_URL_ID) => Some(Shortcut::Copy),
            _ => None,
        }
    }
}
