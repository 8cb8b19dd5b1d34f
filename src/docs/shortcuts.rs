/// A key press with its modifiers, as delivered at the document level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: char,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn ctrl(key: char) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    pub fn meta(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: true,
        }
    }

    pub fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    FocusSearch,
    ToggleToc,
}

impl Shortcut {
    /// Ctrl or Cmd + `f` / `t`. A matched shortcut suppresses the platform
    /// default (find in page, new tab).
    pub fn from_chord(chord: &KeyChord) -> Option<Self> {
        if !(chord.ctrl || chord.meta) {
            return None;
        }
        match chord.key {
            'f' => Some(Shortcut::FocusSearch),
            't' => Some(Shortcut::ToggleToc),
            _ => None,
        }
    }
}
