//! Keyboard shortcut mapping.

/// A key as reported by the host's keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Delete,
    Backspace,
}

/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            meta: false,
        }
    }

    pub fn ctrl(c: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(Key::Char(c))
        }
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self {
            shift: true,
            ..Self::ctrl(c)
        }
    }

    /// Resolves the chord to an editor command.
    ///
    /// Ctrl and Cmd are interchangeable. Letters match case-insensitively,
    /// since hosts report `Z` rather than `z` while Shift is held.
    pub fn command(&self) -> Option<EditorCommand> {
        match self.key {
            Key::Delete | Key::Backspace => Some(EditorCommand::Delete),
            Key::Char(c) if self.ctrl || self.meta => match c.to_ascii_lowercase() {
                'z' if self.shift => Some(EditorCommand::Redo),
                'z' => Some(EditorCommand::Undo),
                'c' => Some(EditorCommand::Copy),
                'v' => Some(EditorCommand::Paste),
                _ => None,
            },
            Key::Char(_) => None,
        }
    }
}

/// Editor actions reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    Undo,
    Redo,
    Copy,
    Paste,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undo_redo_chords() {
        assert_eq!(KeyChord::ctrl('z').command(), Some(EditorCommand::Undo));
        assert_eq!(
            KeyChord::ctrl_shift('z').command(),
            Some(EditorCommand::Redo)
        );
        assert_eq!(
            KeyChord::ctrl_shift('Z').command(),
            Some(EditorCommand::Redo)
        );
    }

    #[test]
    fn test_meta_acts_like_ctrl() {
        let chord = KeyChord {
            key: Key::Char('v'),
            ctrl: false,
            shift: false,
            meta: true,
        };
        assert_eq!(chord.command(), Some(EditorCommand::Paste));
    }

    #[test]
    fn test_delete_keys_need_no_modifier() {
        assert_eq!(
            KeyChord::plain(Key::Delete).command(),
            Some(EditorCommand::Delete)
        );
        assert_eq!(
            KeyChord::plain(Key::Backspace).command(),
            Some(EditorCommand::Delete)
        );
    }

    #[test]
    fn test_unmapped_chords() {
        assert_eq!(KeyChord::plain(Key::Char('z')).command(), None);
        assert_eq!(KeyChord::ctrl('s').command(), None);
        assert_eq!(KeyChord::ctrl('c').command(), Some(EditorCommand::Copy));
    }
}
