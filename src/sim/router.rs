//! Keystroke routing
//!
//! Decides which of the words on screen receives each keystroke.

use super::word::Word;

/// A keystroke the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable ASCII character
    Char(char),
    Backspace,
    Escape,
}

impl Key {
    pub const BACKSPACE_CODE: u32 = 8;
    pub const ESCAPE_CODE: u32 = 27;

    /// Decode a raw text-entry code. Anything outside printable ASCII,
    /// backspace and escape is ignored.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            Self::BACKSPACE_CODE => Some(Key::Backspace),
            Self::ESCAPE_CODE => Some(Key::Escape),
            32..=126 => char::from_u32(code).map(Key::Char),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Self::from_code(c as u32)
    }
}

/// Index of the unfinished word with the greatest x among those accepted by `filter`
pub fn most_urgent(words: &[Word], filter: impl Fn(&Word) -> bool) -> Option<usize> {
    words
        .iter()
        .enumerate()
        .filter(|(_, w)| !w.is_completed() && filter(w))
        .max_by(|(_, a), (_, b)| {
            a.pos
                .x
                .partial_cmp(&b.pos.x)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Index of the word currently holding the active target
pub fn active_target(words: &[Word]) -> Option<usize> {
    words
        .iter()
        .position(|w| w.is_active_target() && !w.is_completed())
}

/// Deliver `key` to the right word. Returns the id of the word that received it.
pub fn route_key(words: &mut [Word], key: Key) -> Option<u32> {
    if let Some(i) = active_target(words) {
        let word = &mut words[i];
        match key {
            Key::Escape => word.reset_typing(),
            _ => word.apply_key(key),
        }
        return Some(word.id);
    }

    // Only a printable character can acquire a new target
    let Key::Char(c) = key else {
        return None;
    };

    let target = most_urgent(words, |w| {
        w.display_text()
            .chars()
            .next()
            .is_some_and(|first| first.eq_ignore_ascii_case(&c))
    })?;

    for (i, word) in words.iter_mut().enumerate() {
        word.set_active_target(i == target);
    }
    let word = &mut words[target];
    word.apply_key(key);
    log::debug!("Target acquired: word {} ({:?})", word.id, word.display_text());
    Some(word.id)
}
