//! Key events delivered by the input source.

use serde::{Deserialize, Serialize};

/// Modifier flags held during a key press.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// One logical key press.
///
/// `key` is the key identity as reported by the input source: the
/// character for printable keys (`"g"`, `"$"`, `":"`) or the key name for
/// named keys (`"Escape"`, `"Enter"`).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    /// Label used to look the key up in a binding table.
    ///
    /// The key identity passes through unchanged; modifiers are not folded in.
    pub fn label(&self) -> &str {
        &self.key
    }

    /// The typed character, if this key produces exactly one.
    pub fn as_char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl From<&str> for KeyEvent {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<char> for KeyEvent {
    fn from(key: char) -> Self {
        Self::new(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_passes_key_through() {
        assert_eq!(KeyEvent::new("g").label(), "g");
        assert_eq!(KeyEvent::new("Escape").label(), "Escape");

        let shifted = KeyEvent::with_modifiers(
            "G",
            Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
        );
        assert_eq!(shifted.label(), "G");
    }

    #[test]
    fn as_char_only_for_single_characters() {
        assert_eq!(KeyEvent::new("x").as_char(), Some('x'));
        assert_eq!(KeyEvent::from('é').as_char(), Some('é'));
        assert_eq!(KeyEvent::new("Enter").as_char(), None);
        assert_eq!(KeyEvent::new("").as_char(), None);
    }

    #[test]
    fn event_deserializes_without_modifiers() {
        let event: KeyEvent = serde_json::from_str(r#"{ "key": "d" }"#).unwrap();
        assert_eq!(event, KeyEvent::new("d"));
        assert!(event.modifiers.is_empty());
    }
}
