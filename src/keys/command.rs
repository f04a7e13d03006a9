//! Accumulator for command-line input typed in command mode.

use crate::keys::event::KeyEvent;

/// Characters typed since the last command was executed.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct CommandBuffer {
    text: String,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a key press into the buffer.
    ///
    /// Single-character keys are appended and `Backspace` removes the last
    /// character. Other named keys leave the buffer alone. Returns whether
    /// the buffer changed.
    pub fn push_key(&mut self, event: &KeyEvent) -> bool {
        if let Some(c) = event.as_char() {
            self.text.push(c);
            return true;
        }
        if event.key == "Backspace" {
            return self.text.pop().is_some();
        }
        false
    }

    /// Take the accumulated command, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characters_concatenate_in_order() {
        let mut buffer = CommandBuffer::new();
        for key in ["w", "q", "!"] {
            assert!(buffer.push_key(&KeyEvent::new(key)));
        }
        assert_eq!(buffer.as_str(), "wq!");
    }

    #[test]
    fn backspace_removes_last_character() {
        let mut buffer = CommandBuffer::new();
        buffer.push_key(&KeyEvent::new("w"));
        buffer.push_key(&KeyEvent::new("x"));

        assert!(buffer.push_key(&KeyEvent::new("Backspace")));
        assert_eq!(buffer.as_str(), "w");

        buffer.clear();
        assert!(!buffer.push_key(&KeyEvent::new("Backspace")));
    }

    #[test]
    fn named_keys_are_ignored() {
        let mut buffer = CommandBuffer::new();
        assert!(!buffer.push_key(&KeyEvent::new("Shift")));
        assert!(buffer.is_empty());
    }

    #[test]
    fn take_clears() {
        let mut buffer = CommandBuffer::new();
        buffer.push_key(&KeyEvent::new("q"));

        assert_eq!(buffer.take(), "q");
        assert!(buffer.is_empty());
        assert_eq!(buffer.take(), "");
    }
}
