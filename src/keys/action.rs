//! Editor actions and the capability trait the dispatcher drives.
//!
//! Every action a binding table can name is a variant of [`EditorAction`],
//! and every variant maps statically onto one [`Editor`] method. Editors
//! implement only the methods they support; the rest default to no-ops.

use crate::keys::command::CommandBuffer;
use crate::keys::event::KeyEvent;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Action identifiers usable in key binding tables.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    MoveWordForward,
    MoveWordBackward,
    StartOfLine,
    EndOfLine,
    StartOfDocument,
    EndOfDocument,
    DeleteLine,
    DeleteWord,
    YankLine,
    YankWord,
    InsertChar,
    SelectLeft,
    SelectRight,
    SelectUp,
    SelectDown,
    AppendCommandChar,
    ExecuteCommand,
}

impl EditorAction {
    pub const ALL: [EditorAction; 21] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::MoveLeft,
        Self::MoveRight,
        Self::MoveWordForward,
        Self::MoveWordBackward,
        Self::StartOfLine,
        Self::EndOfLine,
        Self::StartOfDocument,
        Self::EndOfDocument,
        Self::DeleteLine,
        Self::DeleteWord,
        Self::YankLine,
        Self::YankWord,
        Self::InsertChar,
        Self::SelectLeft,
        Self::SelectRight,
        Self::SelectUp,
        Self::SelectDown,
        Self::AppendCommandChar,
        Self::ExecuteCommand,
    ];

    /// Identifier as written in binding tables.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::MoveLeft => "move_left",
            Self::MoveRight => "move_right",
            Self::MoveWordForward => "move_word_forward",
            Self::MoveWordBackward => "move_word_backward",
            Self::StartOfLine => "start_of_line",
            Self::EndOfLine => "end_of_line",
            Self::StartOfDocument => "start_of_document",
            Self::EndOfDocument => "end_of_document",
            Self::DeleteLine => "delete_line",
            Self::DeleteWord => "delete_word",
            Self::YankLine => "yank_line",
            Self::YankWord => "yank_word",
            Self::InsertChar => "insert_char",
            Self::SelectLeft => "select_left",
            Self::SelectRight => "select_right",
            Self::SelectUp => "select_up",
            Self::SelectDown => "select_down",
            Self::AppendCommandChar => "append_command_char",
            Self::ExecuteCommand => "execute_command",
        }
    }

    /// Run the action against `editor`.
    ///
    /// Command-line actions go through `commands`: appending folds the key
    /// into the buffer, executing drains it and hands the text to the editor.
    pub fn invoke<E: Editor + ?Sized>(
        self,
        editor: &mut E,
        event: &KeyEvent,
        commands: &mut CommandBuffer,
    ) {
        match self {
            Self::MoveUp => editor.move_up(event),
            Self::MoveDown => editor.move_down(event),
            Self::MoveLeft => editor.move_left(event),
            Self::MoveRight => editor.move_right(event),
            Self::MoveWordForward => editor.move_word_forward(event),
            Self::MoveWordBackward => editor.move_word_backward(event),
            Self::StartOfLine => editor.start_of_line(event),
            Self::EndOfLine => editor.end_of_line(event),
            Self::StartOfDocument => editor.start_of_document(event),
            Self::EndOfDocument => editor.end_of_document(event),
            Self::DeleteLine => editor.delete_line(event),
            Self::DeleteWord => editor.delete_word(event),
            Self::YankLine => editor.yank_line(event),
            Self::YankWord => editor.yank_word(event),
            Self::InsertChar => editor.insert_char(event),
            Self::SelectLeft => editor.select_left(event),
            Self::SelectRight => editor.select_right(event),
            Self::SelectUp => editor.select_up(event),
            Self::SelectDown => editor.select_down(event),
            Self::AppendCommandChar => {
                if commands.push_key(event) {
                    editor.command_changed(commands.as_str());
                }
            }
            Self::ExecuteCommand => {
                let command = commands.take();
                editor.execute_command(&command);
            }
        }
    }
}

impl fmt::Display for EditorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capability set of the consumer driven by the key dispatcher.
///
/// Each method receives the key event that triggered it. All methods
/// default to doing nothing, so an editor that lacks a capability silently
/// ignores the action.
#[allow(unused_variables)]
pub trait Editor {
    fn move_up(&mut self, event: &KeyEvent) {}
    fn move_down(&mut self, event: &KeyEvent) {}
    fn move_left(&mut self, event: &KeyEvent) {}
    fn move_right(&mut self, event: &KeyEvent) {}
    fn move_word_forward(&mut self, event: &KeyEvent) {}
    fn move_word_backward(&mut self, event: &KeyEvent) {}
    fn start_of_line(&mut self, event: &KeyEvent) {}
    fn end_of_line(&mut self, event: &KeyEvent) {}
    fn start_of_document(&mut self, event: &KeyEvent) {}
    fn end_of_document(&mut self, event: &KeyEvent) {}
    fn delete_line(&mut self, event: &KeyEvent) {}
    fn delete_word(&mut self, event: &KeyEvent) {}
    fn yank_line(&mut self, event: &KeyEvent) {}
    fn yank_word(&mut self, event: &KeyEvent) {}
    fn insert_char(&mut self, event: &KeyEvent) {}
    fn select_left(&mut self, event: &KeyEvent) {}
    fn select_right(&mut self, event: &KeyEvent) {}
    fn select_up(&mut self, event: &KeyEvent) {}
    fn select_down(&mut self, event: &KeyEvent) {}

    /// The command buffer changed; `buffer` is its full contents.
    fn command_changed(&mut self, buffer: &str) {}

    /// A command was submitted; `command` is everything typed since the last one.
    fn execute_command(&mut self, command: &str) {}
}

impl<E: Editor + ?Sized> Editor for &mut E {
    fn move_up(&mut self, event: &KeyEvent) {
        (**self).move_up(event)
    }
    fn move_down(&mut self, event: &KeyEvent) {
        (**self).move_down(event)
    }
    fn move_left(&mut self, event: &KeyEvent) {
        (**self).move_left(event)
    }
    fn move_right(&mut self, event: &KeyEvent) {
        (**self).move_right(event)
    }
    fn move_word_forward(&mut self, event: &KeyEvent) {
        (**self).move_word_forward(event)
    }
    fn move_word_backward(&mut self, event: &KeyEvent) {
        (**self).move_word_backward(event)
    }
    fn start_of_line(&mut self, event: &KeyEvent) {
        (**self).start_of_line(event)
    }
    fn end_of_line(&mut self, event: &KeyEvent) {
        (**self).end_of_line(event)
    }
    fn start_of_document(&mut self, event: &KeyEvent) {
        (**self).start_of_document(event)
    }
    fn end_of_document(&mut self, event: &KeyEvent) {
        (**self).end_of_document(event)
    }
    fn delete_line(&mut self, event: &KeyEvent) {
        (**self).delete_line(event)
    }
    fn delete_word(&mut self, event: &KeyEvent) {
        (**self).delete_word(event)
    }
    fn yank_line(&mut self, event: &KeyEvent) {
        (**self).yank_line(event)
    }
    fn yank_word(&mut self, event: &KeyEvent) {
        (**self).yank_word(event)
    }
    fn insert_char(&mut self, event: &KeyEvent) {
        (**self).insert_char(event)
    }
    fn select_left(&mut self, event: &KeyEvent) {
        (**self).select_left(event)
    }
    fn select_right(&mut self, event: &KeyEvent) {
        (**self).select_right(event)
    }
    fn select_up(&mut self, event: &KeyEvent) {
        (**self).select_up(event)
    }
    fn select_down(&mut self, event: &KeyEvent) {
        (**self).select_down(event)
    }
    fn command_changed(&mut self, buffer: &str) {
        (**self).command_changed(buffer)
    }
    fn execute_command(&mut self, command: &str) {
        (**self).execute_command(command)
    }
}
