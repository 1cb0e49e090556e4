//! Cursor handling for form fields.
//!
//! Field text lives in the controller's draft, so the cursor is kept
//! separately and applied to whichever field has focus.

use unicode_width::UnicodeWidthStr;

/// Cursor position (character index) within a form field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FieldCursor {
    pub position: usize,
}

impl FieldCursor {
    /// Places the cursor after the last character of `text`.
    pub fn at_end(text: &str) -> Self {
        Self {
            position: text.chars().count(),
        }
    }

    /// Inserts a character at the cursor position.
    pub fn insert(&mut self, text: &mut String, c: char) {
        self.clamp(text);
        let at = self.byte_offset(text);
        text.insert(at, c);
        self.position += 1;
    }

    /// Deletes the character before the cursor (backspace).
    pub fn backspace(&mut self, text: &mut String) {
        self.clamp(text);
        if self.position > 0 {
            self.position -= 1;
            let at = self.byte_offset(text);
            text.remove(at);
        }
    }

    /// Deletes the character at the cursor position (delete).
    pub fn delete(&mut self, text: &mut String) {
        self.clamp(text);
        if self.position < text.chars().count() {
            let at = self.byte_offset(text);
            text.remove(at);
        }
    }

    pub fn move_left(&mut self, text: &str) {
        self.clamp(text);
        self.position = self.position.saturating_sub(1);
    }

    pub fn move_right(&mut self, text: &str) {
        self.clamp(text);
        if self.position < text.chars().count() {
            self.position += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.position = 0;
    }

    pub fn move_end(&mut self, text: &str) {
        self.position = text.chars().count();
    }

    /// Terminal columns occupied by the text before the cursor.
    pub fn display_offset(&self, text: &str) -> u16 {
        let before = &text[..self.byte_offset(text)];
        u16::try_from(before.width()).unwrap_or(u16::MAX)
    }

    /// Pulls the cursor back inside `text`, which may have been replaced
    /// since the cursor was placed.
    pub fn clamp(&mut self, text: &str) {
        self.position = self.position.min(text.chars().count());
    }

    fn byte_offset(&self, text: &str) -> usize {
        text.char_indices()
            .nth(self.position)
            .map_or(text.len(), |(i, _)| i)
    }
}
