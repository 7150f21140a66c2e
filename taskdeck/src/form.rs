//! Add-task form drafts.
//!
//! The form owns the draft title and description until a submission is
//! accepted, then clears them. It never talks to the repository: a
//! successful [`TaskForm::submit`] hands a [`NewTask`] to the caller.

use taskdeck_proto::task::NewTask;

/// Reasons a submission is refused before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Title is empty or whitespace only.
    #[error("Title is required!")]
    TitleRequired,
    /// Title exceeds the configured maximum length.
    #[error("Title is too long (max {max} characters).")]
    TitleTooLong {
        /// Configured maximum, in characters.
        max: usize,
    },
}

/// Which draft field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    /// The title line.
    #[default]
    Title,
    /// The description line.
    Description,
}

/// Draft state for the add-task form.
#[derive(Debug, Clone)]
pub struct TaskForm {
    /// Draft title.
    pub title: String,
    /// Draft description.
    pub description: String,
    /// Field the cursor is in.
    pub field: FormField,
    /// Cursor position within the active field (character index).
    pub cursor: usize,
    /// Maximum title length in characters.
    max_title_len: usize,
}

/// Default maximum task title length in characters.
pub const DEFAULT_MAX_TITLE_LEN: usize = 256;

impl Default for TaskForm {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TITLE_LEN)
    }
}

impl TaskForm {
    /// Creates an empty form.
    #[must_use]
    pub const fn new(max_title_len: usize) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            field: FormField::Title,
            cursor: 0,
            max_title_len,
        }
    }

    /// Validates the drafts and, if acceptable, returns the creation
    /// request and clears both fields.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::TitleRequired`] for a blank title and
    /// [`FormError::TitleTooLong`] for an over-long one. The drafts are
    /// left untouched on error.
    pub fn submit(&mut self) -> Result<NewTask, FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::TitleRequired);
        }
        if self.title.chars().count() > self.max_title_len {
            return Err(FormError::TitleTooLong {
                max: self.max_title_len,
            });
        }
        let new_task = NewTask::new(
            std::mem::take(&mut self.title),
            std::mem::take(&mut self.description),
        );
        self.field = FormField::Title;
        self.cursor = 0;
        Ok(new_task)
    }

    /// Moves the cursor to `field`, placing it at the end of the text.
    pub fn focus(&mut self, field: FormField) {
        self.field = field;
        self.cursor = self.active().chars().count();
    }

    /// Text of the active field.
    #[must_use]
    pub fn active(&self) -> &str {
        match self.field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
        }
    }

    /// Byte offset of the cursor within the active field.
    fn byte_offset(&self) -> usize {
        let text = self.active();
        text.char_indices()
            .nth(self.cursor)
            .map_or(text.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor position.
    pub fn enter_char(&mut self, c: char) {
        let at = self.byte_offset();
        self.active_mut().insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset();
        self.active_mut().remove(at);
    }

    /// Move cursor left.
    pub const fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right.
    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.active().chars().count() {
            self.cursor += 1;
        }
    }

    /// Move cursor to the start of the field.
    pub const fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to the end of the field.
    pub fn move_cursor_end(&mut self) {
        self.cursor = self.active().chars().count();
    }
}
