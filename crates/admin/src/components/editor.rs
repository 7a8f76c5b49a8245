//! Form editor state machine.
//!
//! Each screen with an inline create/edit form tracks it with an
//! [`EditorState`]: closed, creating (with a transient buffer), or editing
//! a specific record. Opening the form always resets the buffer — to
//! defaults for "add", to the record's current values for "edit" — and
//! only a successful submission transitions back to closed.

/// State of a screen's inline editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState<B> {
    /// No form is open.
    Closed,
    /// The "add" form is open with a transient buffer.
    Creating(B),
    /// The "edit" form is open for the record with the given id.
    Editing {
        /// Id of the record being edited.
        id: String,
        /// Transient form buffer.
        buffer: B,
    },
}

impl<B> Default for EditorState<B> {
    fn default() -> Self {
        Self::Closed
    }
}

impl<B> EditorState<B> {
    /// Open the "add" form, discarding any previous buffer.
    pub fn open_create(&mut self, defaults: B) {
        *self = Self::Creating(defaults);
    }

    /// Open the "edit" form for a record, discarding any previous buffer.
    pub fn open_edit(&mut self, id: impl Into<String>, buffer: B) {
        *self = Self::Editing {
            id: id.into(),
            buffer,
        };
    }

    /// Close the form without submitting.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// A submission succeeded against the backend; the form closes.
    pub fn submit_succeeded(&mut self) {
        *self = Self::Closed;
    }

    /// Whether any form is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Whether the "add" form is open.
    #[must_use]
    pub const fn is_creating(&self) -> bool {
        matches!(self, Self::Creating(_))
    }

    /// Id of the record being edited, if any.
    #[must_use]
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Self::Editing { id, .. } => Some(id.as_str()),
            _ => None,
        }
    }

    /// The open form's buffer, if any.
    #[must_use]
    pub const fn buffer(&self) -> Option<&B> {
        match self {
            Self::Closed => None,
            Self::Creating(buffer) | Self::Editing { buffer, .. } => Some(buffer),
        }
    }
}
