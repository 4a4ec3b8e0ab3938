//! Authoring session: editor pane + preview pane
//!
//! Every edit is validated synchronously; a successful validation replaces
//! the preview's schema and a failed one collapses the preview. A render
//! failure puts the whole session into a terminal fault state.

use crate::editor::Editor;
use crate::error::{ClipboardError, FormError, RenderError};
use crate::form::FormState;
use crate::preview::Preview;
use crate::schema::FormSchema;

/// Heading of the catch-all fault panel
pub const FAULT_TITLE: &str = "Something went wrong";

#[derive(Clone, Debug)]
pub struct Session {
    editor: Editor,
    preview: Preview,
    fault: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start with the sample document, already validated
    pub fn new() -> Self {
        Self::with_text(FormSchema::sample().to_pretty_json())
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut session = Self {
            editor: Editor::new(text),
            preview: Preview::Empty,
            fault: None,
        };
        let mut validated = None;
        let _ = session.editor.validate(|schema| validated = Some(schema));
        session.show(validated);
        session
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Message of the fault that stopped the session, if any
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn is_faulted(&self) -> bool {
        self.fault.is_some()
    }

    /// Text changed in the editor pane
    pub fn edit(&mut self, text: impl Into<String>) {
        if self.is_faulted() {
            return;
        }
        let mut validated = None;
        let _ = self.editor.change(text, |schema| validated = Some(schema));
        self.show(validated);
    }

    /// "Format JSON"; the preview is not touched
    pub fn format(&mut self) -> bool {
        if self.is_faulted() {
            return false;
        }
        self.editor.format()
    }

    /// Clipboard outcome for "Copy JSON"; see [`Editor::copy_finished`]
    pub fn copy_finished(&mut self, result: Result<(), ClipboardError>) -> Option<u64> {
        self.editor.copy_finished(result)
    }

    pub fn copy_expired(&mut self, ticket: u64) {
        self.editor.copy_expired(ticket);
    }

    /// The interactive form, when the preview shows one
    pub fn form_mut(&mut self) -> Result<&mut FormState, FormError> {
        if self.is_faulted() {
            return Err(FormError::NoForm);
        }
        self.preview.form_mut().ok_or(FormError::NoForm)
    }

    fn show(&mut self, schema: Option<FormSchema>) {
        if let Err(e) = self.preview.show(schema) {
            self.fail(e);
        }
    }

    fn fail(&mut self, error: RenderError) {
        tracing::error!(error = %error, "Uncaught error while rendering the preview");
        self.preview = Preview::Empty;
        self.fault = Some(error.to_string());
    }
}
