//! Editor pane state
//!
//! Holds the raw document text, the current validation message and the
//! "copied" indicator. Widget mechanics (caret, highlighting) live in the UI.

use serde_json::{Number, Value};
use std::time::Duration;

use crate::error::{ClipboardError, SchemaError};
use crate::schema::FormSchema;
use crate::validator::SchemaValidator;

/// How long the "copied" indicator stays on after a successful copy
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Re-serialise JSON text with 2-space indentation, keeping key order.
/// Whole floats are written as integers (`1.0` and `1e2` become `1` and
/// `100`), the way a browser prints them.
pub fn format_json(json: &str) -> Result<String, serde_json::Error> {
    let mut value: serde_json::Value = serde_json::from_str(json)?;
    normalize_numbers(&mut value);
    serde_json::to_string_pretty(&value)
}

fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(int) = n.as_f64().and_then(integral) {
                *n = Number::from(int);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        _ => {}
    }
}

fn integral(f: f64) -> Option<i64> {
    // i64::MAX is not exactly representable; stay strictly below 2^63
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && f.abs() < LIMIT).then(|| f as i64)
}

/// Count lines in text (at least one)
pub fn count_lines(text: &str) -> usize {
    text.lines().count().max(1)
}

/// Copy indicator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyStatus {
    #[default]
    Idle,
    /// Copied; `ticket` identifies the copy so only its own timer clears it
    Copied { ticket: u64 },
}

#[derive(Clone, Debug, Default)]
pub struct Editor {
    text: String,
    error: Option<SchemaError>,
    copy: CopyStatus,
    copies: u64,
}

impl Editor {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn error(&self) -> Option<&SchemaError> {
        self.error.as_ref()
    }

    /// Message shown under the editor, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(SchemaError::message)
    }

    pub fn line_count(&self) -> usize {
        count_lines(&self.text)
    }

    /// Replace the text and validate it. `on_update` receives the schema only
    /// when validation succeeds.
    pub fn change<F>(&mut self, text: impl Into<String>, on_update: F) -> Result<(), SchemaError>
    where
        F: FnOnce(FormSchema),
    {
        self.text = text.into();
        self.validate(on_update)
    }

    /// Validate the current text
    pub fn validate<F>(&mut self, on_update: F) -> Result<(), SchemaError>
    where
        F: FnOnce(FormSchema),
    {
        match SchemaValidator::validate(&self.text) {
            Ok(schema) => {
                self.error = None;
                on_update(schema);
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Pretty-print the text in place. Unparsable text is left untouched.
    pub fn format(&mut self) -> bool {
        match format_json(&self.text) {
            Ok(formatted) => {
                self.text = formatted;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Invalid JSON");
                false
            }
        }
    }

    /// Text handed to the clipboard, verbatim
    pub fn copy_text(&self) -> &str {
        &self.text
    }

    pub fn copy_status(&self) -> CopyStatus {
        self.copy
    }

    pub fn is_copied(&self) -> bool {
        matches!(self.copy, CopyStatus::Copied { .. })
    }

    /// Record the outcome of a clipboard write. Returns the ticket to pass to
    /// [`Editor::copy_expired`] once [`COPY_FEEDBACK`] has elapsed.
    pub fn copy_finished(&mut self, result: Result<(), ClipboardError>) -> Option<u64> {
        match result {
            Ok(()) => {
                self.copies += 1;
                self.copy = CopyStatus::Copied {
                    ticket: self.copies,
                };
                Some(self.copies)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Clipboard write failed");
                None
            }
        }
    }

    /// Clear the indicator unless a later copy replaced it
    pub fn copy_expired(&mut self, ticket: u64) {
        if self.copy == (CopyStatus::Copied { ticket }) {
            self.copy = CopyStatus::Idle;
        }
    }
}
