use thiserror::Error;

/// Message shown for text that is not JSON at all
pub const SYNTAX_MESSAGE: &str = "Invalid JSON syntax";
/// Fallback for schema rules without a custom message
pub const GENERIC_SCHEMA_MESSAGE: &str = "Invalid JSON schema";
/// Fallback for per-field errors without a usable custom message
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Why editor text did not yield a form schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Invalid JSON syntax")]
    Syntax { detail: String },

    #[error("{message}")]
    Violation {
        /// JSON location of the failing value, e.g. `fields[1].type`
        path: String,
        /// User-facing message
        message: String,
        /// Precise description of the failed rule
        detail: String,
    },
}

impl SchemaError {
    /// The message shown beneath the editor
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { .. } => SYNTAX_MESSAGE,
            Self::Violation { message, .. } => message.as_str(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Syntax { .. } => None,
            Self::Violation { path, .. } => Some(path.as_str()),
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            Self::Syntax { detail } | Self::Violation { detail, .. } => detail.as_str(),
        }
    }
}

/// A field's pattern could not be turned into a matcher
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid regular expression /{pattern}/: {reason}")]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

/// Rendering a validated schema failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("{source}")]
    Pattern {
        field: String,
        #[source]
        source: PatternError,
    },
}

/// Misuse of a rendered form
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("No field with id '{0}' in the current form")]
    UnknownField(String),

    #[error("The preview has no form to interact with")]
    NoForm,
}

/// Clipboard write failure (logged, never shown)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to copy JSON: {0}")]
pub struct ClipboardError(pub String);
