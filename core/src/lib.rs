//! # Formcraft Core
//!
//! Validation and rendering model for JSON form definitions.
//!
//! A form definition is typed into an editor, validated against a fixed
//! structural contract, and rendered as an interactive form preview:
//!
//! ```rust
//! use formcraft_core::{SchemaValidator, Session};
//!
//! let schema = SchemaValidator::validate(r#"{
//!     "formTitle": "Feedback",
//!     "formDescription": "Tell us what you think",
//!     "fields": [
//!         { "id": "comment", "type": "textarea", "label": "Comment", "required": true }
//!     ]
//! }"#).unwrap();
//! assert_eq!(schema.fields.len(), 1);
//!
//! let mut session = Session::new();
//! session.edit("{ not json");
//! assert_eq!(session.editor().error_message(), Some("Invalid JSON syntax"));
//! assert!(session.preview().is_empty());
//! ```
//!
//! ## Modules
//!
//! - **schema**: document types (`FormSchema`, `FormField`, `FieldKind`)
//! - **validator**: first-violation structural validation
//! - **field**: control selection and registration rules per field
//! - **form**: values, errors, submit and reset of a rendered form
//! - **preview**: empty/ready state of the preview pane
//! - **editor**: editor text, formatting and copy indicator
//! - **session**: editor and preview wired together

pub mod editor;
pub mod error;
pub mod field;
pub mod form;
pub mod pattern;
pub mod preview;
pub mod schema;
pub mod session;
pub mod validator;

pub use editor::{format_json, CopyStatus, Editor, COPY_FEEDBACK};
pub use error::{ClipboardError, FormError, PatternError, RenderError, SchemaError};
pub use field::{Choice, FieldControl, FieldError, FieldRules, InputType};
pub use form::{FieldView, FormState, FormValues, SubmitButton, SubmitOutcome, SubmitPhase};
pub use preview::{Preview, PreviewPhase, EMPTY_MESSAGE};
pub use schema::{FieldKind, FieldOption, FieldValidation, FormField, FormSchema};
pub use session::{Session, FAULT_TITLE};
pub use validator::SchemaValidator;
