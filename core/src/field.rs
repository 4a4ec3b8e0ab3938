//! Field Renderer
//!
//! Maps a validated [`FormField`] to the control the preview shows and to the
//! rules its value is checked against.

use serde::Serialize;

use crate::error::{PatternError, REQUIRED_MESSAGE};
use crate::pattern::FieldPattern;
use crate::schema::{FieldKind, FormField};

/// Label of the neutral first entry of every dropdown
pub const EMPTY_OPTION_LABEL: &str = "Select an option";

// ============================================================================
// Controls
// ============================================================================

/// `type` attribute of a single-line input
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Text,
    Email,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
        }
    }
}

/// One selectable entry of a dropdown or radio group
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

/// The interactive control a field renders as
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FieldControl {
    Input {
        input_type: InputType,
        placeholder: Option<String>,
    },
    /// Dropdown; the first choice is always the empty one
    Select { choices: Vec<Choice> },
    /// Exclusive choice; every button shares `group` as its name
    RadioGroup { group: String, choices: Vec<Choice> },
    TextArea { placeholder: Option<String> },
    /// Unknown field type: nothing is rendered
    Unsupported { kind: String },
}

impl FieldControl {
    pub fn is_rendered(&self) -> bool {
        !matches!(self, Self::Unsupported { .. })
    }
}

fn choices(field: &FormField) -> Vec<Choice> {
    field
        .options()
        .iter()
        .map(|o| Choice {
            value: o.value.clone(),
            label: o.label.clone(),
        })
        .collect()
}

/// Decide which control a field is displayed with
pub fn render(field: &FormField) -> FieldControl {
    match &field.kind {
        FieldKind::Text => FieldControl::Input {
            input_type: InputType::Text,
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Email => FieldControl::Input {
            input_type: InputType::Email,
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Select => {
            let mut all = vec![Choice {
                value: String::new(),
                label: EMPTY_OPTION_LABEL.to_string(),
            }];
            all.extend(choices(field));
            FieldControl::Select { choices: all }
        }
        FieldKind::Radio => FieldControl::RadioGroup {
            group: field.id.clone(),
            choices: choices(field),
        },
        FieldKind::Textarea => FieldControl::TextArea {
            placeholder: field.placeholder.clone(),
        },
        FieldKind::Unsupported(kind) => FieldControl::Unsupported { kind: kind.clone() },
    }
}

// ============================================================================
// Field Errors
// ============================================================================

/// Per-field validation failure raised while interacting with the form
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldError {
    Required,
    Pattern { message: String },
}

impl FieldError {
    /// Message shown beneath the field
    pub fn message(&self) -> &str {
        match self {
            Self::Pattern { message } if !message.is_empty() => message.as_str(),
            Self::Required | Self::Pattern { .. } => REQUIRED_MESSAGE,
        }
    }
}

// ============================================================================
// Registration Rules
// ============================================================================

/// Rules a field registers with the form
#[derive(Clone, Debug, PartialEq)]
pub struct FieldRules {
    pub required: bool,
    pub pattern: Option<(FieldPattern, String)>,
}

impl FieldRules {
    /// Derive rules from the field definition. Patterns only apply to single-line inputs.
    pub fn register(field: &FormField) -> Result<Self, PatternError> {
        let pattern = match (&field.kind, &field.validation) {
            (FieldKind::Text | FieldKind::Email, Some(v)) => {
                Some((FieldPattern::compile(&v.pattern)?, v.message.clone()))
            }
            _ => None,
        };

        Ok(Self {
            required: field.required && !matches!(field.kind, FieldKind::Unsupported(_)),
            pattern,
        })
    }

    /// Check a value; `None` means nothing was chosen (untouched radio group)
    pub fn check(&self, value: Option<&str>) -> Option<FieldError> {
        let value = value.unwrap_or_default();
        if value.is_empty() {
            return self.required.then_some(FieldError::Required);
        }

        match &self.pattern {
            Some((pattern, message)) if !pattern.test(value) => Some(FieldError::Pattern {
                message: message.clone(),
            }),
            _ => None,
        }
    }
}
