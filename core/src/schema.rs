//! Form definition document types
//!
//! These mirror the JSON contract authored in the editor pane. Field names are
//! serialised exactly as external authoring tools produce them
//! (`formTitle`, `formDescription`, `fields`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Form Schema
// ============================================================================

/// Root form definition document
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub form_title: String,
    pub form_description: String,
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// The two-field document the editor starts with
    pub fn sample() -> Self {
        Self {
            form_title: "New Form".to_string(),
            form_description: "Please fill out this form".to_string(),
            fields: vec![
                FormField {
                    id: "name".to_string(),
                    kind: FieldKind::Text,
                    label: "Full Name".to_string(),
                    required: true,
                    placeholder: Some("Enter your full name".to_string()),
                    options: None,
                    validation: None,
                },
                FormField {
                    id: "email".to_string(),
                    kind: FieldKind::Email,
                    label: "Email Address".to_string(),
                    required: true,
                    placeholder: Some("Enter your email".to_string()),
                    options: None,
                    validation: Some(FieldValidation {
                        pattern: r"^[\w-\.]+@([\w-]+\.)+[\w-]{2,4}$".to_string(),
                        message: "Please enter a valid email address".to_string(),
                    }),
                },
            ],
        }
    }

    /// Pretty-printed JSON text of this schema (2-space indentation)
    pub fn to_pretty_json(&self) -> String {
        // Plain data with string keys cannot fail to serialise.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Look up a field by id (first match wins)
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Ids that occur more than once, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        let mut dups: Vec<&str> = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) && !dups.contains(&field.id.as_str()) {
                dups.push(field.id.as_str());
            }
        }
        dups
    }
}

// ============================================================================
// Form Field
// ============================================================================

/// One input definition
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl FormField {
    /// Options as a slice (empty when absent)
    pub fn options(&self) -> &[FieldOption] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Choice entry for select and radio fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: String,
}

/// Regex constraint for text and email fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValidation {
    /// ECMAScript regex source
    pub pattern: String,
    pub message: String,
}

// ============================================================================
// Field Kind
// ============================================================================

/// Input type of a field
///
/// Anything outside the five known type names is kept as `Unsupported` so the
/// renderer can skip it explicitly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldKind {
    Text,
    Email,
    Select,
    Radio,
    Textarea,
    Unsupported(String),
}

impl FieldKind {
    /// The type names accepted by the validator
    pub const KNOWN: [&'static str; 5] = ["text", "email", "select", "radio", "textarea"];

    pub fn parse(name: &str) -> Self {
        match name {
            "text" => Self::Text,
            "email" => Self::Email,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "textarea" => Self::Textarea,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::Textarea => "textarea",
            Self::Unsupported(name) => name.as_str(),
        }
    }

    /// Whether the field is a choice among `options`
    pub fn needs_options(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl From<String> for FieldKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<FieldKind> for String {
    fn from(kind: FieldKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
