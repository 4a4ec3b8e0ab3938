//! Form Assembler
//!
//! Binds every field of a validated schema to its control and rules, and
//! tracks the values, errors and submit phase of the rendered form.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{FormError, RenderError};
use crate::field::{self, FieldControl, FieldError, FieldRules};
use crate::schema::{FieldKind, FormField, FormSchema};

// ============================================================================
// Submit State
// ============================================================================

/// Whether the synchronous submit handler is currently running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// How the submit button is displayed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: &'static str,
    pub disabled: bool,
}

impl SubmitPhase {
    pub fn button(self) -> SubmitButton {
        match self {
            Self::Idle => SubmitButton {
                label: "Submit",
                disabled: false,
            },
            Self::Submitting => SubmitButton {
                label: "Submitting...",
                disabled: true,
            },
        }
    }
}

/// Collected values, keyed by field id in schema order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormValues(Map<String, Value>);

impl FormValues {
    /// Value of a field; `None` for unknown ids and untouched radio groups
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).and_then(Value::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

/// Result of a submit attempt
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Every field passed; the handler received these values
    Accepted(FormValues),
    /// Submission blocked; ids of the failing fields in schema order
    Rejected { invalid: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

// ============================================================================
// Field View
// ============================================================================

/// Everything needed to draw one labeled field block
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldView {
    pub id: String,
    pub label: String,
    /// Draw the required marker after the label
    pub required: bool,
    pub control: FieldControl,
    pub value: Option<String>,
    /// Message under the field; also switches the control to its error border
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
struct RegisteredField {
    field: FormField,
    control: FieldControl,
    rules: FieldRules,
}

// ============================================================================
// Form State
// ============================================================================

/// A rendered, interactive form
#[derive(Clone, Debug)]
pub struct FormState {
    schema: FormSchema,
    fields: Vec<RegisteredField>,
    values: HashMap<String, String>,
    errors: HashMap<String, FieldError>,
    /// Set by the first submit attempt; afterwards edits re-validate
    submitted: bool,
    phase: SubmitPhase,
}

impl FormState {
    pub fn new(schema: FormSchema) -> Result<Self, RenderError> {
        let fields = schema
            .fields
            .iter()
            .map(|f| {
                let rules = FieldRules::register(f).map_err(|source| RenderError::Pattern {
                    field: f.id.clone(),
                    source,
                })?;
                Ok(RegisteredField {
                    field: f.clone(),
                    control: field::render(f),
                    rules,
                })
            })
            .collect::<Result<Vec<_>, RenderError>>()?;

        let duplicates = schema.duplicate_ids();
        if !duplicates.is_empty() {
            tracing::warn!(?duplicates, "Field ids are not unique; duplicates share one value");
        }

        Ok(Self {
            schema,
            fields,
            values: HashMap::new(),
            errors: HashMap::new(),
            submitted: false,
            phase: SubmitPhase::Idle,
        })
    }

    /// Keep entered values for ids that still exist. After a submit attempt
    /// the form keeps re-validating on change, and fields that were showing
    /// an error are checked again against their new rules.
    pub fn carry_values(&mut self, previous: &FormState) {
        for (id, value) in &previous.values {
            if self.is_known(id) {
                self.values.insert(id.clone(), value.clone());
            }
        }
        self.submitted = previous.submitted;
        for id in previous.errors.keys() {
            if self.is_known(id) {
                self.revalidate(id);
            }
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn title(&self) -> &str {
        &self.schema.form_title
    }

    pub fn description(&self) -> &str {
        &self.schema.form_description
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn submit_button(&self) -> SubmitButton {
        self.phase.button()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    fn is_known(&self, id: &str) -> bool {
        self.fields
            .iter()
            .any(|r| r.field.id == id && r.control.is_rendered())
    }

    /// Field blocks in schema order
    pub fn fields(&self) -> Vec<FieldView> {
        self.fields
            .iter()
            .map(|r| FieldView {
                id: r.field.id.clone(),
                label: r.field.label.clone(),
                required: r.field.required,
                control: r.control.clone(),
                value: self.values.get(&r.field.id).cloned(),
                error: self.errors.get(&r.field.id).map(|e| e.message().to_string()),
            })
            .collect()
    }

    pub fn value(&self, id: &str) -> Option<&str> {
        self.values.get(id).map(String::as_str)
    }

    pub fn error(&self, id: &str) -> Option<&FieldError> {
        self.errors.get(id)
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Record user input for a field
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.is_known(id) {
            return Err(FormError::UnknownField(id.to_string()));
        }
        self.values.insert(id.to_string(), value.into());
        if self.submitted {
            self.revalidate(id);
        }
        Ok(())
    }

    fn check(&self, registered: &RegisteredField) -> Option<FieldError> {
        registered
            .rules
            .check(self.values.get(&registered.field.id).map(String::as_str))
    }

    fn revalidate(&mut self, id: &str) {
        let error = self
            .fields
            .iter()
            .filter(|r| r.field.id == id)
            .find_map(|r| self.check(r));
        match error {
            Some(e) => self.errors.insert(id.to_string(), e),
            None => self.errors.remove(id),
        };
    }

    /// Run every field's rules; returns whether the form is valid
    pub fn validate(&mut self) -> bool {
        let mut errors = HashMap::new();
        for registered in &self.fields {
            if errors.contains_key(&registered.field.id) {
                continue;
            }
            if let Some(e) = self.check(registered) {
                errors.insert(registered.field.id.clone(), e);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Values as the submit handler sees them
    pub fn collect(&self) -> FormValues {
        let mut map = Map::new();
        for registered in &self.fields {
            if !registered.control.is_rendered() || map.contains_key(&registered.field.id) {
                continue;
            }
            let value = match (self.values.get(&registered.field.id), &registered.field.kind) {
                (Some(v), _) => Value::String(v.clone()),
                (None, FieldKind::Radio) => Value::Null,
                (None, _) => Value::String(String::new()),
            };
            map.insert(registered.field.id.clone(), value);
        }
        FormValues(map)
    }

    /// Submit and log the collected values
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submit_with(|values| tracing::info!("Form Data: {}", values.to_json()))
    }

    /// Submit with a custom handler, run only when every field passes
    pub fn submit_with<F>(&mut self, handler: F) -> SubmitOutcome
    where
        F: FnOnce(&FormValues),
    {
        self.submitted = true;
        if !self.validate() {
            let invalid: Vec<String> = self
                .fields
                .iter()
                .map(|r| r.field.id.clone())
                .filter(|id| self.errors.contains_key(id))
                .fold(Vec::new(), |mut acc, id| {
                    if !acc.contains(&id) {
                        acc.push(id);
                    }
                    acc
                });
            tracing::debug!(?invalid, "Submission blocked by field errors");
            return SubmitOutcome::Rejected { invalid };
        }

        let values = self.collect();
        self.phase = SubmitPhase::Submitting;
        handler(&values);
        self.phase = SubmitPhase::Idle;
        SubmitOutcome::Accepted(values)
    }

    /// Clear values, errors and the submitted flag; the schema is kept
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
        self.submitted = false;
        self.phase = SubmitPhase::Idle;
    }
}
