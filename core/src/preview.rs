use crate::error::RenderError;
use crate::form::{FormState, SubmitPhase};
use crate::schema::FormSchema;

/// Shown while there is no schema to render
pub const EMPTY_MESSAGE: &str = "Enter a valid schema to see the preview";

/// Observable state of the preview pane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewPhase {
    Empty,
    Ready,
    Submitting,
}

/// Preview pane: nothing, or one interactive form
#[derive(Clone, Debug, Default)]
pub enum Preview {
    #[default]
    Empty,
    Ready(Box<FormState>),
}

impl Preview {
    /// Replace the shown schema. `None` collapses the pane; the previous
    /// schema is dropped, not retained.
    pub fn show(&mut self, schema: Option<FormSchema>) -> Result<(), RenderError> {
        let Some(schema) = schema else {
            *self = Self::Empty;
            return Ok(());
        };

        let mut next = FormState::new(schema)?;
        if let Self::Ready(previous) = self {
            next.carry_values(previous);
        }
        *self = Self::Ready(Box::new(next));
        Ok(())
    }

    pub fn phase(&self) -> PreviewPhase {
        match self {
            Self::Empty => PreviewPhase::Empty,
            Self::Ready(form) => match form.phase() {
                SubmitPhase::Idle => PreviewPhase::Ready,
                SubmitPhase::Submitting => PreviewPhase::Submitting,
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn form(&self) -> Option<&FormState> {
        match self {
            Self::Empty => None,
            Self::Ready(form) => Some(&**form),
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        match self {
            Self::Empty => None,
            Self::Ready(form) => Some(&mut **form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transitions() {
        let mut preview = Preview::default();
        assert_eq!(preview.phase(), PreviewPhase::Empty);

        preview.show(Some(FormSchema::sample())).unwrap();
        assert_eq!(preview.phase(), PreviewPhase::Ready);
        preview.form_mut().unwrap().set_value("name", "Ada").unwrap();

        // Ready -> Ready keeps values for surviving ids
        preview.show(Some(FormSchema::sample())).unwrap();
        assert_eq!(preview.form().unwrap().value("name"), Some("Ada"));

        preview.show(None).unwrap();
        assert!(preview.is_empty());
        assert!(preview.form().is_none());

        // The dropped schema's values do not come back
        preview.show(Some(FormSchema::sample())).unwrap();
        assert_eq!(preview.form().unwrap().value("name"), None);
    }

    #[test]
    fn test_render_failure_leaves_state() {
        let mut preview = Preview::default();
        let mut schema = FormSchema::sample();
        schema.fields[1].validation.as_mut().unwrap().pattern = "[".to_string();
        assert!(preview.show(Some(schema)).is_err());
        assert!(preview.is_empty());
    }
}
