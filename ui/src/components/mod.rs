pub mod form_preview;
pub mod json_editor;
