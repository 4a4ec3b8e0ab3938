//! File-based subcommands sharing the editor's validator and formatter

use anyhow::Context;
use formcraft_core::{format_json, FormSchema, SchemaValidator};
use std::fs;
use std::path::Path;

/// Validate a document; the summary line on success, an error otherwise
pub fn validate_file(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match SchemaValidator::validate(&text) {
        Ok(schema) => Ok(format!(
            "{}: valid form \"{}\" with {} field(s)",
            path.display(),
            schema.form_title,
            schema.fields.len()
        )),
        Err(e) => match e.path() {
            Some(at) if !at.is_empty() => {
                anyhow::bail!("{}: {} at {} ({})", path.display(), e, at, e.detail())
            }
            _ => anyhow::bail!("{}: {} ({})", path.display(), e, e.detail()),
        },
    }
}

/// Pretty-print a document. With `write` the file is rewritten in place.
pub fn format_file(path: &Path, write: bool) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let formatted = format_json(&text)
        .map_err(|e| anyhow::anyhow!("{}: Invalid JSON syntax ({})", path.display(), e))?;

    if write {
        fs::write(path, format!("{}\n", formatted))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Formatted in place");
    }
    Ok(formatted)
}

/// The document the editor starts with
pub fn sample() -> String {
    FormSchema::sample().to_pretty_json()
}
