use formcraft_core::{
    format_json, FieldControl, FieldKind, FormSchema, PreviewPhase, SchemaError, SchemaValidator, Session,
    SubmitOutcome, EMPTY_MESSAGE,
};
use serde_json::json;

const EMAIL_PATTERN: &str = r"^[\w-.]+@([\w-]+\.)+[\w-]{2,4}$";

#[test]
fn test_invalid_syntax_never_updates_preview() {
    let mut session = Session::new();
    let before = session.preview().form().unwrap().schema().clone();

    for text in ["{", "{\"formTitle\": \"x\",}", "nope", "[1, 2"] {
        let mut updates = 0;
        let result = SchemaValidator::validate(text).map(|_| updates += 1);
        assert!(matches!(result, Err(SchemaError::Syntax { .. })));
        assert_eq!(updates, 0);

        session.edit(text);
        assert_eq!(session.editor().error_message(), Some("Invalid JSON syntax"));
    }

    // The preview collapsed rather than keeping the last good schema
    assert!(session.preview().is_empty());
    session.edit(FormSchema::sample().to_pretty_json());
    assert_eq!(session.preview().form().unwrap().schema(), &before);
}

#[test]
fn test_missing_title_message() -> anyhow::Result<()> {
    for doc in [
        json!({"formDescription": "d", "fields": []}),
        json!({"formTitle": "", "formDescription": "d", "fields": []}),
        json!({"formTitle": null, "formDescription": "d", "fields": []}),
    ] {
        let err = SchemaValidator::validate(&serde_json::to_string(&doc)?).unwrap_err();
        assert_eq!(err.to_string(), "Form title is required");
    }
    Ok(())
}

#[test]
fn test_unknown_type_renders_nothing() {
    let mut schema = FormSchema::sample();
    schema.fields[0].kind = FieldKind::parse("datetime");
    let form = formcraft_core::FormState::new(schema).unwrap();
    let views = form.fields();
    assert!(matches!(views[0].control, FieldControl::Unsupported { .. }));
    assert!(!form.collect().contains("name"));
}

#[test]
fn test_format_twice_is_stable() {
    let mut session = Session::with_text(r#"{"formTitle":"T","formDescription":"D","fields":[]}"#);
    assert!(session.format());
    let once = session.editor().text().to_string();
    assert!(session.format());
    assert_eq!(session.editor().text(), once);
    assert_eq!(format_json(&once).unwrap(), once);
}

#[test]
fn test_empty_name_blocks_submission() {
    let mut session = Session::new();
    let form = session.form_mut().unwrap();
    form.set_value("email", "ada@example.com").unwrap();

    let outcome = form.submit();
    assert_eq!(outcome, SubmitOutcome::Rejected { invalid: vec!["name".to_string()] });

    let views = form.fields();
    assert_eq!(views[0].error.as_deref(), Some("This field is required"));
    assert_eq!(views[1].error, None);
}

#[test]
fn test_pattern_message_is_exact() {
    let text = json!({
        "formTitle": "Signup",
        "formDescription": "",
        "fields": [{
            "id": "contact",
            "type": "email",
            "label": "Contact",
            "required": true,
            "validation": { "pattern": EMAIL_PATTERN, "message": "Use a real address, please" }
        }]
    })
    .to_string();

    let mut session = Session::with_text(text);
    let form = session.form_mut().unwrap();
    form.set_value("contact", "not-an-email").unwrap();
    assert!(!form.submit().is_accepted());
    assert_eq!(form.error("contact").unwrap().message(), "Use a real address, please");
}

#[test]
fn test_reset_keeps_displayed_schema() {
    let mut session = Session::new();
    let form = session.form_mut().unwrap();
    form.set_value("name", "Ada").unwrap();
    form.set_value("email", "broken").unwrap();
    form.submit();
    assert_eq!(form.error_count(), 1);

    let schema = form.schema().clone();
    form.reset();
    assert!(form.fields().iter().all(|f| f.value.is_none() && f.error.is_none()));
    assert_eq!(form.schema(), &schema);
    assert_eq!(session.preview().phase(), PreviewPhase::Ready);
}

#[test]
fn test_valid_to_invalid_collapses_preview() {
    let mut session = Session::new();
    assert_eq!(session.preview().phase(), PreviewPhase::Ready);

    let broken = session.editor().text().replace("\"Full Name\"", "\"\"");
    session.edit(broken);
    assert_eq!(session.editor().error_message(), Some("Label is required"));
    assert_eq!(session.preview().phase(), PreviewPhase::Empty);
    assert_eq!(EMPTY_MESSAGE, "Enter a valid schema to see the preview");
}

#[test]
fn test_accepted_submission_values() {
    let mut session = Session::new();
    let form = session.form_mut().unwrap();
    form.set_value("name", "Ada Lovelace").unwrap();
    form.set_value("email", "ada@example.com").unwrap();

    match form.submit() {
        SubmitOutcome::Accepted(values) => {
            assert_eq!(values.get("name"), Some("Ada Lovelace"));
            assert_eq!(values.get("email"), Some("ada@example.com"));
        }
        other => panic!("expected acceptance, got {other:?}"),
    }
}

fn single_text_field(pattern: &str, message: &str) -> String {
    json!({
        "formTitle": "Account",
        "formDescription": "",
        "fields": [{
            "id": "secret",
            "type": "text",
            "label": "Password",
            "required": true,
            "validation": { "pattern": pattern, "message": message }
        }]
    })
    .to_string()
}

#[test]
fn test_browser_patterns_pass_validation_and_render() {
    let mut session = Session::with_text(single_text_field(
        r"^(?=.*[A-Z])(?=.*\d).{8,}$",
        "Use 8+ characters with a capital and a digit",
    ));
    assert!(session.editor().error().is_none());
    assert!(!session.is_faulted());

    let form = session.form_mut().unwrap();
    form.set_value("secret", "lowercase1").unwrap();
    assert!(!form.submit().is_accepted());
    assert_eq!(
        form.error("secret").unwrap().message(),
        "Use 8+ characters with a capital and a digit"
    );

    form.set_value("secret", "Uppercase1").unwrap();
    assert!(form.error("secret").is_none());
    assert!(form.submit().is_accepted());

    for pattern in [r"^(\w)\1$", "a{", "[^]", r"\cJ"] {
        let session = Session::with_text(single_text_field(pattern, "m"));
        assert!(session.editor().error().is_none(), "{pattern}");
        assert_eq!(session.preview().phase(), PreviewPhase::Ready, "{pattern}");
    }
}

#[test]
fn test_uncompilable_pattern_faults_session() {
    let mut session = Session::new();
    session.edit(single_text_field("(", "Never shown"));

    assert!(session.editor().error().is_none());
    assert!(session.fault().unwrap().starts_with("Invalid regular expression /(/"));
    assert!(session.preview().is_empty());

    // Terminal until reload
    session.edit(FormSchema::sample().to_pretty_json());
    assert!(session.is_faulted());
    assert!(session.preview().is_empty());
}

#[test]
fn test_sample_email_pattern_is_ascii_only() {
    let mut session = Session::new();
    let form = session.form_mut().unwrap();
    form.set_value("name", "Zoë").unwrap();

    for address in ["zoë@exämple.com", "a@b.١٢"] {
        form.set_value("email", address).unwrap();
        assert!(!form.submit().is_accepted(), "{address}");
        assert_eq!(
            form.error("email").unwrap().message(),
            "Please enter a valid email address"
        );
    }

    form.set_value("email", "zoe@example.com").unwrap();
    assert!(form.submit().is_accepted());
}

#[test]
fn test_schema_edit_after_submit_keeps_revalidating() {
    let mut session = Session::new();
    assert!(!session.form_mut().unwrap().submit().is_accepted());

    let renamed = session.editor().text().replace("New Form", "Renamed Form");
    session.edit(renamed);

    let form = session.form_mut().unwrap();
    assert_eq!(form.title(), "Renamed Form");
    assert!(form.is_submitted());
    assert_eq!(form.error("name").unwrap().message(), "This field is required");

    form.set_value("name", "Ada").unwrap();
    assert!(form.error("name").is_none());
}
