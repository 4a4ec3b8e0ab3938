//! JSON endpoints over the form definition validator
//!
//! Lets external authoring tools check documents with the same rules the
//! editor pane applies.

use axum::{http::StatusCode, response::IntoResponse, Json};
use formcraft_core::{format_json, FormSchema, SchemaError, SchemaValidator};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<FormSchema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ValidationReport {
    fn from_result(result: Result<FormSchema, SchemaError>) -> Self {
        match result {
            Ok(schema) => Self {
                valid: true,
                schema: Some(schema),
                error: None,
                path: None,
                detail: None,
            },
            Err(e) => Self {
                valid: false,
                schema: None,
                error: Some(e.message().to_string()),
                path: e.path().map(String::from),
                detail: Some(e.detail().to_string()),
            },
        }
    }
}

/// GET /api/schema/sample
pub async fn sample() -> impl IntoResponse {
    Json(FormSchema::sample())
}

/// POST /api/schema/validate - body is the raw document text
pub async fn validate(body: String) -> impl IntoResponse {
    let report = ValidationReport::from_result(SchemaValidator::validate(&body));
    let status = if report.valid {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(report))
}

/// POST /api/schema/format - body is the raw document text
pub async fn format(body: String) -> impl IntoResponse {
    match format_json(&body) {
        Ok(formatted) => (
            StatusCode::OK,
            Json(serde_json::json!({ "formatted": formatted })),
        ),
        Err(e) => {
            tracing::debug!(error = %e, "Format request with invalid JSON");
            (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": formcraft_core::error::SYNTAX_MESSAGE })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_violation() {
        let report = ValidationReport::from_result(SchemaValidator::validate(
            r#"{"formTitle": "", "formDescription": "", "fields": []}"#,
        ));
        assert!(!report.valid);
        assert_eq!(report.error.as_deref(), Some("Form title is required"));
        assert_eq!(report.path.as_deref(), Some("formTitle"));
    }

    #[test]
    fn test_report_for_syntax_error() {
        let report = ValidationReport::from_result(SchemaValidator::validate("{"));
        assert_eq!(report.error.as_deref(), Some("Invalid JSON syntax"));
        assert!(report.path.is_none());
        assert!(report.detail.is_some());
    }

    #[tokio::test]
    async fn test_format_rejects_invalid_json() {
        let response = format("{".to_string()).await.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
