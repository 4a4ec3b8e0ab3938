use axum::{
    http::{header, StatusCode, Uri},
    response::IntoResponse,
};
use rust_embed::RustEmbed;

/// Output of the ui crate's `trunk build`
#[derive(RustEmbed)]
#[folder = "ui/dist"]
#[allow_missing = true]
struct Asset;

pub struct UIHandler;

impl UIHandler {
    /// Whether the UI build was embedded into this binary
    pub fn is_available() -> bool {
        Asset::get("index.html").is_some()
    }

    pub async fn serve(uri: Uri) -> impl IntoResponse {
        let path = uri.path().trim_start_matches('/');

        let path = if path.is_empty() { "index.html" } else { path };

        match Asset::get(path) {
            Some(content) => {
                let mime = mime_guess::from_path(path).first_or_octet_stream();
                ([(header::CONTENT_TYPE, mime.as_ref().to_string())], content.data).into_response()
            }
            None => {
                // Single page: unknown paths get the app shell
                if let Some(content) = Asset::get("index.html") {
                    ([(header::CONTENT_TYPE, "text/html".to_string())], content.data).into_response()
                } else {
                    tracing::debug!(path, "UI assets not embedded");
                    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
                }
            }
        }
    }
}
