use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthChecks {
    pub validator: String,
    pub ui_assets: String,
}

pub struct HealthHandler {
    ui_available: bool,
    start_time: std::time::Instant,
}

impl HealthHandler {
    pub fn new(ui_available: bool) -> Self {
        Self {
            ui_available,
            start_time: std::time::Instant::now(),
        }
    }

    /// Basic health check - returns 200 if server is running
    pub async fn health(&self) -> impl IntoResponse {
        let uptime = self.start_time.elapsed().as_secs();
        let status = HealthStatus {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            uptime_seconds: uptime,
            checks: HealthChecks {
                validator: "ok".to_string(),
                ui_assets: if self.ui_available { "ok" } else { "missing" }.to_string(),
            },
        };

        (StatusCode::OK, Json(status))
    }

    /// Readiness check - the authoring UI can only be served once it was built
    pub async fn ready(&self) -> impl IntoResponse {
        if self.ui_available {
            (StatusCode::OK, Json(serde_json::json!({
                "status": "ready",
                "message": "Server is ready to accept requests"
            })))
        } else {
            (StatusCode::SERVICE_UNAVAILABLE, Json(serde_json::json!({
                "status": "not_ready",
                "message": "UI assets are not embedded; build the ui crate first"
            })))
        }
    }

    /// Liveness check - returns 200 if server is alive
    pub async fn live(&self) -> impl IntoResponse {
        (StatusCode::OK, Json(serde_json::json!({
            "status": "alive",
            "message": "Server is alive"
        })))
    }
}
