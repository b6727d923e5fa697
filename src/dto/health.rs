use serde::Serialize;
use utoipa::ToSchema;

/// Health payload returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok" when a storage backend is installed, "degraded" otherwise.
    pub status: String,
    /// Name of the installed storage backend, absent in degraded mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,
}

impl HealthResponse {
    /// Healthy response naming the backend currently serving requests.
    pub fn ok(store: &str) -> Self {
        Self {
            status: "ok".to_string(),
            store: Some(store.to_owned()),
        }
    }

    /// Degraded response emitted while no storage backend is installed.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            store: None,
        }
    }
}
