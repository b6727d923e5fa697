use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report the installed backend's health, logging connectivity issues.
///
/// A failing ping is logged but does not flip the status by itself; the
/// storage supervisor clears the store slot when the backend is really gone
/// and that is what degrades the response.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Ok(store) = state.require_store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded();
    };

    if let Err(err) = store.health_check().await {
        warn!(backend = store.backend_name(), error = %err, "storage health check failed");
    }

    HealthResponse::ok(store.backend_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dao::board_store::memory::MemoryStore, state::AppState};
    use std::sync::Arc;

    #[tokio::test]
    async fn reports_degraded_without_a_store() {
        let state = AppState::new(AppConfig::default());
        let response = health_status(&state).await;
        assert_eq!(response.status, "degraded");
        assert!(response.store.is_none());
    }

    #[tokio::test]
    async fn reports_the_installed_backend_by_name() {
        let state = AppState::new(AppConfig::default());
        state.install_store(Arc::new(MemoryStore::new())).await;

        let response = health_status(&state).await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.store.as_deref(), Some("memory"));
    }
}
