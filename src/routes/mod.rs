use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

pub mod board;
pub mod health;
pub mod item;
pub mod sse;
pub mod websocket;

/// Compose all route trees, wiring in shared state and the Swagger UI.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(board::router())
        .merge(item::router())
        .merge(sse::router())
        .merge(websocket::router())
        .with_state(state);

    let docs_router: Router<()> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    api_router.merge(docs_router)
}
