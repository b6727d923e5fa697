use std::convert::Infallible;

use axum::{
    Router,
    extract::{Path, State},
    response::sse::Sse,
    routing::get,
};
use futures::Stream;
use tracing::info;
use uuid::Uuid;

use crate::{services::sse_service, state::SharedState};

#[utoipa::path(
    get,
    path = "/boards/{id}/events",
    tag = "events",
    params(("id" = Uuid, Path, description = "Board room to mirror")),
    responses((status = 200, description = "Board room event stream", content_type = "text/event-stream", body = String))
)]
/// Stream a board room's relay events to a read-only viewer.
pub async fn board_stream(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Sse<impl Stream<Item = Result<axum::response::sse::Event, Infallible>>> {
    let receiver = sse_service::subscribe_room(&state, id);
    info!(board_id = %id, "new board SSE connection");
    sse_service::to_sse_stream(receiver, state, id)
}

/// Configure the SSE endpoint.
pub fn router() -> Router<SharedState> {
    Router::<SharedState>::new().route("/boards/{id}/events", get(board_stream))
}
