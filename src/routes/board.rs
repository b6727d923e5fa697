use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{
        board::{
            BoardDetail, BoardSummary, CreateBoardRequest, EventAck, FreshBoardQuery,
            FreshBoardResponse,
        },
        validation::validate_cell_id,
        ws::BoardEvent,
    },
    error::AppError,
    services::board_service,
    state::SharedState,
};

/// Routes handling board derivation, persistence, and HTTP event triggers.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/board", get(fresh_board))
        .route("/boards", post(create_board).get(list_boards))
        .route("/boards/{id}", get(get_board))
        .route("/boards/{id}/cells/{cell_id}/toggle", post(toggle_cell))
        .route("/boards/{id}/cells/{cell_id}/select", post(select_cell))
        .route("/boards/{id}/reset", post(reset_board))
        .route("/boards/{id}/visibility", post(toggle_visibility))
}

#[utoipa::path(
    get,
    path = "/board",
    tag = "board",
    params(FreshBoardQuery),
    responses((status = 200, description = "Ephemeral board with the seed used", body = FreshBoardResponse))
)]
/// Derive an ephemeral board from the current item list.
pub async fn fresh_board(
    State(state): State<SharedState>,
    Query(query): Query<FreshBoardQuery>,
) -> Result<Json<FreshBoardResponse>, AppError> {
    let response = board_service::fresh_board(&state, query.seed).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/boards",
    tag = "board",
    request_body = CreateBoardRequest,
    responses((status = 200, description = "Board created", body = BoardDetail))
)]
/// Create and persist a named board definition.
pub async fn create_board(
    State(state): State<SharedState>,
    Json(payload): Json<CreateBoardRequest>,
) -> Result<Json<BoardDetail>, AppError> {
    payload.validate()?;
    let detail = board_service::create_board(&state, payload).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    get,
    path = "/boards",
    tag = "board",
    responses((status = 200, description = "All board definitions", body = [BoardSummary]))
)]
/// List every persisted board definition.
pub async fn list_boards(
    State(state): State<SharedState>,
) -> Result<Json<Vec<BoardSummary>>, AppError> {
    let boards = board_service::list_boards(&state).await?;
    Ok(Json(boards))
}

#[utoipa::path(
    get,
    path = "/boards/{id}",
    tag = "board",
    params(("id" = Uuid, Path, description = "Identifier of the board")),
    responses((status = 200, description = "Board with its derived grid", body = BoardDetail))
)]
/// Fetch a persisted board, deriving its grid from the current item list.
pub async fn get_board(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BoardDetail>, AppError> {
    let detail = board_service::get_board(&state, id).await?;
    Ok(Json(detail))
}

#[utoipa::path(
    post,
    path = "/boards/{id}/cells/{cell_id}/toggle",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "Board room to publish into"),
        ("cell_id" = String, Path, description = "Cell identifier, r{row}-c{col}")
    ),
    responses((status = 200, description = "Event published", body = EventAck))
)]
/// Publish a cell-toggle event into a board's room.
pub async fn toggle_cell(
    State(state): State<SharedState>,
    Path((id, cell_id)): Path<(Uuid, String)>,
) -> Result<Json<EventAck>, AppError> {
    publish_cell_event(&state, id, cell_id, |cell_id| BoardEvent::ToggleCell {
        cell_id,
    })
}

#[utoipa::path(
    post,
    path = "/boards/{id}/cells/{cell_id}/select",
    tag = "events",
    params(
        ("id" = Uuid, Path, description = "Board room to publish into"),
        ("cell_id" = String, Path, description = "Cell identifier, r{row}-c{col}")
    ),
    responses((status = 200, description = "Event published", body = EventAck))
)]
/// Publish a cell-select event into a board's room.
pub async fn select_cell(
    State(state): State<SharedState>,
    Path((id, cell_id)): Path<(Uuid, String)>,
) -> Result<Json<EventAck>, AppError> {
    publish_cell_event(&state, id, cell_id, |cell_id| BoardEvent::SelectCell {
        cell_id,
    })
}

#[utoipa::path(
    post,
    path = "/boards/{id}/reset",
    tag = "events",
    params(("id" = Uuid, Path, description = "Board room to publish into")),
    responses((status = 200, description = "Event published", body = EventAck))
)]
/// Publish a board-reset event into a board's room.
pub async fn reset_board(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Json<EventAck> {
    let delivered = state.rooms().publish(id, BoardEvent::ResetBoard);
    Json(EventAck { delivered })
}

#[utoipa::path(
    post,
    path = "/boards/{id}/visibility",
    tag = "events",
    params(("id" = Uuid, Path, description = "Board room to publish into")),
    responses((status = 200, description = "Event published", body = EventAck))
)]
/// Publish a visibility-toggle event into a board's room.
pub async fn toggle_visibility(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Json<EventAck> {
    let delivered = state.rooms().publish(id, BoardEvent::ToggleVisibility);
    Json(EventAck { delivered })
}

/// Validate the cell id and publish a cell-scoped event. The relay itself
/// keeps no state; only the id shape is checked.
fn publish_cell_event(
    state: &SharedState,
    board_id: Uuid,
    cell_id: String,
    make_event: fn(String) -> BoardEvent,
) -> Result<Json<EventAck>, AppError> {
    validate_cell_id(&cell_id)
        .map_err(|err| AppError::BadRequest(format!("invalid cell id: {err}")))?;
    let delivered = state.rooms().publish(board_id, make_event(cell_id));
    Ok(Json(EventAck { delivered }))
}
