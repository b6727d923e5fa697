use std::time::SystemTime;

use uuid::Uuid;

use crate::{
    board::{build_board, generate_seed, seeded_shuffle},
    dao::models::BoardEntity,
    dto::{
        board::{BoardDetail, BoardSummary, CreateBoardRequest, FreshBoardResponse},
        validation::validate_seed,
    },
    error::ServiceError,
    state::SharedState,
};

/// Derive an ephemeral board from the current item list.
///
/// When the caller supplies no seed one is generated; either way the seed
/// ends up in the response so the board can be rebuilt later.
pub async fn fresh_board(
    state: &SharedState,
    seed: Option<String>,
) -> Result<FreshBoardResponse, ServiceError> {
    let seed = resolve_seed(seed)?;
    let items = current_item_texts(state).await?;
    let board = build_board(&seeded_shuffle(&items, &seed));
    Ok(FreshBoardResponse { seed, board })
}

/// Create and persist a named board definition, returning it with its grid.
pub async fn create_board(
    state: &SharedState,
    request: CreateBoardRequest,
) -> Result<BoardDetail, ServiceError> {
    let seed = resolve_seed(request.seed)?;
    let entity = BoardEntity {
        id: Uuid::new_v4(),
        name: request.name,
        seed,
        created_at: SystemTime::now(),
    };

    let store = state.require_store().await?;
    store.save_board(entity.clone()).await?;

    derive_detail(state, entity).await
}

/// Load a persisted board and derive its grid from the current item list.
pub async fn get_board(state: &SharedState, id: Uuid) -> Result<BoardDetail, ServiceError> {
    let store = state.require_store().await?;
    let Some(entity) = store.find_board(id).await? else {
        return Err(ServiceError::NotFound(format!("board `{id}` not found")));
    };

    derive_detail(state, entity).await
}

/// List every persisted board definition, without grids.
pub async fn list_boards(state: &SharedState) -> Result<Vec<BoardSummary>, ServiceError> {
    let store = state.require_store().await?;
    let boards = store.list_boards().await?;
    Ok(boards.into_iter().map(Into::into).collect())
}

async fn derive_detail(
    state: &SharedState,
    entity: BoardEntity,
) -> Result<BoardDetail, ServiceError> {
    let items = current_item_texts(state).await?;
    let board = build_board(&seeded_shuffle(&items, &entity.seed));
    Ok(BoardDetail {
        summary: entity.into(),
        board,
    })
}

/// Item texts used for board derivation, in stored order.
///
/// A store with no items yet falls back to the configured default list, so a
/// fresh deployment still serves a playable board.
async fn current_item_texts(state: &SharedState) -> Result<Vec<String>, ServiceError> {
    let store = state.require_store().await?;
    let items = store.list_items().await?;
    if items.is_empty() {
        return Ok(state.config().items().to_vec());
    }
    Ok(items.into_iter().map(|item| item.text).collect())
}

fn resolve_seed(seed: Option<String>) -> Result<String, ServiceError> {
    match seed {
        Some(seed) => {
            validate_seed(&seed)
                .map_err(|err| ServiceError::InvalidInput(format!("invalid seed: {err}")))?;
            Ok(seed)
        }
        None => Ok(generate_seed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dao::board_store::memory::MemoryStore, state::AppState};
    use std::sync::Arc;

    async fn state_with_items(labels: &[&str]) -> SharedState {
        let state = AppState::new(AppConfig::default());
        state
            .install_store(Arc::new(MemoryStore::with_items(labels)))
            .await;
        state
    }

    #[tokio::test]
    async fn fresh_board_surfaces_a_generated_seed() {
        let state = state_with_items(&["a", "b", "c"]).await;
        let response = fresh_board(&state, None).await.unwrap();
        assert!(!response.seed.is_empty());
        assert_eq!(response.board.cell(2, 2).unwrap().text, "Free");
    }

    #[tokio::test]
    async fn fresh_board_is_reproducible_from_its_seed() {
        let labels: Vec<String> = (0..24)
            .map(|i| char::from(b'a' + i as u8).to_string())
            .collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let state = state_with_items(&refs).await;
        let first = fresh_board(&state, Some("seed1".into())).await.unwrap();
        let second = fresh_board(&state, Some("seed1".into())).await.unwrap();
        assert_eq!(first.seed, "seed1");
        assert_eq!(first.board, second.board);

        let other = fresh_board(&state, Some("seed2".into())).await.unwrap();
        assert_ne!(first.board, other.board);
    }

    #[tokio::test]
    async fn malformed_seed_is_rejected() {
        let state = state_with_items(&["a"]).await;
        let err = fresh_board(&state, Some("not a seed!".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_configured_items() {
        let state = AppState::new(AppConfig::default());
        state.install_store(Arc::new(MemoryStore::new())).await;

        let response = fresh_board(&state, Some("seed1".into())).await.unwrap();
        let texts: Vec<&str> = response
            .board
            .cells()
            .map(|cell| cell.text.as_str())
            .collect();
        // Default list has exactly 24 labels, so no placeholder leaks through.
        assert!(!texts.iter().any(|text| text.starts_with("Square ")));
    }

    #[tokio::test]
    async fn boards_round_trip_through_the_store() {
        let state = state_with_items(&["a", "b"]).await;
        let created = create_board(
            &state,
            CreateBoardRequest {
                name: "game night".into(),
                seed: Some("seed1".into()),
            },
        )
        .await
        .unwrap();

        let fetched = get_board(&state, created.summary.id).await.unwrap();
        assert_eq!(fetched.summary.seed, "seed1");
        assert_eq!(fetched.board, created.board);

        let listed = list_boards(&state).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "game night");
    }

    #[tokio::test]
    async fn unknown_board_is_not_found() {
        let state = state_with_items(&[]).await;
        let err = get_board(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn degraded_state_refuses_board_requests() {
        let state = AppState::new(AppConfig::default());
        let err = fresh_board(&state, None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Degraded));
    }
}
