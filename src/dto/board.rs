use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    board::Board,
    dao::models::BoardEntity,
    dto::format_system_time,
    dto::validation::validate_seed,
};

#[derive(Debug, Deserialize, IntoParams)]
/// Query parameters accepted by the ephemeral board endpoint.
pub struct FreshBoardQuery {
    /// Seed to reproduce a previous board; generated when absent.
    pub seed: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// An ephemeral board derived from the current item list.
///
/// The seed is always echoed back so the exact board can be rebuilt later,
/// e.g. through a shareable link.
pub struct FreshBoardResponse {
    /// Seed that produced this grid.
    pub seed: String,
    /// The derived 5x5 grid.
    pub board: Board,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
/// Payload used to create a persistent named board.
pub struct CreateBoardRequest {
    /// Display name for the board.
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    /// Optional fixed seed; generated when absent.
    #[serde(default)]
    #[validate(custom(function = validate_seed))]
    pub seed: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
/// Board metadata without the derived grid.
pub struct BoardSummary {
    /// Board identifier, also the room key for event delivery.
    pub id: Uuid,
    /// Display name of the board.
    pub name: String,
    /// Seed the grid is derived from.
    pub seed: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<BoardEntity> for BoardSummary {
    fn from(value: BoardEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            seed: value.seed,
            created_at: format_system_time(value.created_at),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
/// Full board representation: metadata plus the freshly derived grid.
pub struct BoardDetail {
    /// Board metadata.
    #[serde(flatten)]
    pub summary: BoardSummary,
    /// Grid derived from the board's seed and the current item list.
    pub board: Board,
}

#[derive(Debug, Serialize, ToSchema)]
/// Acknowledgement returned by the HTTP event-trigger endpoints.
pub struct EventAck {
    /// Number of room subscribers the event was handed to.
    pub delivered: usize,
}
