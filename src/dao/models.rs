use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

/// One bingo item label as persisted by the storage layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemEntity {
    /// Stable identifier for the item.
    pub id: Uuid,
    /// Display text placed on board cells.
    pub text: String,
    /// Selection flag kept for clients; board building ignores it.
    pub selected: bool,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}

impl ItemEntity {
    /// Build a fresh unselected item from a label.
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            selected: false,
            created_at: SystemTime::now(),
        }
    }
}

/// Board definition persisted by the storage layer.
///
/// Only the seed is stored; the grid is re-derived from the seed and the
/// current item list on every read, so boards are never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardEntity {
    /// Primary key of the board, also the room key for event delivery.
    pub id: Uuid,
    /// Display name chosen for the board.
    pub name: String,
    /// Seed used to reproduce the board's item ordering.
    pub seed: String,
    /// Creation timestamp for auditing/debugging.
    pub created_at: SystemTime,
}
