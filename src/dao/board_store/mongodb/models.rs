use mongodb::bson::{DateTime, Document, doc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dao::models::{BoardEntity, ItemEntity};

/// Build the `_id` filter for an entity keyed by uuid.
///
/// Ids are stored as their canonical string form so documents stay readable
/// in the shell and the filter shape is unambiguous.
pub fn doc_id(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoItemDocument {
    #[serde(rename = "_id")]
    id: String,
    text: String,
    #[serde(default)]
    selected: bool,
    created_at: DateTime,
}

impl MongoItemDocument {
    /// Convert back to the shared entity, rejecting documents whose id does
    /// not parse as a uuid.
    pub fn into_entity(self) -> Result<ItemEntity, uuid::Error> {
        Ok(ItemEntity {
            id: Uuid::parse_str(&self.id)?,
            text: self.text,
            selected: self.selected,
            created_at: self.created_at.to_system_time(),
        })
    }
}

impl From<ItemEntity> for MongoItemDocument {
    fn from(value: ItemEntity) -> Self {
        Self {
            id: value.id.to_string(),
            text: value.text,
            selected: value.selected,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoBoardDocument {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    seed: String,
    created_at: DateTime,
}

impl MongoBoardDocument {
    /// Convert back to the shared entity, rejecting documents whose id does
    /// not parse as a uuid.
    pub fn into_entity(self) -> Result<BoardEntity, uuid::Error> {
        Ok(BoardEntity {
            id: Uuid::parse_str(&self.id)?,
            name: self.name,
            seed: self.seed,
            created_at: self.created_at.to_system_time(),
        })
    }
}

impl From<BoardEntity> for MongoBoardDocument {
    fn from(value: BoardEntity) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            seed: value.seed,
            created_at: DateTime::from_system_time(value.created_at),
        }
    }
}
