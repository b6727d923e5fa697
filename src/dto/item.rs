use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{dao::models::ItemEntity, dto::format_system_time};

#[derive(Debug, Serialize, ToSchema)]
/// Item representation returned to clients.
pub struct ItemDto {
    /// Stable identifier for the item.
    pub id: Uuid,
    /// Display text placed on board cells.
    pub text: String,
    /// Client-side selection flag; never consumed by board building.
    pub selected: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

impl From<ItemEntity> for ItemDto {
    fn from(value: ItemEntity) -> Self {
        Self {
            id: value.id,
            text: value.text,
            selected: value.selected,
            created_at: format_system_time(value.created_at),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
/// Payload used to create a new item.
pub struct CreateItemRequest {
    /// Display text for the new item.
    #[validate(length(min = 1, max = 128))]
    pub text: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
/// Partial update for an existing item; omitted fields are left unchanged.
pub struct UpdateItemRequest {
    /// New display text.
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub text: Option<String>,
    /// New selection flag.
    #[serde(default)]
    pub selected: Option<bool>,
}
