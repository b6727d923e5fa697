use uuid::Uuid;

use crate::{
    dao::models::ItemEntity,
    dto::item::{CreateItemRequest, ItemDto, UpdateItemRequest},
    error::ServiceError,
    state::SharedState,
};

/// List every stored item in insertion order.
pub async fn list_items(state: &SharedState) -> Result<Vec<ItemDto>, ServiceError> {
    let store = state.require_store().await?;
    let items = store.list_items().await?;
    Ok(items.into_iter().map(Into::into).collect())
}

/// Persist a new item from a validated request.
pub async fn add_item(
    state: &SharedState,
    request: CreateItemRequest,
) -> Result<ItemDto, ServiceError> {
    let store = state.require_store().await?;
    let entity = ItemEntity::new(request.text);
    store.add_item(entity.clone()).await?;
    Ok(entity.into())
}

/// Apply a partial update to an existing item.
pub async fn update_item(
    state: &SharedState,
    id: Uuid,
    request: UpdateItemRequest,
) -> Result<ItemDto, ServiceError> {
    let store = state.require_store().await?;
    let Some(mut entity) = store.find_item(id).await? else {
        return Err(ServiceError::NotFound(format!("item `{id}` not found")));
    };

    if let Some(text) = request.text {
        entity.text = text;
    }
    if let Some(selected) = request.selected {
        entity.selected = selected;
    }

    match store.update_item(entity).await? {
        Some(updated) => Ok(updated.into()),
        // Deleted between the read and the write; report the same way as a
        // missing id.
        None => Err(ServiceError::NotFound(format!("item `{id}` not found"))),
    }
}

/// Delete an item by id.
pub async fn delete_item(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    let store = state.require_store().await?;
    if store.delete_item(id).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("item `{id}` not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, dao::board_store::memory::MemoryStore, state::AppState};
    use std::sync::Arc;

    async fn empty_state() -> SharedState {
        let state = AppState::new(AppConfig::default());
        state.install_store(Arc::new(MemoryStore::new())).await;
        state
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let state = empty_state().await;

        let created = add_item(
            &state,
            CreateItemRequest {
                text: "Escort Mission".into(),
            },
        )
        .await
        .unwrap();
        assert!(!created.selected);

        let updated = update_item(
            &state,
            created.id,
            UpdateItemRequest {
                text: None,
                selected: Some(true),
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.text, "Escort Mission");
        assert!(updated.selected);

        delete_item(&state, created.id).await.unwrap();
        assert!(list_items(&state).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn updating_missing_item_is_not_found() {
        let state = empty_state().await;
        let err = update_item(
            &state,
            Uuid::new_v4(),
            UpdateItemRequest {
                text: Some("ghost".into()),
                selected: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn deleting_missing_item_is_not_found() {
        let state = empty_state().await;
        let err = delete_item(&state, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
