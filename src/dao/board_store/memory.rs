//! In-process store used when no remote backend is configured, and as the
//! test double for the service layer.

use std::sync::Arc;

use futures::future::BoxFuture;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::dao::board_store::BingoStore;
use crate::dao::models::{BoardEntity, ItemEntity};
use crate::dao::storage::StorageResult;

/// Item and board storage kept entirely in memory.
///
/// Insertion order is preserved so boards built from the item list stay
/// stable between calls, matching what a query ordered by creation time
/// would return from a real database.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    items: IndexMap<Uuid, ItemEntity>,
    boards: IndexMap<Uuid, BoardEntity>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one item per label.
    pub fn with_items<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut items = IndexMap::new();
        for label in labels {
            let item = ItemEntity::new(label.as_ref().to_owned());
            items.insert(item.id, item);
        }
        Self {
            inner: Arc::new(RwLock::new(MemoryInner {
                items,
                boards: IndexMap::new(),
            })),
        }
    }
}

impl BingoStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn list_items(&self) -> BoxFuture<'static, StorageResult<Vec<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let guard = store.inner.read().await;
            Ok(guard.items.values().cloned().collect())
        })
    }

    fn find_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let guard = store.inner.read().await;
            Ok(guard.items.get(&id).cloned())
        })
    }

    fn add_item(&self, item: ItemEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            guard.items.insert(item.id, item);
            Ok(())
        })
    }

    fn update_item(
        &self,
        item: ItemEntity,
    ) -> BoxFuture<'static, StorageResult<Option<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            match guard.items.get_mut(&item.id) {
                Some(slot) => {
                    *slot = item.clone();
                    Ok(Some(item))
                }
                None => Ok(None),
            }
        })
    }

    fn delete_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            // shift_remove keeps the remaining insertion order intact.
            Ok(guard.items.shift_remove(&id).is_some())
        })
    }

    fn save_board(&self, board: BoardEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            let mut guard = store.inner.write().await;
            guard.boards.insert(board.id, board);
            Ok(())
        })
    }

    fn find_board(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let guard = store.inner.read().await;
            Ok(guard.boards.get(&id).cloned())
        })
    }

    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            let guard = store.inner.read().await;
            Ok(guard.boards.values().cloned().collect())
        })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        Box::pin(async { Ok(()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn items_come_back_in_insertion_order() {
        let store = MemoryStore::with_items(&["one", "two", "three"]);
        let items = store.list_items().await.unwrap();
        let texts: Vec<&str> = items.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn update_unknown_item_returns_none() {
        let store = MemoryStore::new();
        let orphan = ItemEntity::new("ghost".into());
        assert!(store.update_item(orphan).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_the_item_existed() {
        let store = MemoryStore::with_items(&["one"]);
        let id = store.list_items().await.unwrap()[0].id;
        assert!(store.delete_item(id).await.unwrap());
        assert!(!store.delete_item(id).await.unwrap());
        assert!(store.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn boards_round_trip_by_id() {
        let store = MemoryStore::new();
        let board = BoardEntity {
            id: Uuid::new_v4(),
            name: "friday night".into(),
            seed: "abc123".into(),
            created_at: std::time::SystemTime::now(),
        };
        store.save_board(board.clone()).await.unwrap();
        assert_eq!(store.find_board(board.id).await.unwrap(), Some(board));
        assert!(
            store
                .find_board(Uuid::new_v4())
                .await
                .unwrap()
                .is_none()
        );
    }
}
