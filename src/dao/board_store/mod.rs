pub mod memory;
#[cfg(feature = "mongo-store")]
pub mod mongodb;

use futures::future::BoxFuture;
use uuid::Uuid;

use crate::dao::models::{BoardEntity, ItemEntity};
use crate::dao::storage::StorageResult;

/// Abstraction over the persistence layer for bingo items and boards.
///
/// Backends are pass-through CRUD; no backend interprets seeds or builds
/// grids, that stays in the service layer.
pub trait BingoStore: Send + Sync {
    /// Short backend name surfaced by health reports and logs.
    fn backend_name(&self) -> &'static str;
    /// All items in insertion order.
    fn list_items(&self) -> BoxFuture<'static, StorageResult<Vec<ItemEntity>>>;
    /// Look a single item up by id.
    fn find_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<ItemEntity>>>;
    /// Persist a new item.
    fn add_item(&self, item: ItemEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Replace an existing item, returning the stored entity or `None` when
    /// the id is unknown.
    fn update_item(&self, item: ItemEntity)
    -> BoxFuture<'static, StorageResult<Option<ItemEntity>>>;
    /// Delete an item, returning whether it existed.
    fn delete_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>>;
    /// Persist a board definition (insert or replace).
    fn save_board(&self, board: BoardEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Look a board definition up by id.
    fn find_board(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>>;
    /// All board definitions in creation order.
    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<BoardEntity>>>;
    /// Verify the backend is reachable.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
