use futures::{TryStreamExt, future::BoxFuture};
use mongodb::{Collection, Database, IndexModel, bson::doc, options::IndexOptions};
use tracing::warn;
use uuid::Uuid;

use super::{
    config::MongoConfig,
    connection::establish_connection,
    error::{MongoDaoError, MongoResult},
    models::{MongoBoardDocument, MongoItemDocument, doc_id},
};
use crate::dao::{
    board_store::BingoStore,
    models::{BoardEntity, ItemEntity},
    storage::StorageResult,
};

const ITEM_COLLECTION_NAME: &str = "items";
const BOARD_COLLECTION_NAME: &str = "boards";

/// MongoDB-backed implementation of [`BingoStore`].
///
/// Cloning is cheap; the database handle keeps its client alive.
#[derive(Clone)]
pub struct MongoBingoStore {
    database: Database,
}

impl MongoBingoStore {
    /// Establish a connection to MongoDB and ensure indexes are present.
    pub async fn connect(config: MongoConfig) -> MongoResult<Self> {
        let database = establish_connection(&config.options, &config.database_name).await?;

        let store = Self { database };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> MongoResult<()> {
        let collection = self
            .database
            .collection::<mongodb::bson::Document>(BOARD_COLLECTION_NAME);
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .name(Some("board_name_idx".to_owned()))
                    .build(),
            )
            .build();

        collection
            .create_index(index)
            .await
            .map_err(|source| MongoDaoError::EnsureIndex {
                collection: BOARD_COLLECTION_NAME,
                index: "name",
                source,
            })?;

        Ok(())
    }

    fn item_collection(&self) -> Collection<MongoItemDocument> {
        self.database
            .collection::<MongoItemDocument>(ITEM_COLLECTION_NAME)
    }

    fn board_collection(&self) -> Collection<MongoBoardDocument> {
        self.database
            .collection::<MongoBoardDocument>(BOARD_COLLECTION_NAME)
    }

    async fn ping(&self) -> MongoResult<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|source| MongoDaoError::HealthPing { source })?;
        Ok(())
    }

    async fn list_items(&self) -> MongoResult<Vec<ItemEntity>> {
        let collection = self.item_collection();
        let documents: Vec<MongoItemDocument> = collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|source| MongoDaoError::ListItems { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListItems { source })?;

        Ok(parse_entities(documents, MongoItemDocument::into_entity))
    }

    async fn find_item(&self, id: Uuid) -> MongoResult<Option<ItemEntity>> {
        let collection = self.item_collection();
        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadItem { id, source })?;

        Ok(document.and_then(|doc| doc.into_entity().ok()))
    }

    async fn add_item(&self, item: ItemEntity) -> MongoResult<()> {
        let id = item.id;
        let collection = self.item_collection();
        collection
            .insert_one(MongoItemDocument::from(item))
            .await
            .map_err(|source| MongoDaoError::SaveItem { id, source })?;
        Ok(())
    }

    async fn update_item(&self, item: ItemEntity) -> MongoResult<Option<ItemEntity>> {
        let id = item.id;
        let collection = self.item_collection();
        let replaced = collection
            .find_one_and_replace(doc_id(id), MongoItemDocument::from(item.clone()))
            .await
            .map_err(|source| MongoDaoError::SaveItem { id, source })?;

        Ok(replaced.map(|_| item))
    }

    async fn delete_item(&self, id: Uuid) -> MongoResult<bool> {
        let collection = self.item_collection();
        let outcome = collection
            .delete_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::DeleteItem { id, source })?;
        Ok(outcome.deleted_count > 0)
    }

    async fn save_board(&self, board: BoardEntity) -> MongoResult<()> {
        let id = board.id;
        let collection = self.board_collection();
        collection
            .replace_one(doc_id(id), MongoBoardDocument::from(board))
            .upsert(true)
            .await
            .map_err(|source| MongoDaoError::SaveBoard { id, source })?;
        Ok(())
    }

    async fn find_board(&self, id: Uuid) -> MongoResult<Option<BoardEntity>> {
        let collection = self.board_collection();
        let document = collection
            .find_one(doc_id(id))
            .await
            .map_err(|source| MongoDaoError::LoadBoard { id, source })?;

        Ok(document.and_then(|doc| doc.into_entity().ok()))
    }

    async fn list_boards(&self) -> MongoResult<Vec<BoardEntity>> {
        let collection = self.board_collection();
        let documents: Vec<MongoBoardDocument> = collection
            .find(doc! {})
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(|source| MongoDaoError::ListBoards { source })?
            .try_collect()
            .await
            .map_err(|source| MongoDaoError::ListBoards { source })?;

        Ok(parse_entities(documents, MongoBoardDocument::into_entity))
    }
}

/// Convert fetched documents, skipping entries whose stored id is not a
/// valid uuid rather than failing the whole listing.
fn parse_entities<D, E>(
    documents: Vec<D>,
    convert: impl Fn(D) -> Result<E, uuid::Error>,
) -> Vec<E> {
    let mut entities = Vec::with_capacity(documents.len());
    for document in documents {
        match convert(document) {
            Ok(entity) => entities.push(entity),
            Err(err) => warn!(error = %err, "skipping document with malformed id"),
        }
    }
    entities
}

impl BingoStore for MongoBingoStore {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    fn list_items(&self) -> BoxFuture<'static, StorageResult<Vec<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_items().await.map_err(Into::into) })
    }

    fn find_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_item(id).await.map_err(Into::into) })
    }

    fn add_item(&self, item: ItemEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.add_item(item).await.map_err(Into::into) })
    }

    fn update_item(
        &self,
        item: ItemEntity,
    ) -> BoxFuture<'static, StorageResult<Option<ItemEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.update_item(item).await.map_err(Into::into) })
    }

    fn delete_item(&self, id: Uuid) -> BoxFuture<'static, StorageResult<bool>> {
        let store = self.clone();
        Box::pin(async move { store.delete_item(id).await.map_err(Into::into) })
    }

    fn save_board(&self, board: BoardEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.save_board(board).await.map_err(Into::into) })
    }

    fn find_board(&self, id: Uuid) -> BoxFuture<'static, StorageResult<Option<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_board(id).await.map_err(Into::into) })
    }

    fn list_boards(&self) -> BoxFuture<'static, StorageResult<Vec<BoardEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.list_boards().await.map_err(Into::into) })
    }

    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}
