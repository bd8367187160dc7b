pub mod mongo_repository;
pub mod test_repository;

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};

use crate::error;

pub trait Entity {
    fn id(&self) -> ObjectId;
}

/// Document collection keyed by the entity's `id` field.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Returns `false` without writing when an item with the same id exists.
    async fn insert(&self, item: &T) -> error::Result<bool>;
    async fn find_all(&self) -> error::Result<Vec<T>>;
    /// Sets `fields` on the first document where `field == value` in a single
    /// write. Returns whether a document matched.
    async fn update_fields(&self, field: &str, value: &Bson, fields: Document)
        -> error::Result<bool>;
}

pub type RepositoryObject<T> = Arc<dyn Repository<T>>;
