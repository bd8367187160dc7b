use async_trait::async_trait;
use futures::StreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::error;

use super::{Entity, Repository};

pub struct MongoRepository<T> {
    pub collection: mongodb::Collection<T>,
}

impl<T> MongoRepository<T> {
    pub async fn new(mongo_uri: &str, database: &str, collection: &str) -> error::Result<Self> {
        let collection = mongodb::Client::with_uri_str(mongo_uri)
            .await?
            .database(database)
            .collection(collection);
        Ok(Self { collection })
    }
}

#[async_trait]
impl<T> Repository<T> for MongoRepository<T>
where
    T: Entity + Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn insert(&self, item: &T) -> error::Result<bool> {
        let result = self
            .collection
            .find_one(doc! {"id": item.id()}, None)
            .await?
            .is_none();

        if result {
            self.collection.insert_one(item, None).await?;
        }
        Ok(result)
    }

    async fn find_all(&self) -> error::Result<Vec<T>> {
        let results: Vec<mongodb::error::Result<T>> =
            self.collection.find(None, None).await?.collect().await;

        Ok(results.into_iter().collect::<mongodb::error::Result<_>>()?)
    }

    async fn update_fields(
        &self,
        field: &str,
        value: &Bson,
        fields: Document,
    ) -> error::Result<bool> {
        let result = self
            .collection
            .update_one(doc! {field: value}, doc! {"$set": fields}, None)
            .await?;
        Ok(result.matched_count > 0)
    }
}
