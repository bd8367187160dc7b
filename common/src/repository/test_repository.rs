use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::{error, inner_error::InnerError};

use super::{Entity, Repository};

/// In-memory document store. Items are kept as BSON so that they go through
/// the same serde shape as the MongoDB collection.
pub struct TestRepository<T> {
    _t: std::marker::PhantomData<T>,
    pub db: Mutex<Vec<Document>>,
}

impl<T> Default for TestRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TestRepository<T> {
    pub fn new() -> Self {
        Self {
            _t: std::marker::PhantomData,
            db: Mutex::new(Vec::new()),
        }
    }

    fn lock(&self) -> error::Result<MutexGuard<'_, Vec<Document>>> {
        self.db.lock().map_err(|_| InnerError::PoisonedLock.into())
    }
}

#[async_trait]
impl<T> Repository<T> for TestRepository<T>
where
    T: Entity + Serialize + DeserializeOwned + Send + Sync,
{
    async fn insert(&self, item: &T) -> error::Result<bool> {
        let id = Bson::ObjectId(item.id());
        let mut db = self.lock()?;

        if db.iter().any(|x| x.get("id") == Some(&id)) {
            return Ok(false);
        }

        db.push(bson::to_document(item)?);
        Ok(true)
    }

    async fn find_all(&self) -> error::Result<Vec<T>> {
        let db = self.lock()?;
        db.iter()
            .map(|x| -> error::Result<T> { Ok(bson::from_document(x.clone())?) })
            .collect()
    }

    async fn update_fields(
        &self,
        field: &str,
        value: &Bson,
        fields: Document,
    ) -> error::Result<bool> {
        let mut db = self.lock()?;
        let Some(document) = db.iter_mut().find(|x| x.get(field) == Some(value)) else {
            return Ok(false);
        };
        document.extend(fields);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, oid::ObjectId};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        id: ObjectId,
        label: String,
    }

    impl Entity for Item {
        fn id(&self) -> ObjectId {
            self.id
        }
    }

    fn item(label: &str) -> Item {
        Item {
            id: ObjectId::new(),
            label: label.to_string(),
        }
    }

    #[actix_web::test]
    async fn insert_rejects_duplicate_ids() {
        let repo = TestRepository::<Item>::new();
        let first = item("first");

        assert!(repo.insert(&first).await.unwrap());
        assert!(!repo.insert(&first).await.unwrap());
        assert_eq!(repo.find_all().await.unwrap(), vec![first]);
    }

    #[actix_web::test]
    async fn update_fields_touches_only_the_matching_document() {
        let repo = TestRepository::<Item>::new();
        let a = item("a");
        let b = item("b");
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let updated = repo
            .update_fields("id", &Bson::ObjectId(a.id), doc! {"label": "changed"})
            .await
            .unwrap();
        assert!(updated);

        let stored = repo.find_all().await.unwrap();
        assert_eq!(
            stored,
            vec![
                Item {
                    label: "changed".to_string(),
                    ..a
                },
                b
            ]
        );
    }

    #[actix_web::test]
    async fn update_fields_reports_missing_documents() {
        let repo = TestRepository::<Item>::new();
        let updated = repo
            .update_fields("id", &Bson::ObjectId(ObjectId::new()), doc! {"label": "x"})
            .await
            .unwrap();
        assert!(!updated);
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
