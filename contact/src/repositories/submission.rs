use common::{
    entities::submission::{Submission, SubmissionStatus},
    error,
    inner_error::InnerError,
    repository::RepositoryObject,
};
use mongodb::bson::{doc, oid::ObjectId, Bson};

/// Submission store over any document repository.
#[derive(Clone)]
pub struct SubmissionRepository {
    inner: RepositoryObject<Submission>,
}

impl SubmissionRepository {
    pub fn new(inner: RepositoryObject<Submission>) -> Self {
        Self { inner }
    }

    /// Persists the record and returns the id it was stored under. A taken id
    /// is replaced by a fresh one once.
    pub async fn insert(&self, mut submission: Submission) -> error::Result<ObjectId> {
        if self.inner.insert(&submission).await? {
            return Ok(submission.id);
        }

        let taken = submission.id;
        submission.id = ObjectId::new();
        log::warn!("Submission id {} already taken, retrying with {}", taken, submission.id);

        if self.inner.insert(&submission).await? {
            return Ok(submission.id);
        }
        Err(InnerError::IdCollision(submission.id).into())
    }

    pub async fn list_all(&self) -> error::Result<Vec<Submission>> {
        self.inner.find_all().await
    }

    pub async fn update_status_by_id(
        &self,
        id: ObjectId,
        status: SubmissionStatus,
        updated_at: i64,
    ) -> error::Result<bool> {
        self.inner
            .update_fields(
                "id",
                &Bson::ObjectId(id),
                doc! {"status": status.as_str(), "updated_at": updated_at},
            )
            .await
    }
}
