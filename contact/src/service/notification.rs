use std::sync::Arc;

use async_trait::async_trait;
use common::{entities::submission::Submission, error};

/// Hook invoked after a submission has been stored.
#[async_trait]
pub trait SubmissionNotifier: Send + Sync {
    async fn notify(&self, submission: &Submission) -> error::Result<()>;
}

pub type NotifierObject = Arc<dyn SubmissionNotifier>;

/// Default hook. Email delivery is not wired up, so this only records that a
/// notification would have been sent.
pub struct LogNotifier;

#[async_trait]
impl SubmissionNotifier for LogNotifier {
    async fn notify(&self, submission: &Submission) -> error::Result<()> {
        log::debug!(
            "Notification skipped for submission {} from {}",
            submission.id,
            submission.email
        );
        Ok(())
    }
}
