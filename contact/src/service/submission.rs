use chrono::Utc;
use common::{
    context::GeneralContext,
    entities::submission::{
        format_micros, PublicSubmission, Submission, SubmissionStatus, DEFAULT_PROJECT_TYPE,
    },
    error::{self, AddCode},
};
use lazy_static::lazy_static;
use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::{repositories::submission::SubmissionRepository, service::notification::NotifierObject};

lazy_static! {
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub project_type: Option<String>,
    /// Accepted for compatibility with the form, never stored.
    #[schema(value_type = Option<String>)]
    pub timestamp: Option<Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub key: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

impl ListQuery {
    /// Builds the query from raw pairs. A repeated `key` counts as no key;
    /// for the filters the first occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let values = |name: &str| {
            pairs
                .iter()
                .filter(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .collect::<Vec<_>>()
        };

        let mut keys = values("key");
        Self {
            key: if keys.len() == 1 { keys.pop() } else { None },
            status: values("status").into_iter().next(),
            search: values("search").into_iter().next(),
        }
    }
}

/// Fields are kept untyped so that a malformed request still reaches the
/// admin key check first.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    #[schema(value_type = Option<String>)]
    pub id: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub status: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub admin_key: Option<Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatusCounts {
    pub new: usize,
    pub read: usize,
    pub replied: usize,
    pub archived: usize,
}

impl StatusCounts {
    fn count(&mut self, status: SubmissionStatus) {
        let slot = match status {
            SubmissionStatus::New => &mut self.new,
            SubmissionStatus::Read => &mut self.read,
            SubmissionStatus::Replied => &mut self.replied,
            SubmissionStatus::Archived => &mut self.archived,
        };
        *slot += 1;
    }
}

#[derive(Debug)]
pub struct SubmissionList {
    pub submissions: Vec<PublicSubmission>,
    pub counts: StatusCounts,
}

fn required(field: Option<String>) -> Option<String> {
    field
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

fn parse_status(status: &str) -> error::Result<SubmissionStatus> {
    status.parse::<SubmissionStatus>().map_err(|e| e.code(400))
}

pub struct SubmissionService {
    context: GeneralContext,
}

impl SubmissionService {
    pub fn new(context: GeneralContext) -> Self {
        Self { context }
    }

    fn submissions(&self) -> error::Result<SubmissionRepository> {
        self.context.try_get_manual::<SubmissionRepository>()
    }

    pub async fn create(&self, input: CreateSubmission) -> error::Result<ObjectId> {
        let (Some(name), Some(email), Some(subject), Some(message)) = (
            required(input.name),
            required(input.email),
            required(input.subject),
            required(input.message),
        ) else {
            return Err(anyhow::anyhow!("Missing required fields").code(400));
        };

        if !is_valid_email(&email) {
            return Err(anyhow::anyhow!("Invalid email format").code(400));
        }

        if let Some(timestamp) = input.timestamp {
            log::debug!("Ignoring client supplied timestamp {}", timestamp);
        }

        let submission = Submission {
            id: ObjectId::new(),
            name,
            email: email.to_lowercase(),
            subject,
            message,
            project_type: required(input.project_type)
                .unwrap_or_else(|| DEFAULT_PROJECT_TYPE.to_string()),
            timestamp: Utc::now().timestamp_micros(),
            status: SubmissionStatus::New,
            updated_at: None,
            source_address: self.context.source_address().to_string(),
        };

        let id = self.submissions()?.insert(submission.clone()).await?;
        let submission = Submission { id, ..submission };

        log::info!(
            "New contact submission: id={} name={} email={} subject={} timestamp={}",
            submission.id,
            submission.name,
            submission.email,
            submission.subject,
            format_micros(submission.timestamp)
        );

        if let Some(notifier) = self.context.get_manual::<NotifierObject>() {
            if let Err(err) = notifier.notify(&submission).await {
                log::error!("Failed to notify about submission {}: {}", submission.id, err);
            }
        }

        Ok(id)
    }

    pub async fn list(&self, query: ListQuery) -> error::Result<SubmissionList> {
        self.context.admin_key().authorize(query.key.as_deref())?;

        let status = match query.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(status) => Some(parse_status(status)?),
        };
        let search = required(query.search).map(|x| x.to_lowercase());

        let mut submissions = self.submissions()?.list_all().await?;
        submissions.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| b.id.bytes().cmp(&a.id.bytes()))
        });

        let mut counts = StatusCounts::default();
        for submission in &submissions {
            counts.count(submission.status);
        }

        let submissions = submissions
            .into_iter()
            .filter(|x| status.map_or(true, |status| x.status == status))
            .filter(|x| {
                search.as_ref().map_or(true, |search| {
                    [&x.name, &x.email, &x.subject]
                        .iter()
                        .any(|field| field.to_lowercase().contains(search.as_str()))
                })
            })
            .map(Submission::publish)
            .collect();

        Ok(SubmissionList {
            submissions,
            counts,
        })
    }

    pub async fn update_status(&self, change: StatusChange) -> error::Result<()> {
        self.context
            .admin_key()
            .authorize(change.admin_key.as_ref().and_then(Value::as_str))?;

        let status = parse_status(
            change
                .status
                .as_ref()
                .and_then(Value::as_str)
                .unwrap_or_default(),
        )?;

        let id = change
            .id
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|id| id.parse::<ObjectId>().ok())
            .ok_or_else(|| anyhow::anyhow!("Invalid id").code(400))?;

        let updated = self
            .submissions()?
            .update_status_by_id(id, status, Utc::now().timestamp_micros())
            .await?;

        if !updated {
            return Err(anyhow::anyhow!("Submission not found").code(404));
        }

        log::info!("Updated submission {} status to: {}", id, status);
        Ok(())
    }
}
