use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repository::Entity;

pub const DEFAULT_PROJECT_TYPE: &str = "Not specified";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 4] = [
        SubmissionStatus::New,
        SubmissionStatus::Read,
        SubmissionStatus::Replied,
        SubmissionStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::New => "new",
            SubmissionStatus::Read => "read",
            SubmissionStatus::Replied => "replied",
            SubmissionStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubmissionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Invalid status"))
    }
}

/// A stored contact form entry. Times are microseconds since the Unix epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
    pub timestamp: i64,
    pub status: SubmissionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,
    pub source_address: String,
}

impl Submission {
    pub fn publish(self) -> PublicSubmission {
        PublicSubmission {
            id: self.id.to_hex(),
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            project_type: self.project_type,
            timestamp: format_micros(self.timestamp),
            status: self.status,
            updated_at: self.updated_at.map(format_micros),
            source_address: self.source_address,
        }
    }
}

impl Entity for Submission {
    fn id(&self) -> ObjectId {
        self.id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub project_type: String,
    pub timestamp: String,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    pub source_address: String,
}

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub fn format_micros(micros: i64) -> String {
    DateTime::from_timestamp_micros(micros)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}
