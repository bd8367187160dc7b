use actix_web::{
    get, post, put,
    web::{Json, Query},
};
use common::{
    context::GeneralContext,
    entities::submission::PublicSubmission,
    error,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::service::submission::{
    CreateSubmission, ListQuery, StatusChange, StatusCounts, SubmissionService,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionsResponse {
    pub success: bool,
    pub submissions: Vec<PublicSubmission>,
    pub total: usize,
    pub counts: StatusCounts,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateSubmissionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[utoipa::path(
    request_body(
        content = CreateSubmission
    ),
    responses(
        (status = 200, body = CreateSubmissionResponse),
        (status = 400, description = "Missing fields or invalid email", body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[post("/contact")]
pub async fn post_submission(
    context: GeneralContext,
    Json(data): Json<CreateSubmission>,
) -> error::Result<Json<CreateSubmissionResponse>> {
    let id = SubmissionService::new(context).create(data).await?;
    Ok(Json(CreateSubmissionResponse {
        success: true,
        message: "Message received successfully".to_string(),
        submission_id: id.to_hex(),
    }))
}

#[utoipa::path(
    params(
        ("key" = String, Query, description = "Admin key"),
        ("status" = Option<String>, Query, description = "new, read, replied, archived or all"),
        ("search" = Option<String>, Query, description = "Matches name, email or subject"),
    ),
    responses(
        (status = 200, description = "Submissions, newest first", body = SubmissionsResponse),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 401, body = ErrorResponse)
    )
)]
#[get("/contact")]
pub async fn get_submissions(
    context: GeneralContext,
    Query(pairs): Query<Vec<(String, String)>>,
) -> error::Result<Json<SubmissionsResponse>> {
    let list = SubmissionService::new(context)
        .list(ListQuery::from_pairs(pairs))
        .await?;
    Ok(Json(SubmissionsResponse {
        success: true,
        total: list.submissions.len(),
        submissions: list.submissions,
        counts: list.counts,
    }))
}

#[utoipa::path(
    request_body(
        content = StatusChange
    ),
    responses(
        (status = 200, body = UpdateSubmissionResponse),
        (status = 400, description = "Invalid status or id", body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
#[put("/contact")]
pub async fn put_submission_status(
    context: GeneralContext,
    Json(body): Json<Value>,
) -> error::Result<Json<UpdateSubmissionResponse>> {
    // A body that is not an object carries no admin key.
    let change = serde_json::from_value::<StatusChange>(body).unwrap_or_default();
    SubmissionService::new(context).update_status(change).await?;
    Ok(Json(UpdateSubmissionResponse {
        success: true,
        message: "Submission updated successfully".to_string(),
    }))
}
