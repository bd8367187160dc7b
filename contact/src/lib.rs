use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware, web, App,
};
use common::{
    auth::AdminKey,
    context::ServiceState,
    entities::submission::{PublicSubmission, Submission, SubmissionStatus},
    error::AddCode,
    repository::RepositoryObject,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use repositories::submission::SubmissionRepository;
use service::notification::NotifierObject;

pub mod handlers;
pub mod repositories;
pub mod service;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::submission::post_submission,
        handlers::submission::get_submissions,
        handlers::submission::put_submission_status,
        handlers::indexer::ping,
    ),
    components(schemas(
        service::submission::CreateSubmission,
        service::submission::StatusChange,
        service::submission::StatusCounts,
        handlers::submission::CreateSubmissionResponse,
        handlers::submission::SubmissionsResponse,
        handlers::submission::UpdateSubmissionResponse,
        handlers::submission::ErrorResponse,
        PublicSubmission,
        SubmissionStatus,
    ))
)]
pub struct ApiDoc;

pub fn create_state(
    submissions: RepositoryObject<Submission>,
    admin_key: AdminKey,
    notifier: NotifierObject,
) -> ServiceState {
    let mut state = ServiceState::new(admin_key);
    state.insert_manual(SubmissionRepository::new(submissions));
    state.insert_manual(notifier);
    state
}

pub fn create_app(
    state: Arc<ServiceState>,
    api_prefix: &str,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let cors = Cors::permissive();

    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        anyhow::anyhow!("Invalid request body: {}", err)
            .code(400)
            .into()
    });
    let query_config = web::QueryConfig::default().error_handler(|err, _req| {
        anyhow::anyhow!("Invalid query: {}", err).code(400).into()
    });

    #[allow(clippy::let_and_return)]
    let app = App::new()
        .wrap(cors)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(state))
        .app_data(json_config)
        .app_data(query_config)
        .service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()),
        )
        .service(
            web::scope(api_prefix)
                .service(handlers::indexer::ping)
                .service(handlers::submission::post_submission)
                .service(handlers::submission::get_submissions)
                .service(handlers::submission::put_submission_status),
        );
    app
}
