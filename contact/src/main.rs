use std::sync::Arc;

use actix_web::HttpServer;
use common::{
    auth::AdminKey, entities::submission::Submission,
    repository::mongo_repository::MongoRepository, services::ServiceConfig,
};
use contact::{create_app, create_state, service::notification::LogNotifier};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();

    let config = ServiceConfig::from_env().map_err(|err| {
        log::error!("Invalid configuration: {:#}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string())
    })?;

    let submissions =
        MongoRepository::<Submission>::new(&config.mongo_uri, &config.database, &config.collection)
            .await
            .map_err(|err| {
                log::error!("Failed to connect to MongoDB: {}", err);
                std::io::Error::new(std::io::ErrorKind::Other, err.to_string())
            })?;

    let state = create_state(
        Arc::new(submissions),
        AdminKey::new(config.admin_key.clone()),
        Arc::new(LogNotifier),
    );
    let state = Arc::new(state);

    log::info!(
        "Contact service listening on {}:{}{}",
        config.bind_address,
        config.port,
        config.api_prefix
    );

    let api_prefix = config.api_prefix.clone();
    HttpServer::new(move || create_app(state.clone(), &api_prefix))
        .bind((config.bind_address.as_str(), config.port))?
        .run()
        .await
}
