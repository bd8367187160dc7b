use std::env::{self, VarError};

use anyhow::Context as _;

pub const DEFAULT_API_PREFIX: &str = "/api";

/// Process-wide settings read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub mongo_uri: String,
    pub database: String,
    pub collection: String,
    pub admin_key: String,
    pub api_prefix: String,
    pub bind_address: String,
    pub port: u16,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let port = optional("PORT")?
            .map(|port| port.parse::<u16>())
            .transpose()
            .context("PORT must be a valid port number")?
            .unwrap_or(3000);

        Ok(Self {
            mongo_uri: required("MONGOURI")?,
            database: optional("MONGO_DATABASE")?.unwrap_or_else(|| "portfolio".to_string()),
            collection: optional("MONGO_COLLECTION")?
                .unwrap_or_else(|| "contact_submissions".to_string()),
            admin_key: required("ADMIN_KEY")?,
            api_prefix: optional("API_PREFIX")?.unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
            bind_address: optional("BIND_ADDRESS")?.unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
        })
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    optional(name)?.with_context(|| format!("{} must be set", name))
}

fn optional(name: &str) -> anyhow::Result<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(err) => Err(err).with_context(|| format!("{} is not valid unicode", name)),
    }
}
