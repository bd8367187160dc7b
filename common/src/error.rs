use actix_web::{
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use serde_json::json;

#[derive(Debug)]
pub struct ServiceError {
    pub code: u16,
    err: anyhow::Error,
}

impl ServiceError {
    pub fn message(&self) -> String {
        self.err.to_string()
    }
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "ServiceError({}): {}", self.code, self.err)
    }
}

impl actix_web::error::ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Storage and other internal failures never reach the client verbatim.
        let message = if status.is_server_error() {
            log::error!("{:?}", self.err);
            "Internal server error".to_string()
        } else {
            self.message()
        };

        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .body(json!({ "error": message }).to_string())
    }
}

impl<E: Into<anyhow::Error>> From<E> for ServiceError {
    fn from(err: E) -> ServiceError {
        ServiceError {
            code: 500,
            err: err.into(),
        }
    }
}

pub trait AddCode {
    fn code(self, code: u16) -> ServiceError;
}

impl AddCode for anyhow::Error {
    fn code(self, code: u16) -> ServiceError {
        ServiceError { code, err: self }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
