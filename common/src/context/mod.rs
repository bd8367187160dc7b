use std::sync::Arc;

use actix_web::{dev::Payload, web::Data, FromRequest, HttpRequest};

use crate::error::{self, ServiceError};

pub use self::effectfull_context::{GeneralContext, HandlerContext, ServiceState};
pub mod effectfull_context;

pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Best-effort client address: first `X-Forwarded-For` hop, then
/// `X-Real-IP`, then the socket peer.
pub fn source_address(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|x| x.to_str().ok())
            .and_then(|x| x.split(',').next())
            .map(str::trim)
            .filter(|x| !x.is_empty())
            .map(str::to_string)
    };

    header("X-Forwarded-For")
        .or_else(|| header("X-Real-IP"))
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

impl FromRequest for GeneralContext {
    type Error = ServiceError;

    type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        fn from_request_inner(
            req: &HttpRequest,
            _payload: &mut Payload,
        ) -> error::Result<GeneralContext> {
            let Some(state) = req.app_data::<Data<Arc<ServiceState>>>() else {
                return Err(anyhow::anyhow!("No state provided".to_string()).into());
            };

            Ok(GeneralContext::new(
                Arc::clone(state),
                HandlerContext {
                    source_address: source_address(req),
                },
            ))
        }

        futures_util::future::ready(from_request_inner(req, payload))
    }
}
