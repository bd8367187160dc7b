use actix_web::{get, HttpResponse};

#[utoipa::path(
    responses(
        (status = 200, description = "Service is up", body = String)
    )
)]
#[get("/contact/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().body("pong")
}
