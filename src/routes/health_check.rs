//! src/routes/health_check.rs
use actix_web::HttpResponse;

/// 200 with an empty body while the server is accepting requests.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
