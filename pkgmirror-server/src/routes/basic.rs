use actix_web::{get, HttpResponse};

#[get("/status")]
pub async fn status() -> HttpResponse {
    HttpResponse::Ok().finish()
}

#[get("/version")]
pub async fn version() -> HttpResponse {
    HttpResponse::Ok().body(env!("CARGO_PKG_VERSION"))
}
