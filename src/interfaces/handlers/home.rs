use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;

use crate::constants::START_TIME;

#[get("/")]
pub async fn home() -> impl Responder {
    let uptime_seconds = Utc::now().signed_duration_since(*START_TIME).num_seconds();

    HttpResponse::Ok().json(serde_json::json!({
        "message": "Portfolio Projects API",
        "status": "running",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime_seconds,
        "endpoints": {
            "public": [
                "GET /api/projects",
                "GET /api/projects/:id",
                "GET /api/projects/technology/:tech",
                "GET /uploads/images/*"
            ],
            "auth": [
                "POST /api/login",
                "POST /api/logout",
                "GET /api/auth/status"
            ],
            "protected": [
                "POST /api/projects",
                "PUT /api/projects/:id",
                "DELETE /api/projects/:id",
                "DELETE /api/images/:id"
            ]
        }
    }))
}
