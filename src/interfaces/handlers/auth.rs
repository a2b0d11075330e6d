use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::entities::token::LoginRequest;
use crate::errors::AuthError;
use crate::middlewares::auth::bearer_token;
use crate::AppState;

#[instrument(skip(state, credentials))]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    credentials: web::Json<LoginRequest>,
) -> impl Responder {
    match state.auth_handler.login(credentials.into_inner()) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(AuthError::TokenCreation | AuthError::MissingJwtService) => {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "error": "Error creating login token"
            }))
        }
        // Uniform rejection: no hint about which part was wrong.
        Err(_) => HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "error": "Invalid email or password"
        })),
    }
}

#[instrument]
#[post("/logout")]
pub async fn logout() -> impl Responder {
    // Tokens are stateless; logout is the client discarding its token.
    HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully"
    }))
}

#[instrument(skip(request, state))]
#[get("/auth/status")]
pub async fn auth_status(request: HttpRequest, state: web::Data<AppState>) -> impl Responder {
    let token = bearer_token(request.headers());
    let status = state.auth_handler.status(token.as_deref());

    HttpResponse::Ok().json(status)
}
