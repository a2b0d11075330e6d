use actix_web::{
    body::BoxBody, error::JsonPayloadError, http::StatusCode, web, HttpResponse, ResponseError,
};
use serde_json::json;

/// Replaces the default plain-text rejection of malformed JSON bodies
/// with the API's JSON error shape.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _req| JsonBodyError::from(err).into()),
    );
}

#[derive(Debug)]
pub struct JsonBodyError {
    message: String,
}

impl std::fmt::Display for JsonBodyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for JsonBodyError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::BadRequest().json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonBodyError {
    fn from(err: JsonPayloadError) -> Self {
        JsonBodyError {
            message: format!("Malformed JSON body: {}", err),
        }
    }
}
