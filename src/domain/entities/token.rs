use serde::{Serialize, Deserialize};
use validator::Validate;

/// Claims carried by the admin access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub authenticated: bool,
    pub exp: usize,
    pub iat: usize,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
