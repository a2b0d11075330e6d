use jsonwebtoken::TokenData;

use crate::entities::token::Claims;
use crate::errors::AuthError;

/// Seam between the auth use case and the concrete token implementation.
pub trait TokenService: Send + Sync {
    fn create_jwt(&self, email: &str) -> Result<String, AuthError>;
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;
}
