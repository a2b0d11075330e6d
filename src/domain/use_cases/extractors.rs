use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{entities::token::Claims, errors::AuthError};

/// Extractor for admin claims placed into request extensions by the auth
/// middleware. Returns 401 if the request was not authenticated.
/// Usage: add `claims: AdminClaims` as a parameter to your handler function.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) if claims.authenticated => ready(Ok(AdminClaims(claims.clone()))),
            Some(_) => ready(Err(AuthError::AuthenticationFailed.into())),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}
