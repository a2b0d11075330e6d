use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::repositories::token::TokenService;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::hours(config.jwt_expiration_hours),
        }
    }

    pub fn create_jwt(&self, email: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.expiration).timestamp() as usize;

        let claims = Claims {
            sub: email.to_string(),
            email: email.to_string(),
            authenticated: true,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(AuthError::from)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

impl TokenService for JwtService {
    fn create_jwt(&self, email: &str) -> Result<String, AuthError> {
        self.create_jwt(email)
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        self.decode_jwt(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppEnvironment;

    fn config_with_expiration(hours: i64) -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512".into(),
            jwt_expiration_hours: hours,
            admin_email: "admin@example.com".into(),
            admin_password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            uploads_dir: "./uploads/images".into(),
            uploads_public_prefix: "/uploads/images".into(),
        }
    }

    #[test]
    fn token_round_trips_to_same_email() {
        let service = JwtService::new(&config_with_expiration(24));

        let token = service.create_jwt("admin@example.com").unwrap();
        let decoded = service.decode_jwt(&token).unwrap();

        assert_eq!(decoded.claims.email, "admin@example.com");
        assert_eq!(decoded.claims.sub, "admin@example.com");
        assert!(decoded.claims.authenticated);
        assert!(decoded.claims.exp > decoded.claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let service = JwtService::new(&config_with_expiration(-1));

        let token = service.create_jwt("admin@example.com").unwrap();
        let result = service.decode_jwt(&token);

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let service = JwtService::new(&config_with_expiration(24));

        let mut other_config = config_with_expiration(24);
        other_config.jwt_secret = "another_secret_that_is_also_long_enough!!".into();
        let other_service = JwtService::new(&other_config);

        let token = other_service.create_jwt("admin@example.com").unwrap();
        assert!(matches!(
            service.decode_jwt(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let service = JwtService::new(&config_with_expiration(24));
        assert!(service.decode_jwt("definitely-not-a-jwt").is_err());
    }
}
