use validator::Validate;

use crate::auth::password::verify_password;
use crate::entities::token::{AuthStatusResponse, LoginRequest, LoginResponse};
use crate::errors::AuthError;
use crate::repositories::token::TokenService;
use crate::settings::AppConfig;

/// The single identity permitted to mutate projects, loaded from
/// configuration rather than source.
#[derive(Debug, Clone)]
pub struct AdminIdentity {
    pub email: String,
    pub password_hash: String,
}

impl AdminIdentity {
    pub fn from_config(config: &AppConfig) -> Self {
        AdminIdentity {
            email: config.admin_email.clone(),
            password_hash: config.admin_password_hash.clone(),
        }
    }
}

pub struct AuthHandler<T>
where
    T: TokenService,
{
    admin: AdminIdentity,
    pub token_service: T,
}

impl<T> AuthHandler<T>
where
    T: TokenService,
{
    pub fn new(admin: AdminIdentity, token_service: T) -> Self {
        AuthHandler {
            admin,
            token_service,
        }
    }

    /// Checks the supplied credentials against the admin identity and
    /// issues an access token on match.
    pub fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        request.validate()?;

        if request.email != self.admin.email {
            return Err(AuthError::WrongCredentials);
        }

        let is_password_valid = verify_password(&request.password, &self.admin.password_hash)?;
        if !is_password_valid {
            return Err(AuthError::WrongCredentials);
        }

        let token = self
            .token_service
            .create_jwt(&request.email)
            .map_err(|e| {
                tracing::warn!("Failed to create JWT: {}", e);
                AuthError::TokenCreation
            })?;

        tracing::info!("Admin logged in successfully");
        Ok(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            email: request.email,
            token,
        })
    }

    /// Reports whether the bearer token (if any) identifies the admin.
    /// Rejected tokens are logged and reported as unauthenticated.
    pub fn status(&self, token: Option<&str>) -> AuthStatusResponse {
        let claims = token.and_then(|t| {
            self.token_service
                .decode_jwt(t)
                .map_err(|e| tracing::debug!("Auth status token rejected: {}", e))
                .ok()
        });

        match claims {
            Some(data) => AuthStatusResponse {
                authenticated: true,
                email: Some(data.claims.email),
            },
            None => AuthStatusResponse {
                authenticated: false,
                email: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{jwt::JwtService, password::hash_password};
    use crate::settings::{AppConfig, AppEnvironment};

    const ADMIN_EMAIL: &str = "admin@example.com";
    const ADMIN_PASSWORD: &str = "CorrectHorse9!";

    fn test_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "test_jwt_secret_that_is_long_enough_for_hs512".into(),
            jwt_expiration_hours: 24,
            admin_email: ADMIN_EMAIL.into(),
            admin_password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            uploads_dir: "./uploads/images".into(),
            uploads_public_prefix: "/uploads/images".into(),
        }
    }

    fn handler() -> AuthHandler<JwtService> {
        let config = test_config();
        AuthHandler::new(AdminIdentity::from_config(&config), JwtService::new(&config))
    }

    fn login_request(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn login_with_correct_credentials_issues_token() {
        let handler = handler();

        let response = handler
            .login(login_request(ADMIN_EMAIL, ADMIN_PASSWORD))
            .expect("login should succeed");

        assert!(response.success);
        assert_eq!(response.email, ADMIN_EMAIL);

        let decoded = handler.token_service.decode_jwt(&response.token).unwrap();
        assert_eq!(decoded.claims.email, ADMIN_EMAIL);
        assert!(decoded.claims.authenticated);
    }

    #[test]
    fn login_with_wrong_password_is_rejected() {
        let result = handler().login(login_request(ADMIN_EMAIL, "wrong"));
        assert!(matches!(result, Err(AuthError::WrongCredentials)));
    }

    #[test]
    fn login_with_unknown_email_is_rejected() {
        let result = handler().login(login_request("other@example.com", ADMIN_PASSWORD));
        assert!(matches!(result, Err(AuthError::WrongCredentials)));
    }

    #[test]
    fn status_reflects_token_validity() {
        let handler = handler();
        let token = handler.token_service.create_jwt(ADMIN_EMAIL).unwrap();

        let status = handler.status(Some(&token));
        assert!(status.authenticated);
        assert_eq!(status.email.as_deref(), Some(ADMIN_EMAIL));

        assert!(!handler.status(Some("not-a-token")).authenticated);
        assert!(!handler.status(None).authenticated);
    }
}
