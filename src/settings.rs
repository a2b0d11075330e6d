use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::{env, fmt, str::FromStr};
use zeroize::Zeroizing;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default)]
    pub database_url: String,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub jwt_secret: String,

    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_hours: i64,

    #[serde(default)]
    pub admin_email: String,

    #[serde(default)]
    pub admin_password_hash: String,

    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    #[serde(default = "default_uploads_prefix")]
    pub uploads_public_prefix: String,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Projects-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_jwt_expiration() -> i64 {
    24
}
fn default_uploads_dir() -> String {
    "./uploads/images".to_string()
}
fn default_uploads_prefix() -> String {
    "/uploads/images".to_string()
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name.to_string().to_lowercase())).required(false))
            .add_source(Environment::with_prefix("APP").separator("_").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.database_url = fill_or_env(config.database_url, "APP_DATABASE_URL")?;
        config.jwt_secret = fill_or_env(config.jwt_secret, "APP_JWT_SECRET")?;
        config.admin_email = fill_or_env(config.admin_email, "APP_ADMIN_EMAIL")?;
        config.admin_password_hash = fill_or_env(config.admin_password_hash, "APP_ADMIN_PASSWORD_HASH")?;

        // The env source splits multi-word keys on the separator
        // (APP_UPLOADS_DIR arrives as `uploads.dir`), so flat fields
        // with defaults are overlaid by hand.
        overlay(&mut config.uploads_dir, env::var("APP_UPLOADS_DIR").ok());
        overlay(
            &mut config.uploads_public_prefix,
            env::var("APP_UPLOADS_PUBLIC_PREFIX").ok(),
        );

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.database_url.trim().is_empty() {
            errors.push("DATABASE_URL cannot be empty");
        }
        if self.jwt_secret.len() < 32 {
            errors.push("JWT_SECRET must be at least 32 characters");
        }
        if self.jwt_expiration_hours <= 0 {
            errors.push("JWT_EXPIRATION_HOURS must be positive");
        }
        if self.admin_email.trim().is_empty() {
            errors.push("ADMIN_EMAIL cannot be empty");
        }
        if !self.admin_password_hash.starts_with("$argon2") {
            errors.push("ADMIN_PASSWORD_HASH must be an argon2 PHC string");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

fn overlay(field: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *field = value;
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else if self.len() < 32 {
            "[TOO_SHORT]"
        } else {
            "[REDACTED]"
        }
    }
}

impl Redact for String {
    fn redact(&self) -> &str {
        self.as_str().redact()
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("database_url", &self.database_url.redact())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("jwt_secret", &self.jwt_secret.redact())
            .field("jwt_expiration_hours", &self.jwt_expiration_hours)
            .field("admin_email", &self.admin_email)
            .field("admin_password_hash", &self.admin_password_hash.redact())
            .field("uploads_dir", &self.uploads_dir)
            .field("uploads_public_prefix", &self.uploads_public_prefix)
            .finish()
    }
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl From<&AppConfig> for JwtKeys {
    fn from(config: &AppConfig) -> Self {
        let jwt_secret = Zeroizing::new(config.jwt_secret.clone());

        JwtKeys {
            encoding: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(jwt_secret.as_bytes()),
        }
    }
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"[REDACTED]")
            .field("decoding", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            env: AppEnvironment::Testing,
            name: "test".into(),
            port: 0,
            host: "127.0.0.1".into(),
            worker_count: 1,
            database_url: "postgres://localhost/test".into(),
            cors_allowed_origins: vec!["*".into()],
            jwt_secret: "a_secret_that_is_long_enough_for_hs512_123456".into(),
            jwt_expiration_hours: 24,
            admin_email: "admin@example.com".into(),
            admin_password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".into(),
            uploads_dir: "./uploads/images".into(),
            uploads_public_prefix: "/uploads/images".into(),
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let mut config = base_config();
        config.jwt_secret = "too_short".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn plaintext_admin_password_is_rejected() {
        let mut config = base_config();
        config.admin_password_hash = "hunter2".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn wildcard_cors_rejected_in_production() {
        let mut config = base_config();
        config.env = AppEnvironment::Production;
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlay_replaces_default_when_value_present() {
        let mut field = "./uploads/images".to_string();
        overlay(&mut field, Some("/var/lib/app/uploads".to_string()));
        assert_eq!(field, "/var/lib/app/uploads");
    }

    #[test]
    fn overlay_keeps_default_when_value_absent_or_blank() {
        let mut field = "./uploads/images".to_string();
        overlay(&mut field, None);
        assert_eq!(field, "./uploads/images");

        overlay(&mut field, Some("   ".to_string()));
        assert_eq!(field, "./uploads/images");
    }

    #[test]
    fn cors_origins_split_on_commas() {
        let mut config = base_config();
        config.cors_allowed_origins =
            vec!["http://localhost:8080, http://localhost:3000".into()];
        assert_eq!(
            config.cors_origins(),
            vec!["http://localhost:8080", "http://localhost:3000"]
        );
    }
}
