mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, storage};

use auth::jwt::JwtService;
use repositories::sqlx_repo::SqlxProjectRepo;
use storage::uploads::ImageStore;
use use_cases::{auth::{AdminIdentity, AuthHandler}, projects::ProjectHandler};

pub struct AppState {
    pub auth_handler: AppAuthHandler,
    pub project_handler: AppProjectHandler,
}

pub type AppAuthHandler = AuthHandler<JwtService>;
pub type AppProjectHandler = ProjectHandler<SqlxProjectRepo>;

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let jwt_service = JwtService::new(config);
        let auth_handler = AuthHandler::new(AdminIdentity::from_config(config), jwt_service);

        let image_store = ImageStore::new(&config.uploads_dir, &config.uploads_public_prefix);
        let project_repo = SqlxProjectRepo::new(pool);
        let project_handler = ProjectHandler::new(project_repo, image_store);

        AppState {
            auth_handler,
            project_handler,
        }
    }
}
