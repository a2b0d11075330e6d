use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::handlers::home::home;
use crate::storage::uploads::{MAX_IMAGES_PER_REQUEST, MAX_IMAGE_BYTES};

mod auth;
mod projects;
mod json_error;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.service(
        web::scope("/api")
            .configure(auth::config_routes)
            .configure(projects::config_routes)
    );

    // Headroom over the per-file cap for the multipart envelope itself.
    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit((MAX_IMAGES_PER_REQUEST + 2) * MAX_IMAGE_BYTES)
            .memory_limit(2 * 1024 * 1024),
    );

    cfg.configure(json_error::config_routes);
}
