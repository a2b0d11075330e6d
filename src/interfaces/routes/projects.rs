use actix_web::web;

use crate::handlers::projects;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/projects")
            .service(
                web::resource("")
                    .route(web::get().to(projects::list_projects))
                    .route(web::post().to(projects::create_project))
            )
            // Must come before the catch-all {project_id} resource.
            .service(
                web::resource("/technology/{tech}")
                    .route(web::get().to(projects::list_projects_by_technology))
            )
            .service(
                web::resource("/{project_id}")
                    .route(web::get().to(projects::get_project))
                    .route(web::put().to(projects::update_project))
                    .route(web::delete().to(projects::delete_project))
            )
    );

    cfg.service(
        web::resource("/images/{image_id}")
            .route(web::delete().to(projects::delete_image))
    );
}
