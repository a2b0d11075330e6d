use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::project::{ListProjectsQuery, ProjectForm},
    errors::AppError,
    use_cases::extractors::AdminClaims,
    AppState,
};

#[instrument(skip(state, query))]
pub async fn list_projects(
    state: web::Data<AppState>,
    query: web::Query<ListProjectsQuery>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .project_handler
        .list_projects(query.into_inner().technology)
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn list_projects_by_technology(
    tech: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let projects = state
        .project_handler
        .list_projects(Some(tech.into_inner()))
        .await?;

    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project(
    project_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(_claims, state, form))]
pub async fn create_project(
    _claims: AdminClaims,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectForm>,
) -> Result<impl Responder, AppError> {
    let (fields, uploads) = form.into_inner().into_parts();

    let response = state
        .project_handler
        .create_project(fields, uploads)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(_claims, state, form))]
pub async fn update_project(
    _claims: AdminClaims,
    project_id: web::Path<Uuid>,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectForm>,
) -> Result<impl Responder, AppError> {
    let (fields, uploads) = form.into_inner().into_parts();

    let response = state
        .project_handler
        .update_project(&project_id, fields, uploads)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_claims, state))]
pub async fn delete_project(
    _claims: AdminClaims,
    project_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.delete_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(_claims, state))]
pub async fn delete_image(
    _claims: AdminClaims,
    image_id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let response = state.project_handler.delete_image(&image_id).await?;

    Ok(HttpResponse::Ok().json(response))
}
