use actix_multipart::form::tempfile::TempFile;
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::project::{
        NewImage, OperationResponse, ProjectCreatedResponse, ProjectFields, ProjectResponse,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    storage::uploads::{ImageStore, MAX_IMAGES_PER_REQUEST},
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
    pub image_store: ImageStore,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R, image_store: ImageStore) -> Self {
        ProjectHandler {
            project_repo,
            image_store,
        }
    }

    /// Creates a project from validated fields and accepted uploads.
    /// The first uploaded image becomes the primary one.
    pub async fn create_project(
        &self,
        fields: ProjectFields,
        uploads: Vec<TempFile>,
    ) -> Result<ProjectCreatedResponse, AppError> {
        fields.validate()?;
        ensure_upload_count(&uploads)?;

        let mut images = Vec::with_capacity(uploads.len());
        for (index, upload) in uploads.into_iter().enumerate() {
            let image_path = self.image_store.save(upload).await?;
            images.push(NewImage {
                image_path,
                is_primary: index == 0,
            });
        }

        let id = self.project_repo.create_project(&fields, &images).await?;

        Ok(ProjectCreatedResponse {
            success: true,
            id,
            message: "Project created successfully".to_string(),
        })
    }

    pub async fn get_project(&self, id: &Uuid) -> Result<ProjectResponse, AppError> {
        self.project_repo.get_project_by_id(id).await
    }

    pub async fn list_projects(
        &self,
        technology: Option<String>,
    ) -> Result<Vec<ProjectResponse>, AppError> {
        self.project_repo.list_projects(technology).await
    }

    /// Replaces the project's scalar fields and appends any newly uploaded
    /// images. Existing images are never touched or reordered.
    pub async fn update_project(
        &self,
        id: &Uuid,
        fields: ProjectFields,
        uploads: Vec<TempFile>,
    ) -> Result<OperationResponse, AppError> {
        fields.validate()?;
        ensure_upload_count(&uploads)?;

        let mut new_images = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let image_path = self.image_store.save(upload).await?;
            new_images.push(NewImage {
                image_path,
                is_primary: false,
            });
        }

        self.project_repo
            .update_project(id, &fields, &new_images)
            .await?;

        Ok(OperationResponse::ok("Project updated successfully"))
    }

    /// Removes a project, its image rows and their backing files. File
    /// deletion is best effort: failures are logged and the record
    /// deletion still proceeds.
    pub async fn delete_project(&self, id: &Uuid) -> Result<OperationResponse, AppError> {
        let project = self.project_repo.get_project_by_id(id).await?;

        for image in &project.images {
            if let Err(e) = self.image_store.delete(&image.image_path).await {
                tracing::warn!(
                    "Failed to delete image file {}: {}",
                    image.image_path,
                    e
                );
            }
        }

        self.project_repo.delete_project(id).await?;

        Ok(OperationResponse::ok("Project deleted successfully"))
    }

    /// Removes a single image: its backing file first, then the record.
    pub async fn delete_image(&self, image_id: &Uuid) -> Result<OperationResponse, AppError> {
        let image = self.project_repo.get_image(image_id).await?;

        self.image_store.delete(&image.image_path).await?;
        self.project_repo.delete_image(image_id).await?;

        Ok(OperationResponse::ok("Image deleted successfully"))
    }
}

fn ensure_upload_count(uploads: &[TempFile]) -> Result<(), AppError> {
    if uploads.len() > MAX_IMAGES_PER_REQUEST {
        return Err(AppError::invalid_field(
            "images",
            &format!("A maximum of {} images are allowed per request", MAX_IMAGES_PER_REQUEST),
        ));
    }
    Ok(())
}
