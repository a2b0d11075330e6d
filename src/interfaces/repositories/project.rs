use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;
use sqlx::{self, PgPool};

use crate::{
    entities::project::{NewImage, Project, ProjectFields, ProjectImage, ProjectResponse},
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

const PROJECT_COLUMNS: &str = "id, title, description, technology, features, video_link, \
     github_link, playstore_link, appstore_link, created_at";

const IMAGE_COLUMNS: &str = "id, project_id, image_path, is_primary, sort_order";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Sync + Send {
    async fn create_project(
        &self,
        fields: &ProjectFields,
        images: &[NewImage],
    ) -> Result<Uuid, AppError>;
    async fn get_project_by_id(&self, id: &Uuid) -> Result<ProjectResponse, AppError>;
    async fn list_projects(
        &self,
        technology: Option<String>,
    ) -> Result<Vec<ProjectResponse>, AppError>;
    async fn update_project(
        &self,
        id: &Uuid,
        fields: &ProjectFields,
        new_images: &[NewImage],
    ) -> Result<(), AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    async fn get_image(&self, image_id: &Uuid) -> Result<ProjectImage, AppError>;
    async fn delete_image(&self, image_id: &Uuid) -> Result<ProjectImage, AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }

    async fn insert_image(
        &self,
        project_id: &Uuid,
        image: &NewImage,
        sort_order: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO project_images (project_id, image_path, is_primary, sort_order) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(project_id)
        .bind(&image.image_path)
        .bind(image.is_primary)
        .bind(sort_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn images_for_project(&self, project_id: &Uuid) -> Result<Vec<ProjectImage>, AppError> {
        let images = sqlx::query_as::<_, ProjectImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images WHERE project_id = $1 ORDER BY sort_order"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(
        &self,
        fields: &ProjectFields,
        images: &[NewImage],
    ) -> Result<Uuid, AppError> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO projects \
                 (title, description, technology, features, video_link, \
                  github_link, playstore_link, appstore_link) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.technology)
        .bind(&fields.features)
        .bind(&fields.video_link)
        .bind(&fields.github_link)
        .bind(&fields.playstore_link)
        .bind(&fields.appstore_link)
        .fetch_one(&self.pool)
        .await?;

        for (index, image) in images.iter().enumerate() {
            self.insert_image(&id, image, index as i32).await?;
        }

        Ok(id)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<ProjectResponse, AppError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        let images = self.images_for_project(id).await?;

        Ok(ProjectResponse::from_parts(project, images))
    }

    async fn list_projects(
        &self,
        technology: Option<String>,
    ) -> Result<Vec<ProjectResponse>, AppError> {
        let projects = match technology {
            Some(tech) => {
                sqlx::query_as::<_, Project>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects \
                     WHERE technology = $1 ORDER BY created_at DESC"
                ))
                .bind(tech)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Project>(&format!(
                    "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };

        let ids: Vec<Uuid> = projects.iter().map(|p| p.id).collect();
        let images = sqlx::query_as::<_, ProjectImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images \
             WHERE project_id = ANY($1) ORDER BY sort_order"
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_project: HashMap<Uuid, Vec<ProjectImage>> = HashMap::new();
        for image in images {
            by_project.entry(image.project_id).or_default().push(image);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let images = by_project.remove(&project.id).unwrap_or_default();
                ProjectResponse::from_parts(project, images)
            })
            .collect())
    }

    async fn update_project(
        &self,
        id: &Uuid,
        fields: &ProjectFields,
        new_images: &[NewImage],
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE projects SET \
                 title = $1, description = $2, technology = $3, features = $4, \
                 video_link = $5, github_link = $6, playstore_link = $7, appstore_link = $8 \
             WHERE id = $9",
        )
        .bind(&fields.title)
        .bind(&fields.description)
        .bind(&fields.technology)
        .bind(&fields.features)
        .bind(&fields.video_link)
        .bind(&fields.github_link)
        .bind(&fields.playstore_link)
        .bind(&fields.appstore_link)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        if new_images.is_empty() {
            return Ok(());
        }

        // Appended images continue the existing ordering.
        let next_sort_order: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(sort_order) + 1, 0) FROM project_images WHERE project_id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        for (index, image) in new_images.iter().enumerate() {
            self.insert_image(id, image, next_sort_order + index as i32)
                .await?;
        }

        Ok(())
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        // Image rows go with the project via ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }

    async fn get_image(&self, image_id: &Uuid) -> Result<ProjectImage, AppError> {
        sqlx::query_as::<_, ProjectImage>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM project_images WHERE id = $1"
        ))
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
    }

    async fn delete_image(&self, image_id: &Uuid) -> Result<ProjectImage, AppError> {
        sqlx::query_as::<_, ProjectImage>(&format!(
            "DELETE FROM project_images WHERE id = $1 RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(image_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
    }
}
