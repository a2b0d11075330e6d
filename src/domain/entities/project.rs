use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technology: String,
    pub features: Option<String>,
    pub video_link: Option<String>,
    pub github_link: Option<String>,
    pub playstore_link: Option<String>,
    pub appstore_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectImage {
    pub id: Uuid,
    pub project_id: Uuid,
    pub image_path: String,
    pub is_primary: bool,
    pub sort_order: i32,
}

/// Image row prepared for insertion; `sort_order` is assigned by the
/// repository from the append position.
#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub image_path: String,
    pub is_primary: bool,
}

// ───── API Response Models ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub technology: String,
    pub features: Option<String>,
    pub video_link: Option<String>,
    pub github_link: Option<String>,
    pub playstore_link: Option<String>,
    pub appstore_link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub images: Vec<ImageResponse>,
}

impl ProjectResponse {
    pub fn from_parts(project: Project, images: Vec<ProjectImage>) -> Self {
        ProjectResponse {
            id: project.id,
            title: project.title,
            description: project.description,
            technology: project.technology,
            features: project.features,
            video_link: project.video_link,
            github_link: project.github_link,
            playstore_link: project.playstore_link,
            appstore_link: project.appstore_link,
            created_at: project.created_at,
            images: images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub id: Uuid,
    pub image_path: String,
    pub is_primary: bool,
}

impl From<ProjectImage> for ImageResponse {
    fn from(image: ProjectImage) -> Self {
        ImageResponse {
            id: image.id,
            image_path: image.image_path,
            is_primary: image.is_primary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectCreatedResponse {
    pub success: bool,
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub success: bool,
    pub message: String,
}

impl OperationResponse {
    pub fn ok(message: &str) -> Self {
        OperationResponse {
            success: true,
            message: message.to_string(),
        }
    }
}

// ───── Input & Validation ───────────────────────────────────────────

/// Multipart payload for project create/update: scalar text fields plus
/// up to ten `images` file parts.
#[derive(Debug, MultipartForm)]
pub struct ProjectForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub technology: Option<Text<String>>,
    pub features: Option<Text<String>>,
    pub video_link: Option<Text<String>>,
    pub github_link: Option<Text<String>>,
    pub playstore_link: Option<Text<String>>,
    pub appstore_link: Option<Text<String>>,

    #[multipart(rename = "images", limit = "5MiB")]
    pub images: Vec<TempFile>,
}

impl ProjectForm {
    pub fn into_parts(self) -> (ProjectFields, Vec<TempFile>) {
        let fields = ProjectFields {
            title: required_text(self.title),
            description: required_text(self.description),
            technology: required_text(self.technology),
            features: optional_text(self.features),
            video_link: optional_text(self.video_link),
            github_link: optional_text(self.github_link),
            playstore_link: optional_text(self.playstore_link),
            appstore_link: optional_text(self.appstore_link),
        };
        (fields, self.images)
    }
}

fn required_text(field: Option<Text<String>>) -> String {
    field.map(|t| t.0.trim().to_string()).unwrap_or_default()
}

fn optional_text(field: Option<Text<String>>) -> Option<String> {
    field
        .map(|t| t.0.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Validate)]
pub struct ProjectFields {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[validate(length(min = 1, message = "Technology is required"))]
    pub technology: String,

    pub features: Option<String>,
    pub video_link: Option<String>,
    pub github_link: Option<String>,
    pub playstore_link: Option<String>,
    pub appstore_link: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListProjectsQuery {
    pub technology: Option<String>,
}
