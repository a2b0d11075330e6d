use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use chrono::Utc;
use rand::Rng;

use crate::errors::AppError;

/// Extensions accepted for uploaded images. `infer` reports "jpg" for
/// JPEG content, so the sniffed side is checked against the same set.
const ALLOWED_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

pub const MAX_IMAGES_PER_REQUEST: usize = 10;
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const TYPE_ERROR: &str = "Images only (jpeg, jpg, png, gif, webp)";

/// Disk-backed store for uploaded images, addressed by generated file
/// name and exposed under a public URL prefix.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_prefix: String,
}

impl ImageStore {
    pub fn new(root: &str, public_prefix: &str) -> Self {
        ImageStore {
            root: PathBuf::from(root),
            public_prefix: public_prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Validates an accepted upload and writes it under a fresh
    /// collision-resistant name. Returns the public relative path.
    pub async fn save(&self, upload: TempFile) -> Result<String, AppError> {
        let extension = upload
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| AppError::invalid_field("images", TYPE_ERROR))?;

        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::invalid_field("images", TYPE_ERROR));
        }

        if upload.size > MAX_IMAGE_BYTES {
            return Err(AppError::invalid_field(
                "images",
                "Image exceeds the 5 MiB limit",
            ));
        }

        // The claimed extension is cheap to fake; sniff the content too.
        let sniffed = infer::get_from_path(upload.file.path())?
            .map(|kind| kind.extension())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(ext));
        if sniffed.is_none() {
            return Err(AppError::invalid_field("images", TYPE_ERROR));
        }

        let file_name = generate_file_name(&extension);
        let destination = self.root.join(&file_name);

        tokio::fs::copy(upload.file.path(), &destination).await?;

        Ok(format!("{}/{}", self.public_prefix, file_name))
    }

    /// Best-effort unlink; a missing file is not an error. Only the file
    /// name component of the stored path is used.
    pub async fn delete(&self, image_path: &str) -> Result<(), AppError> {
        let Some(file_name) = Path::new(image_path).file_name() else {
            tracing::warn!("Refusing to delete malformed image path: {}", image_path);
            return Ok(());
        };

        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::from(e)),
        }
    }
}

fn generate_file_name(extension: &str) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);
    format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension)
}
