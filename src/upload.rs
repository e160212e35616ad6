//! Client-side image upload: validation, encoding and submission.

use std::path::Path;

use crate::api_client::CustomerApiClient;
use crate::data_uri;
use crate::errors::{AppError, ResultExt};
use crate::models::UploadImage;
use crate::notices::Notices;

/// Maximum number of images a customer may hold.
pub const MAX_IMAGES: usize = 10;
/// Maximum size of a single image in bytes (5 MiB).
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
/// MIME types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// A file picked by the user, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, inferring its type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, content_type_for(path), bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Encodes the file as the API's upload payload.
    pub fn to_upload_image(&self) -> UploadImage {
        UploadImage {
            image_data: data_uri::encode(&self.content_type, &self.bytes),
            file_name: Some(self.name.clone()),
            content_type: Some(self.content_type.clone()),
        }
    }
}

/// MIME type for a path, by extension. Unknown extensions map to
/// `application/octet-stream`.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Free slots left for a customer holding `current` images.
pub fn remaining_slots(current: usize) -> usize {
    MAX_IMAGES.saturating_sub(current)
}

/// Text shown on the drop zone.
pub fn slots_label(current: usize) -> String {
    match remaining_slots(current) {
        0 => "Maximum images reached".to_string(),
        1 => "1 slot remaining".to_string(),
        n => format!("{} slots remaining", n),
    }
}

/// Result of checking a selection against type, size and slot limits.
#[derive(Debug, Default)]
pub struct UploadValidation {
    pub accepted: Vec<SelectedFile>,
    /// One message per rejected file, plus one if the selection was truncated.
    pub rejections: Vec<String>,
}

/// Filters a selection down to what may be uploaded.
///
/// Each file is checked for type, then size. Files passing both are kept in
/// order and truncated to the remaining slot count.
pub fn validate_files(files: Vec<SelectedFile>, current_image_count: usize) -> UploadValidation {
    let mut result = UploadValidation::default();

    for file in files {
        if !ALLOWED_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            result
                .rejections
                .push(format!("{} is not a supported image format", file.name));
            continue;
        }

        if file.size() > MAX_FILE_SIZE {
            result
                .rejections
                .push(format!("{} is too large. Maximum size is 5MB", file.name));
            continue;
        }

        result.accepted.push(file);
    }

    let remaining = remaining_slots(current_image_count);
    if result.accepted.len() > remaining {
        result.rejections.push(format!(
            "Can only upload {} more images. Maximum is {} per customer.",
            remaining, MAX_IMAGES
        ));
        result.accepted.truncate(remaining);
    }

    result
}

/// Uploads images for one customer.
pub struct ImageUploader<'a> {
    client: &'a CustomerApiClient,
    customer_id: i64,
    current_image_count: usize,
}

impl<'a> ImageUploader<'a> {
    pub fn new(client: &'a CustomerApiClient, customer_id: i64, current_image_count: usize) -> Self {
        Self {
            client,
            customer_id,
            current_image_count,
        }
    }

    /// Validates `files` and uploads the accepted ones. Returns how many
    /// files the server accepted.
    ///
    /// A single file goes to the single-image endpoint, several go as one
    /// batch. Rejections and the outcome are pushed to `notices`. If nothing
    /// passes validation no request is made and `Ok(0)` is returned.
    /// A failed request fails the whole selection.
    pub async fn upload(
        &self,
        files: Vec<SelectedFile>,
        notices: &mut Notices,
    ) -> Result<usize, AppError> {
        let validation = validate_files(files, self.current_image_count);
        for rejection in validation.rejections {
            notices.error(rejection);
        }

        if validation.accepted.is_empty() {
            return Ok(0);
        }

        let images: Vec<UploadImage> = validation
            .accepted
            .iter()
            .map(SelectedFile::to_upload_image)
            .collect();

        let result = if images.len() == 1 {
            self.client
                .upload_image(self.customer_id, &images[0])
                .await
                .map(|_| ())
        } else {
            self.client
                .upload_images(self.customer_id, images)
                .await
                .map(|_| ())
        };

        match result {
            Ok(()) => {
                if validation.accepted.len() == 1 {
                    notices.success("Image uploaded successfully!");
                } else {
                    notices.success(format!(
                        "{} images uploaded successfully!",
                        validation.accepted.len()
                    ));
                }
                Ok(validation.accepted.len())
            }
            Err(e) => {
                tracing::error!("Upload error: {}", e);
                notices.error(
                    e.server_message()
                        .unwrap_or_else(|| "Failed to upload images".to_string()),
                );
                Err(e)
            }
        }
    }
}
