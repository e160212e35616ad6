//! Image grid and full-screen viewer state.

use std::path::{Path, PathBuf};

use crate::confirm::DeleteConfirmation;
use crate::data_uri;
use crate::errors::{AppError, ResultExt};
use crate::models::CustomerImage;

pub const DEFAULT_DOWNLOAD_NAME: &str = "customer-image.jpg";

/// Image pending deletion.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    pub id: i64,
    pub name: Option<String>,
}

/// Gallery over one customer's images.
///
/// `selected` is the index shown in the viewer, `None` while the viewer is
/// closed. It always points inside `images`.
#[derive(Debug, Clone)]
pub struct ImageGallery {
    images: Vec<CustomerImage>,
    selected: Option<usize>,
    pub delete: DeleteConfirmation<ImageRef>,
}

impl ImageGallery {
    pub fn new(images: Vec<CustomerImage>) -> Self {
        Self {
            images,
            selected: None,
            delete: DeleteConfirmation::new("Delete Image", "Delete Image"),
        }
    }

    pub fn images(&self) -> &[CustomerImage] {
        &self.images
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Replaces the images after a refetch, keeping the selection in bounds.
    pub fn set_images(&mut self, images: Vec<CustomerImage>) {
        self.images = images;
        self.selected = match self.selected {
            _ if self.images.is_empty() => None,
            Some(i) => Some(i.min(self.images.len() - 1)),
            None => None,
        };
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&CustomerImage> {
        self.selected.and_then(|i| self.images.get(i))
    }

    /// Opens the viewer at `index`. Out-of-range indexes are ignored.
    pub fn open(&mut self, index: usize) {
        if index < self.images.len() {
            self.selected = Some(index);
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Next image, wrapping to the first. No-op while closed.
    pub fn next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1) % self.images.len());
        }
    }

    /// Previous image, wrapping to the last. No-op while closed.
    pub fn prev(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(if i == 0 { self.images.len() - 1 } else { i - 1 });
        }
    }

    /// Opens the confirmation for deleting `image_id`.
    pub fn request_delete(&mut self, image_id: i64) -> Result<(), AppError> {
        let image = self
            .images
            .iter()
            .find(|img| img.id == image_id)
            .ok_or_else(|| AppError::NotFound(format!("image {} is not in the gallery", image_id)))?;

        let name = image.file_name.clone();
        let message = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone.",
            name.as_deref().unwrap_or("this image")
        );
        self.delete.open(ImageRef { id: image_id, name }, message);
        Ok(())
    }

    /// Drops an image locally, keeping the selection in bounds.
    ///
    /// Removing the shown image moves to the one that took its place, or to
    /// the new last image if it was last.
    pub fn remove(&mut self, image_id: i64) -> Option<CustomerImage> {
        let pos = self.images.iter().position(|img| img.id == image_id)?;
        let removed = self.images.remove(pos);

        self.selected = match self.selected {
            _ if self.images.is_empty() => None,
            Some(i) if pos < i => Some(i - 1),
            Some(i) => Some(i.min(self.images.len() - 1)),
            None => None,
        };

        Some(removed)
    }

    /// Caption for the image at `index`.
    pub fn display_name(&self, index: usize) -> String {
        self.images
            .get(index)
            .and_then(|img| img.file_name.clone())
            .unwrap_or_else(|| format!("Image {}", index + 1))
    }

    /// "3 / 7" style counter for the viewer.
    pub fn position_label(&self) -> Option<String> {
        self.selected
            .map(|i| format!("{} / {}", i + 1, self.images.len()))
    }

    pub fn find(&self, image_id: i64) -> Option<&CustomerImage> {
        self.images.iter().find(|img| img.id == image_id)
    }
}

/// File name used when saving an image.
pub fn download_name(image: &CustomerImage) -> String {
    image
        .file_name
        .as_deref()
        .and_then(|n| Path::new(n).file_name())
        .map(|f| f.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_NAME.to_string())
}

/// Decodes an image and writes it into `dir`. Returns the written path.
pub async fn download_image(image: &CustomerImage, dir: &Path) -> Result<PathBuf, AppError> {
    let decoded = data_uri::decode(&image.image_data)
        .with_context(|| format!("Decoding image {}", image.id))?;
    let path = dir.join(download_name(image));

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create {}", dir.display()))?;
    tokio::fs::write(&path, &decoded.bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Image {} downloaded to {}", image.id, path.display());
    Ok(path)
}
