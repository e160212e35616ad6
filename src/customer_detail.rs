//! Customer detail page: view, inline edit, delete, and image management.

use std::path::{Path, PathBuf};

use crate::api_client::CustomerApiClient;
use crate::confirm::DeleteConfirmation;
use crate::customer_form::CustomerForm;
use crate::errors::AppError;
use crate::gallery::{self, ImageGallery};
use crate::models::Customer;
use crate::notices::Notices;
use crate::routes::Route;
use crate::upload::{ImageUploader, SelectedFile};

#[derive(Debug, Clone, PartialEq)]
pub enum DetailMode {
    Viewing,
    Editing(CustomerForm),
}

/// State of the detail page for one customer.
#[derive(Debug)]
pub struct CustomerDetailPage {
    customer_id: i64,
    customer: Option<Customer>,
    pub gallery: ImageGallery,
    image_count: usize,
    mode: DetailMode,
    pub delete: DeleteConfirmation<i64>,
    loading: bool,
    pub notices: Notices,
    pub navigation: Option<Route>,
}

impl CustomerDetailPage {
    pub fn new(customer_id: i64) -> Self {
        Self {
            customer_id,
            customer: None,
            gallery: ImageGallery::new(Vec::new()),
            image_count: 0,
            mode: DetailMode::Viewing,
            delete: DeleteConfirmation::new("Delete Customer", "Delete Customer"),
            loading: true,
            notices: Notices::new(),
            navigation: None,
        }
    }

    pub fn customer_id(&self) -> i64 {
        self.customer_id
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> &DetailMode {
        &self.mode
    }

    /// Fetches the customer and its images side by side.
    ///
    /// A failed customer fetch sends the user back to the list. A failed
    /// image fetch is only logged.
    pub async fn load(&mut self, client: &CustomerApiClient) {
        self.loading = true;
        let (customer, images) = tokio::join!(
            client.get_customer(self.customer_id),
            client.list_images(self.customer_id)
        );

        match customer {
            Ok(customer) => self.customer = Some(customer),
            Err(e) => {
                tracing::error!("Failed to load customer {}: {}", self.customer_id, e);
                self.notices.error("Failed to load customer details");
                self.navigation = Some(Route::CustomerList);
                self.loading = false;
                return;
            }
        }
        self.apply_images(images);
        self.loading = false;
    }

    /// Refetches the image list.
    pub async fn fetch_images(&mut self, client: &CustomerApiClient) {
        let images = client.list_images(self.customer_id).await;
        self.apply_images(images);
    }

    fn apply_images(&mut self, images: Result<Vec<crate::models::CustomerImage>, AppError>) {
        match images {
            Ok(images) => {
                self.image_count = images.len();
                self.gallery.set_images(images);
            }
            Err(e) => {
                tracing::error!("Failed to load images: {}", e);
            }
        }
    }

    // ============ Editing ============

    /// Switches to the form, seeded from the loaded customer.
    pub fn start_edit(&mut self) -> Option<&mut CustomerForm> {
        let customer = self.customer.as_ref()?;
        self.mode = DetailMode::Editing(CustomerForm::from_customer(customer));
        self.form_mut()
    }

    pub fn form_mut(&mut self) -> Option<&mut CustomerForm> {
        match &mut self.mode {
            DetailMode::Editing(form) => Some(form),
            DetailMode::Viewing => None,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.mode = DetailMode::Viewing;
    }

    /// Submits the draft. On failure the form stays open.
    pub async fn save_edit(&mut self, client: &CustomerApiClient) -> Result<(), AppError> {
        let payload = match &self.mode {
            DetailMode::Editing(form) => form.submit(),
            DetailMode::Viewing => {
                return Err(AppError::InternalError("no edit in progress".to_string()))
            }
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e);
            }
        };

        match client.update_customer(self.customer_id, &payload).await {
            Ok(updated) => {
                self.customer = Some(updated);
                self.mode = DetailMode::Viewing;
                self.notices.success("Customer updated successfully");
                Ok(())
            }
            Err(e) => {
                self.notices.error("Failed to update customer");
                Err(e)
            }
        }
    }

    // ============ Customer deletion ============

    pub fn request_delete(&mut self) {
        let name = self
            .customer
            .as_ref()
            .map(|c| c.name.as_str())
            .unwrap_or_default();
        let message = format!(
            "Are you sure you want to delete \"{}\"? This action cannot be undone and will also delete all associated images and data.",
            name
        );
        self.delete.open(self.customer_id, message);
    }

    /// Deletes the customer after confirmation.
    ///
    /// Success navigates to the list. Failure closes the prompt and leaves the
    /// page as it was.
    pub async fn confirm_delete(&mut self, client: &CustomerApiClient) -> Result<(), AppError> {
        let Some(id) = self.delete.begin() else {
            return Ok(());
        };

        match client.delete_customer(id).await {
            Ok(()) => {
                self.delete.succeed();
                self.notices.success("Customer deleted successfully");
                self.navigation = Some(Route::CustomerList);
                Ok(())
            }
            Err(e) => {
                self.delete.fail_and_close();
                self.notices.error("Failed to delete customer");
                Err(e)
            }
        }
    }

    // ============ Images ============

    /// Uploads images, then refetches the list after any successful request.
    pub async fn upload_images(
        &mut self,
        client: &CustomerApiClient,
        files: Vec<SelectedFile>,
    ) -> Result<usize, AppError> {
        let uploader = ImageUploader::new(client, self.customer_id, self.image_count);
        let uploaded = uploader.upload(files, &mut self.notices).await?;

        if uploaded > 0 {
            self.fetch_images(client).await;
        }
        Ok(uploaded)
    }

    pub fn request_image_delete(&mut self, image_id: i64) -> Result<(), AppError> {
        self.gallery.request_delete(image_id)
    }

    /// Deletes the image pending confirmation, then refetches.
    ///
    /// On failure the prompt stays open with its button re-enabled.
    pub async fn confirm_image_delete(
        &mut self,
        client: &CustomerApiClient,
    ) -> Result<(), AppError> {
        let Some(target) = self.gallery.delete.begin() else {
            return Ok(());
        };

        match client.delete_image(self.customer_id, target.id).await {
            Ok(()) => {
                self.gallery.delete.succeed();
                self.gallery.remove(target.id);
                self.image_count = self.gallery.len();
                self.notices.success("Image deleted successfully");
                self.fetch_images(client).await;
                Ok(())
            }
            Err(e) => {
                self.gallery.delete.fail();
                self.notices.error("Failed to delete image");
                Err(e)
            }
        }
    }

    /// Saves an image from the gallery into `dir`.
    pub async fn download_image(&mut self, image_id: i64, dir: &Path) -> Result<PathBuf, AppError> {
        let image = self
            .gallery
            .find(image_id)
            .ok_or_else(|| AppError::NotFound(format!("image {} not found", image_id)))?;

        match gallery::download_image(image, dir).await {
            Ok(path) => {
                self.notices.success("Image downloaded");
                Ok(path)
            }
            Err(e) => {
                self.notices.error("Failed to download image");
                Err(e)
            }
        }
    }
}
