use crate::errors::AppError;
use crate::models::{BatchUploadRequest, CreateCustomer, Customer, CustomerImage, UploadImage};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Client for the customer REST API.
///
/// One method per endpoint. No retries, no caching: every non-2xx answer is
/// returned as an error and the caller decides what to tell the user.
#[derive(Clone)]
pub struct CustomerApiClient {
    client: Client,
    base_url: String,
}

impl CustomerApiClient {
    /// Creates a new `CustomerApiClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API base, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let client = Client::builder().build().map_err(|e| {
            AppError::ExternalApiError(format!("Failed to create API client: {}", e))
        })?;

        Ok(Self::with_client(client, base_url))
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ============ Customers ============

    /// GET /customers
    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        tracing::info!("Fetching all customers");
        self.fetch_json(self.client.get(self.url("/customers")), "list customers")
            .await
    }

    /// GET /customers/{id}
    pub async fn get_customer(&self, id: i64) -> Result<Customer, AppError> {
        tracing::info!("Fetching customer {}", id);
        self.fetch_json(
            self.client.get(self.url(&format!("/customers/{}", id))),
            "get customer",
        )
        .await
    }

    /// GET /customers/leads
    pub async fn list_leads(&self) -> Result<Vec<Customer>, AppError> {
        tracing::info!("Fetching leads");
        self.fetch_json(self.client.get(self.url("/customers/leads")), "list leads")
            .await
    }

    /// GET /customers/customers-only
    pub async fn list_customers_only(&self) -> Result<Vec<Customer>, AppError> {
        tracing::info!("Fetching converted customers");
        self.fetch_json(
            self.client.get(self.url("/customers/customers-only")),
            "list customers only",
        )
        .await
    }

    /// POST /customers
    pub async fn create_customer(&self, customer: &CreateCustomer) -> Result<Customer, AppError> {
        tracing::info!("Creating customer: {}", customer.name);
        let created: Customer = self
            .fetch_json(
                self.client.post(self.url("/customers")).json(customer),
                "create customer",
            )
            .await?;
        tracing::info!("✓ Customer created: {}", created.id);
        Ok(created)
    }

    /// PUT /customers/{id}
    pub async fn update_customer(
        &self,
        id: i64,
        customer: &CreateCustomer,
    ) -> Result<Customer, AppError> {
        tracing::info!("Updating customer {}", id);
        self.fetch_json(
            self.client
                .put(self.url(&format!("/customers/{}", id)))
                .json(customer),
            "update customer",
        )
        .await
    }

    /// DELETE /customers/{id}
    pub async fn delete_customer(&self, id: i64) -> Result<(), AppError> {
        tracing::info!("Deleting customer {}", id);
        self.send(
            self.client.delete(self.url(&format!("/customers/{}", id))),
            "delete customer",
        )
        .await?;
        tracing::info!("✓ Customer {} deleted", id);
        Ok(())
    }

    // ============ Images ============

    /// GET /customers/{id}/images
    pub async fn list_images(&self, customer_id: i64) -> Result<Vec<CustomerImage>, AppError> {
        tracing::info!("Fetching images for customer {}", customer_id);
        self.fetch_json(
            self.client
                .get(self.url(&format!("/customers/{}/images", customer_id))),
            "list images",
        )
        .await
    }

    /// POST /customers/{id}/images
    ///
    /// A 2xx answer means the image was stored. `None` when the server sent
    /// no readable image back.
    pub async fn upload_image(
        &self,
        customer_id: i64,
        image: &UploadImage,
    ) -> Result<Option<CustomerImage>, AppError> {
        tracing::info!(
            "Uploading image {:?} for customer {}",
            image.file_name,
            customer_id
        );
        self.fetch_stored(
            self.client
                .post(self.url(&format!("/customers/{}/images", customer_id)))
                .json(image),
            "upload image",
        )
        .await
    }

    /// POST /customers/{id}/images/batch
    ///
    /// Empty when the server sent no readable list back.
    pub async fn upload_images(
        &self,
        customer_id: i64,
        images: Vec<UploadImage>,
    ) -> Result<Vec<CustomerImage>, AppError> {
        tracing::info!(
            "Uploading {} images for customer {}",
            images.len(),
            customer_id
        );
        let body = BatchUploadRequest { images };
        let stored = self
            .fetch_stored(
                self.client
                    .post(self.url(&format!("/customers/{}/images/batch", customer_id)))
                    .json(&body),
                "batch upload images",
            )
            .await?;
        Ok(stored.unwrap_or_default())
    }

    /// DELETE /customers/{id}/images/{imageId}
    pub async fn delete_image(&self, customer_id: i64, image_id: i64) -> Result<(), AppError> {
        tracing::info!("Deleting image {} of customer {}", image_id, customer_id);
        self.send(
            self.client.delete(self.url(&format!(
                "/customers/{}/images/{}",
                customer_id, image_id
            ))),
            "delete image",
        )
        .await?;
        Ok(())
    }

    /// GET /customers/{id}/images/count
    pub async fn image_count(&self, customer_id: i64) -> Result<u32, AppError> {
        self.fetch_json(
            self.client
                .get(self.url(&format!("/customers/{}/images/count", customer_id))),
            "image count",
        )
        .await
    }

    // ============ Plumbing ============

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response, AppError> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::ExternalApiError(format!("{} request failed: {}", action, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!("API {} returned {}: {}", action, status, error_text);
            return Err(AppError::from_status(status, error_text));
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<T, AppError> {
        let response = self.send(request, action).await?;
        response.json().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to parse {} response: {}", action, e))
        })
    }

    /// For writes where the status alone says the record was stored. An
    /// empty or unreadable body yields `None` instead of an error.
    async fn fetch_stored<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        action: &str,
    ) -> Result<Option<T>, AppError> {
        let response = self.send(request, action).await?;
        let body = response.text().await.map_err(|e| {
            AppError::ExternalApiError(format!("Failed to read {} response: {}", action, e))
        })?;

        if body.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable {} response: {}", action, e);
                Ok(None)
            }
        }
    }
}
