//! Create page for a new customer or lead.

use crate::api_client::CustomerApiClient;
use crate::customer_form::CustomerForm;
use crate::errors::AppError;
use crate::models::Customer;
use crate::notices::Notices;
use crate::routes::Route;

/// State of the "new customer or lead" page.
#[derive(Debug, Default)]
pub struct NewCustomerPage {
    pub form: CustomerForm,
    loading: bool,
    pub notices: Notices,
    pub navigation: Option<Route>,
}

impl NewCustomerPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Creates the record and navigates to it.
    ///
    /// On failure the server's `message` is shown when it sent one.
    pub async fn submit(&mut self, client: &CustomerApiClient) -> Result<Customer, AppError> {
        let payload = match self.form.submit() {
            Ok(payload) => payload,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e);
            }
        };

        self.loading = true;
        let result = client.create_customer(&payload).await;
        self.loading = false;

        match result {
            Ok(customer) => {
                self.notices.success("Customer created successfully!");
                self.navigation = Some(Route::CustomerDetail(customer.id));
                Ok(customer)
            }
            Err(e) => {
                self.notices.error(
                    e.message_field()
                        .unwrap_or_else(|| "Failed to create customer".to_string()),
                );
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.navigation = Some(Route::CustomerList);
    }
}
