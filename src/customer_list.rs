//! Customer list page: fetch once, filter locally.

use std::fmt;
use std::str::FromStr;

use crate::api_client::CustomerApiClient;
use crate::errors::AppError;
use crate::models::Customer;
use crate::notices::Notices;
use crate::routes::Route;

/// Lead/customer toggle on the list page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterType {
    #[default]
    All,
    Leads,
    Customers,
}

impl FilterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterType::All => "all",
            FilterType::Leads => "leads",
            FilterType::Customers => "customers",
        }
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Leads => customer.is_lead,
            FilterType::Customers => !customer.is_lead,
        }
    }
}

impl FromStr for FilterType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(FilterType::All),
            "leads" => Ok(FilterType::Leads),
            "customers" => Ok(FilterType::Customers),
            other => Err(AppError::Validation(format!(
                "unknown filter '{}', expected all, leads or customers",
                other
            ))),
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `customer` matches the search box.
///
/// Name and email match case-insensitively, phone as typed. An empty term
/// matches everything.
pub fn matches_search(customer: &Customer, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer.email.to_lowercase().contains(&needle)
        || customer.phone_number.contains(term)
}

/// Applies the toggle, then the search term.
pub fn filter_customers<'a>(
    customers: &'a [Customer],
    filter: FilterType,
    search_term: &str,
) -> Vec<&'a Customer> {
    customers
        .iter()
        .filter(|c| filter.matches(c))
        .filter(|c| matches_search(c, search_term))
        .collect()
}

/// Counts over the unfiltered list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CustomerStats {
    pub total: usize,
    pub leads: usize,
    pub customers: usize,
}

impl CustomerStats {
    pub fn from_customers(customers: &[Customer]) -> Self {
        let leads = customers.iter().filter(|c| c.is_lead).count();
        Self {
            total: customers.len(),
            leads,
            customers: customers.len() - leads,
        }
    }
}

/// State of the list page.
#[derive(Debug, Default)]
pub struct CustomerListPage {
    customers: Vec<Customer>,
    pub search_term: String,
    pub filter_type: FilterType,
    loading: bool,
    pub notices: Notices,
    pub navigation: Option<Route>,
}

impl CustomerListPage {
    pub fn new() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    /// Fetches every customer once. On failure the list stays as it was.
    pub async fn load(&mut self, client: &CustomerApiClient) {
        self.loading = true;
        match client.list_customers().await {
            Ok(customers) => {
                tracing::info!("Loaded {} customers", customers.len());
                self.customers = customers;
            }
            Err(e) => {
                tracing::error!("Failed to load customers: {}", e);
                self.notices.error("Failed to load customers");
            }
        }
        self.loading = false;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn set_filter(&mut self, filter: FilterType) {
        self.filter_type = filter;
    }

    /// Customers currently shown.
    pub fn visible(&self) -> Vec<&Customer> {
        filter_customers(&self.customers, self.filter_type, &self.search_term)
    }

    pub fn stats(&self) -> CustomerStats {
        CustomerStats::from_customers(&self.customers)
    }

    /// Word shown after the visible count.
    pub fn count_label(&self) -> &'static str {
        match self.filter_type {
            FilterType::Leads => "leads",
            FilterType::Customers => "customers",
            FilterType::All => "total",
        }
    }

    pub fn open_customer(&mut self, id: i64) {
        self.navigation = Some(Route::CustomerDetail(id));
    }

    pub fn create_customer(&mut self) {
        self.navigation = Some(Route::NewCustomer);
    }
}
