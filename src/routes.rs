//! Navigation targets requested by page controllers.

use std::fmt;

/// Navigation targets a page controller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CustomerList,
    NewCustomer,
    CustomerDetail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::CustomerList => "/customers".to_string(),
            Route::NewCustomer => "/customers/new".to_string(),
            Route::CustomerDetail(id) => format!("/customers/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Route::CustomerList.path(), "/customers");
        assert_eq!(Route::NewCustomer.path(), "/customers/new");
        assert_eq!(Route::CustomerDetail(42).to_string(), "/customers/42");
    }
}
