//! Customer Desk Library
//!
//! Client-side core of the customer/lead manager: a typed client for the
//! customer REST API plus the state behind each page (list, detail, create),
//! the customer form, image upload validation and the image gallery.
//!
//! # Modules
//!
//! - `api_client`: REST client for customer and image endpoints.
//! - `config`: Configuration management.
//! - `confirm`: Delete confirmation state.
//! - `customer_detail`: Detail page (view, edit, delete, images).
//! - `customer_form`: Create/edit form draft and browser-level validation.
//! - `customer_list`: List page with lead/customer toggle and search.
//! - `customer_new`: Create page.
//! - `data_uri`: Base64 `data:` URI helpers.
//! - `errors`: Error handling types.
//! - `gallery`: Image grid/viewer navigation and download.
//! - `models`: API data models.
//! - `notices`: User-facing success/error messages.
//! - `routes`: Navigation targets.
//! - `upload`: Upload validation and submission.

pub mod api_client;
pub mod config;
pub mod confirm;
pub mod customer_detail;
pub mod customer_form;
pub mod customer_list;
pub mod customer_new;
pub mod data_uri;
pub mod errors;
pub mod gallery;
pub mod models;
pub mod notices;
pub mod routes;
pub mod upload;
