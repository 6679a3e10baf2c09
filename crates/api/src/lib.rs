//! # Campus ERP API
//!
//! Typed HTTP client for the ERP REST API.
//!
//! ## Components
//!
//! - `ApiClient` - base URL, bearer credential and response handling
//! - `endpoints` - one `impl ApiClient` block per server area
//! - `RequestScope` - cancellation of in-flight requests

pub mod client;
pub mod endpoints;
pub mod scope;

pub use client::ApiClient;
pub use endpoints::auth::FaceImage;
pub use endpoints::courses::MaterialUpload;
pub use endpoints::users::ProfileEndpoint;
pub use scope::{CancelHandle, RequestScope};
