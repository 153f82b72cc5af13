//! openhr-client — HTTP access to the OpenHR REST API.
//!
//! A thin typed client over reqwest: attaches the bearer token, decodes
//! the response envelope (`success: false` is a failure regardless of
//! status), and wraps every call in a bounded token-refresh-and-retry
//! decorator (one 401 triggers one refresh and one retry, nothing more).

pub mod api;
pub mod http;
pub mod session;

pub use api::{PermissionsApi, ResourceApi};
pub use http::ApiClient;
pub use session::{SessionTokens, TokenPair};
