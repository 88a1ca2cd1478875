//! Upstream directory client: trait seam, wire types, HTTP implementation.
//!
//! Everything above this module is transport-agnostic. The client performs no
//! retries and holds no token state; it translates one call into one upstream
//! round trip (plus pagination) and one classified result.

pub mod api;
pub mod http;
pub mod types;

pub use api::DirectoryApi;
pub use http::{DEFAULT_BASE_URL, HttpDirectoryClient};
pub use types::{
    Credentials, Department, IssuedToken, ROOT_DEPARTMENT_ID, User, UserSummary,
};
