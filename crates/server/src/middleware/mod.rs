//! Request middleware and extractors.

pub mod auth;
pub mod request_id;

pub use auth::{RequireAdmin, RequireUser};
pub use request_id::request_id_middleware;
