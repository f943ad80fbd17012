pub mod client;
pub mod error;

pub use client::{ApiClient, ApiResult, DEFAULT_API_URL};
pub use error::ApiError;
