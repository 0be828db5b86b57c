mod client;
mod error;

pub use client::{EmployeeApi, HttpApiClient};
pub use error::{extract_detail, ApiError};
