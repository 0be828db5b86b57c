//! Infrastructure layer - External service integrations
//!
//! This layer contains:
//! - reqwest-based client for the employee/department REST API
//! - Tokio runtime bridge for async operations

pub mod api;
pub mod runtime;

pub use api::{ApiError, EmployeeApi, HttpApiClient};
pub use runtime::{
    AnalyticsPanel, DepartmentTarget, RuntimeBridge, RuntimeCommand, RuntimeEvent,
};
