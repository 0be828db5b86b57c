//! REST client for the employee analytics backend

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Department, Employee, NewDepartment, NewEmployee};
use crate::infrastructure::api::error::{extract_detail, ApiError};

/// Operations the front end needs from the backend
///
/// Abstracts over the HTTP transport so the runtime worker can be driven by
/// an in-process fake.
#[async_trait::async_trait]
pub trait EmployeeApi: Send + Sync + 'static {
    /// `GET /employees/`
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;

    /// `POST /employees/`
    async fn create_employee(&self, record: &NewEmployee) -> Result<(), ApiError>;

    /// `GET /departments/`
    async fn list_departments(&self) -> Result<Vec<Department>, ApiError>;

    /// `POST /departments/`
    async fn create_department(&self, record: &NewDepartment) -> Result<(), ApiError>;

    /// `GET /analytics/top_departments?limit=N`
    async fn top_departments(&self, limit: u32) -> Result<Value, ApiError>;

    /// `GET /analytics/salary_insights`
    async fn salary_insights(&self) -> Result<Value, ApiError>;

    /// `GET /analytics/department/{id}/stats`
    async fn department_stats(&self, department_id: i64) -> Result<Value, ApiError>;

    /// `GET /analytics/audit_summary?days=N`
    async fn audit_summary(&self, days: u32) -> Result<Value, ApiError>;

    /// `GET /employees/stats/count`
    async fn employee_count(&self) -> Result<u64, ApiError>;

    /// `GET /employees/stats/salary[?department_id=N]`, all departments
    /// when `department_id` is `None`
    async fn salary_statistics(&self, department_id: Option<i64>) -> Result<Value, ApiError>;

    /// `GET /analytics/employee/{id}/salary_growth?months_back=N`
    async fn salary_growth(&self, employee_id: i64, months_back: u32) -> Result<Value, ApiError>;
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

/// reqwest-backed implementation
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| transport(&url, &err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| extract_detail(&value));
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(|err| ApiError::Decode {
            url: url.clone(),
            message: err.to_string(),
        })
    }

    async fn post_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| transport(&url, &err))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // A rejection must carry a JSON body; anything else is undecodable
        let text = response.text().await.map_err(|err| ApiError::Decode {
            url: url.clone(),
            message: err.to_string(),
        })?;
        let value = serde_json::from_str::<Value>(&text).map_err(|err| ApiError::Decode {
            url: url.clone(),
            message: err.to_string(),
        })?;
        Err(ApiError::Status {
            url,
            status: status.as_u16(),
            detail: extract_detail(&value),
        })
    }
}

#[async_trait::async_trait]
impl EmployeeApi for HttpApiClient {
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json("/employees/").await
    }

    async fn create_employee(&self, record: &NewEmployee) -> Result<(), ApiError> {
        self.post_json("/employees/", record).await
    }

    async fn list_departments(&self) -> Result<Vec<Department>, ApiError> {
        self.get_json("/departments/").await
    }

    async fn create_department(&self, record: &NewDepartment) -> Result<(), ApiError> {
        self.post_json("/departments/", record).await
    }

    async fn top_departments(&self, limit: u32) -> Result<Value, ApiError> {
        self.get_json(&format!("/analytics/top_departments?limit={limit}"))
            .await
    }

    async fn salary_insights(&self) -> Result<Value, ApiError> {
        self.get_json("/analytics/salary_insights").await
    }

    async fn department_stats(&self, department_id: i64) -> Result<Value, ApiError> {
        self.get_json(&format!("/analytics/department/{department_id}/stats"))
            .await
    }

    async fn audit_summary(&self, days: u32) -> Result<Value, ApiError> {
        self.get_json(&format!("/analytics/audit_summary?days={days}"))
            .await
    }

    async fn employee_count(&self) -> Result<u64, ApiError> {
        let response: CountResponse = self.get_json("/employees/stats/count").await?;
        Ok(response.count)
    }

    async fn salary_statistics(&self, department_id: Option<i64>) -> Result<Value, ApiError> {
        match department_id {
            Some(id) => {
                self.get_json(&format!("/employees/stats/salary?department_id={id}"))
                    .await
            }
            None => self.get_json("/employees/stats/salary").await,
        }
    }

    async fn salary_growth(&self, employee_id: i64, months_back: u32) -> Result<Value, ApiError> {
        self.get_json(&format!(
            "/analytics/employee/{employee_id}/salary_growth?months_back={months_back}"
        ))
        .await
    }
}

fn transport(url: &str, err: &reqwest::Error) -> ApiError {
    ApiError::Transport {
        url: url.to_string(),
        message: err.to_string(),
    }
}
