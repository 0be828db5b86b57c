//! Records exchanged with the employee/department REST API

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Employee as returned by `GET /employees/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salary: f64,
    pub department_id: i64,
    #[serde(default)]
    pub date_joined: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// One list row: `First Last - email - $salary - Dept: id`
    pub fn list_line(&self) -> String {
        format!(
            "{} - {} - ${} - Dept: {}",
            self.full_name(),
            self.email,
            self.salary,
            self.department_id
        )
    }
}

/// Department as returned by `GET /departments/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub department_id: i64,
    pub department_name: String,
    pub location: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Department {
    /// One list row: `Name - Location (ID: n)`
    pub fn list_line(&self) -> String {
        format!(
            "{} - {} (ID: {})",
            self.department_name, self.location, self.department_id
        )
    }

    /// Text shown once the department is chosen for the employee form
    pub fn selection_label(&self) -> String {
        format!("{} - {}", self.department_name, self.location)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Active,
    Resigned,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Resigned => "resigned",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            EmployeeStatus::Active => EmployeeStatus::Resigned,
            EmployeeStatus::Resigned => EmployeeStatus::Active,
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /employees/`
///
/// `salary` is `None` when the form text has no leading finite number; it is sent
/// as `null` and left for the backend to reject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salary: Option<f64>,
    pub department_id: i64,
    pub date_joined: String,
    pub status: EmployeeStatus,
}

/// Body of `POST /departments/`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDepartment {
    pub department_name: String,
    pub location: String,
}
