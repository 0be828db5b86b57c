//! CSV Export
//!
//! Writes employees and departments to CSV files.

use std::path::Path;

use anyhow::Result;

use crate::domain::{Department, Employee};

/// Write employees to CSV file
pub fn write_employees(path: &Path, employees: &[Employee]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "employee_id",
        "first_name",
        "last_name",
        "email",
        "salary",
        "department_id",
        "date_joined",
        "status",
    ])?;

    for emp in employees {
        wtr.write_record([
            emp.employee_id.map(|id| id.to_string()).unwrap_or_default(),
            emp.first_name.clone(),
            emp.last_name.clone(),
            emp.email.clone(),
            emp.salary.to_string(),
            emp.department_id.to_string(),
            emp.date_joined
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            emp.status.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(employees.len())
}

/// Write departments to CSV file
pub fn write_departments(path: &Path, departments: &[Department]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["department_id", "department_name", "location", "created_at"])?;

    for dept in departments {
        wtr.write_record([
            dept.department_id.to_string(),
            dept.department_name.clone(),
            dept.location.clone(),
            dept.created_at.clone().unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(departments.len())
}
