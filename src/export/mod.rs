//! Export
//!
//! Writes what the current tab shows to disk.
//!
//! - 'e' key or `:export` triggers export for the current tab
//! - Employees, Departments → CSV
//! - Analytics panels that have loaded → JSON
//! - Files saved to the configured export dir, else `<data dir>/exports`

mod csv_export;
mod json_export;

pub use csv_export::{write_departments, write_employees};
pub use json_export::write_analytics;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::{App, Tab};
use crate::core::{Action, NotifyLevel};

/// Resolve the export directory, creating it if needed
pub fn export_dir(configured: Option<&Path>) -> std::io::Result<PathBuf> {
    let dir = match configured {
        Some(dir) => dir.to_path_buf(),
        None => crate::config::data_dir()
            .map(|dir| dir.join("exports"))
            .unwrap_or_else(|| PathBuf::from(".roster").join("exports")),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Generate a timestamped filename
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// Export the current tab, reporting the outcome as a notification
pub fn export_current_tab(app: &App) -> Action {
    match app.current_tab {
        Tab::Employees => match app.employees.ready() {
            Some(list) if !list.is_empty() => write_to(app, "employees", "csv", |path| {
                write_employees(path, list)
            }),
            _ => warn("No employees to export"),
        },
        Tab::Departments => match app.departments.ready() {
            Some(list) if !list.is_empty() => write_to(app, "departments", "csv", |path| {
                write_departments(path, list)
            }),
            _ => warn("No departments to export"),
        },
        Tab::Analytics => {
            let panels = app.loaded_analytics();
            if panels.is_empty() {
                return warn("No analytics loaded yet");
            }
            write_to(app, "analytics", "json", |path| write_analytics(path, &panels))
        }
    }
}

fn write_to<F>(app: &App, prefix: &str, extension: &str, write: F) -> Action
where
    F: FnOnce(&Path) -> anyhow::Result<usize>,
{
    let dir = match export_dir(app.export_dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!(error = %e, "failed to create export directory");
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            );
        }
    };

    let filename = generate_filename(prefix, extension);
    let path = dir.join(&filename);

    match write(&path) {
        Ok(count) => {
            tracing::info!(path = %path.display(), count, "exported {prefix}");
            Action::Notify(
                format!("Exported {} {} to {}", count, prefix, path.display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}

fn warn(message: &str) -> Action {
    Action::Notify(message.to_string(), NotifyLevel::Warn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use crate::infrastructure::{DepartmentTarget, RuntimeEvent};

    #[test]
    fn test_filename_has_prefix_and_extension() {
        let name = generate_filename("employees", "csv");
        assert!(name.starts_with("employees-"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_nothing_loaded_warns() {
        let app = App::new();
        assert_eq!(
            export_current_tab(&app),
            Action::Notify("No employees to export".to_string(), NotifyLevel::Warn)
        );
    }

    #[test]
    fn test_departments_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new();
        app.export_dir = Some(dir.path().to_path_buf());
        app.show_tab(Tab::Departments);
        app.apply_event(RuntimeEvent::DepartmentsLoaded {
            target: DepartmentTarget::List,
            result: Ok(vec![Department {
                department_id: 1,
                department_name: "Research".into(),
                location: "Berlin".into(),
                created_at: None,
            }]),
        });

        let Action::Notify(message, level) = export_current_tab(&app) else {
            panic!("expected a notification");
        };
        assert_eq!(level, NotifyLevel::Info);
        assert!(message.starts_with("Exported 1 departments"));

        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }
}
