//! Async worker - runs in the Tokio runtime and performs the REST calls

use std::sync::mpsc::Sender;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::infrastructure::api::{ApiError, EmployeeApi};
use crate::infrastructure::runtime::bridge::{
    AnalyticsPanel, DepartmentTarget, RuntimeCommand, RuntimeEvent,
};

/// Run the async worker loop
///
/// Every command becomes its own task, so responses may arrive in any order.
pub async fn run_async_worker(
    api: Arc<dyn EmployeeApi>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: Sender<RuntimeEvent>,
) -> Result<()> {
    while let Some(cmd) = cmd_rx.recv().await {
        if matches!(cmd, RuntimeCommand::Shutdown) {
            tracing::debug!("worker shutting down");
            return Ok(());
        }

        let api = Arc::clone(&api);
        let evt_tx = evt_tx.clone();
        tokio::spawn(async move {
            let Some(event) = execute(api.as_ref(), cmd).await else {
                return;
            };
            if evt_tx.send(event).is_err() {
                tracing::debug!("event receiver dropped");
            }
        });
    }
    Ok(())
}

async fn execute(api: &dyn EmployeeApi, cmd: RuntimeCommand) -> Option<RuntimeEvent> {
    let event = match cmd {
        RuntimeCommand::Shutdown => return None,

        RuntimeCommand::LoadEmployees => {
            RuntimeEvent::EmployeesLoaded(logged("load employees", api.list_employees().await))
        }

        RuntimeCommand::LoadDepartments { target } => {
            let what = match target {
                DepartmentTarget::List => "load departments",
                DepartmentTarget::Sidebar => "load department sidebar",
            };
            RuntimeEvent::DepartmentsLoaded {
                target,
                result: logged(what, api.list_departments().await),
            }
        }

        RuntimeCommand::LoadHeadcount => {
            RuntimeEvent::HeadcountLoaded(logged("load headcount", api.employee_count().await))
        }

        RuntimeCommand::CreateEmployee { record } => {
            let result = logged("add employee", api.create_employee(&record).await);
            if result.is_ok() {
                tracing::info!(email = %record.email, "employee created");
            }
            RuntimeEvent::EmployeeCreated(result)
        }

        RuntimeCommand::CreateDepartment { record } => {
            let result = logged("add department", api.create_department(&record).await);
            if result.is_ok() {
                tracing::info!(name = %record.department_name, "department created");
            }
            RuntimeEvent::DepartmentCreated(result)
        }

        RuntimeCommand::LoadTopDepartments { limit } => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::TopDepartments,
            result: logged("load top departments", api.top_departments(limit).await),
        },

        RuntimeCommand::LoadSalaryInsights => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::SalaryInsights,
            result: logged("load salary insights", api.salary_insights().await),
        },

        RuntimeCommand::LoadDepartmentStats { department_id } => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::DepartmentStats,
            result: logged(
                "load department stats",
                api.department_stats(department_id).await,
            ),
        },

        RuntimeCommand::LoadAuditSummary { days } => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::AuditSummary,
            result: logged("load audit summary", api.audit_summary(days).await),
        },

        RuntimeCommand::LoadSalaryStats { department_id } => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::SalaryStats,
            result: logged(
                "load salary statistics",
                api.salary_statistics(department_id).await,
            ),
        },

        RuntimeCommand::LoadSalaryGrowth {
            employee_id,
            months_back,
        } => RuntimeEvent::AnalyticsLoaded {
            panel: AnalyticsPanel::SalaryGrowth,
            result: logged(
                "load salary growth",
                api.salary_growth(employee_id, months_back).await,
            ),
        },
    };
    Some(event)
}

fn logged<T>(what: &str, result: Result<T, ApiError>) -> Result<T, ApiError> {
    if let Err(err) = &result {
        if err.is_rejection() {
            tracing::warn!(error = %err, detail = ?err.detail(), "{what} rejected");
        } else {
            tracing::error!(error = %err, "{what} failed");
        }
    }
    result
}
