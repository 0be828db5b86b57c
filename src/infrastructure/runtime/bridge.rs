//! Runtime bridge - connects the sync TUI thread with the async Tokio runtime
//!
//! The TUI thread queues `RuntimeCommand`s; a background thread owns the
//! Tokio runtime, runs each command as its own task and reports completion
//! as a `RuntimeEvent`. Events are drained without blocking on every frame.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

use crate::domain::{Department, Employee, NewDepartment, NewEmployee};
use crate::infrastructure::api::{ApiError, EmployeeApi};
use crate::infrastructure::runtime::worker::run_async_worker;

/// Which department view a department fetch feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentTarget {
    /// Plain list on the Departments tab
    List,
    /// Selectable cards next to the employee form
    Sidebar,
}

/// Read-only analytics panels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnalyticsPanel {
    TopDepartments,
    SalaryInsights,
    DepartmentStats,
    AuditSummary,
    SalaryStats,
    SalaryGrowth,
}

impl AnalyticsPanel {
    pub const ALL: [AnalyticsPanel; 6] = [
        AnalyticsPanel::TopDepartments,
        AnalyticsPanel::SalaryInsights,
        AnalyticsPanel::DepartmentStats,
        AnalyticsPanel::AuditSummary,
        AnalyticsPanel::SalaryStats,
        AnalyticsPanel::SalaryGrowth,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            AnalyticsPanel::TopDepartments => "Top Departments",
            AnalyticsPanel::SalaryInsights => "Salary Insights",
            AnalyticsPanel::DepartmentStats => "Department Stats",
            AnalyticsPanel::AuditSummary => "Audit Summary",
            AnalyticsPanel::SalaryStats => "Salary Statistics",
            AnalyticsPanel::SalaryGrowth => "Salary Growth",
        }
    }

    /// Key used when the panel is exported
    pub fn key(&self) -> &'static str {
        match self {
            AnalyticsPanel::TopDepartments => "top_departments",
            AnalyticsPanel::SalaryInsights => "salary_insights",
            AnalyticsPanel::DepartmentStats => "department_stats",
            AnalyticsPanel::AuditSummary => "audit_summary",
            AnalyticsPanel::SalaryStats => "salary_statistics",
            AnalyticsPanel::SalaryGrowth => "salary_growth",
        }
    }
}

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    /// Fetch the employee collection
    LoadEmployees,
    /// Fetch the department collection for one view
    LoadDepartments { target: DepartmentTarget },
    /// Fetch the headcount
    LoadHeadcount,
    /// Create an employee
    CreateEmployee { record: NewEmployee },
    /// Create a department
    CreateDepartment { record: NewDepartment },
    /// Top departments by average salary
    LoadTopDepartments { limit: u32 },
    /// Overall salary insights
    LoadSalaryInsights,
    /// Statistics for one department
    LoadDepartmentStats { department_id: i64 },
    /// Audit log summary for the last N days
    LoadAuditSummary { days: u32 },
    /// Active-employee salary figures, for one department or all of them
    LoadSalaryStats { department_id: Option<i64> },
    /// Salary growth of one employee over the last N months
    LoadSalaryGrowth { employee_id: i64, months_back: u32 },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeEvent {
    EmployeesLoaded(Result<Vec<Employee>, ApiError>),
    DepartmentsLoaded {
        target: DepartmentTarget,
        result: Result<Vec<Department>, ApiError>,
    },
    HeadcountLoaded(Result<u64, ApiError>),
    EmployeeCreated(Result<(), ApiError>),
    DepartmentCreated(Result<(), ApiError>),
    AnalyticsLoaded {
        panel: AnalyticsPanel,
        result: Result<Value, ApiError>,
    },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Create a new runtime bridge around the given API client
    pub fn new(api: Arc<dyn EmployeeApi>) -> anyhow::Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("roster-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(api, cmd_rx, evt_tx).await {
                        tracing::error!("Worker exited: {err:#}");
                    }
                });
            })?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> anyhow::Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RuntimeEvent> {
        self.evt_rx.recv_timeout(timeout).ok()
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}
