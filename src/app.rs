use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::config::Config;
use crate::core::{parse_command, Action, Command, Keymap, NotifyLevel};
use crate::domain::{
    Department, DepartmentForm, DepartmentSelection, Employee, EmployeeField, EmployeeForm, Form,
};
use crate::infrastructure::{
    AnalyticsPanel, ApiError, DepartmentTarget, RuntimeCommand, RuntimeEvent,
};

pub const EMPLOYEES_LOADING: &str = "Loading employees...";
pub const EMPLOYEES_EMPTY: &str = "No employees found. Add one with the form.";
pub const EMPLOYEES_ERROR: &str = "Error loading employees. Make sure the backend is running.";
pub const DEPARTMENTS_LOADING: &str = "Loading departments...";
pub const DEPARTMENTS_EMPTY: &str = "No departments found. Add one with the form.";
pub const DEPARTMENTS_ERROR: &str =
    "Error loading departments. Make sure the backend is running.";
pub const SIDEBAR_EMPTY: &str = "No departments available.\nCreate one in the Departments tab!";
pub const SIDEBAR_ERROR: &str = "Error loading departments.\nMake sure the backend is running.";
pub const ANALYTICS_LOADING: &str = "Loading...";
pub const ANALYTICS_ERROR: &str = "Error loading data";

pub const EMPLOYEE_ADDED: &str = "Employee added successfully!";
pub const DEPARTMENT_ADDED: &str = "Department added successfully!";
pub const EMPLOYEE_REJECTED_FALLBACK: &str = "Failed to add employee";
pub const DEPARTMENT_REJECTED_FALLBACK: &str = "Failed to add department";
pub const EMPLOYEE_TRANSPORT_ERROR: &str = "Error adding employee. Check the log for details.";
pub const DEPARTMENT_TRANSPORT_ERROR: &str =
    "Error adding department. Check the log for details.";
pub const SELECT_DEPARTMENT_FIRST: &str = "Please select a department from the sidebar first!\n\n\
If no departments are available:\n\
1. Go to the Departments tab (2)\n\
2. Add a new department\n\
3. Come back to the Employees tab (1) and press r on the sidebar\n\
4. Select the department with Enter";

const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main tabs in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Departments,
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Employees, Tab::Departments, Tab::Analytics];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Employees => "Employees",
            Tab::Departments => "Departments",
            Tab::Analytics => "Analytics",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Employees => '1',
            Tab::Departments => '2',
            Tab::Analytics => '3',
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tab::Employees => "Employees tab",
            Tab::Departments => "Departments tab",
            Tab::Analytics => "Analytics tab",
        }
    }

    /// Focusable panes, in Tab order
    pub fn panes(&self) -> &'static [Focus] {
        match self {
            Tab::Employees => &[Focus::Sidebar, Focus::Form, Focus::List],
            Tab::Departments => &[Focus::Form, Focus::List],
            Tab::Analytics => &[Focus::List],
        }
    }

    fn index(&self) -> usize {
        Tab::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Form,
    List,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Sidebar => "Sidebar",
            Focus::Form => "Form",
            Focus::List => "List",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    /// Typing into the form of the current tab
    Editing,
}

/// Fetch state of one rendered region
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Panel<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed,
}

impl<T> Panel<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// What a region should draw
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView<T> {
    /// Placeholder text: loading, nothing fetched yet or an empty collection
    Message(&'static str),
    /// The fetch failed
    Error(&'static str),
    Content(T),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarCard {
    pub title: String,
    pub subtitle: String,
    pub selected: bool,
    pub under_cursor: bool,
}

/// Modal popup, dismissed with Enter or Esc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: String,
    pub level: NotifyLevel,
}

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    pub input: String,
    pub last: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: NotifyLevel,
    pub since: Instant,
}

#[derive(Debug)]
pub struct App {
    pub current_tab: Tab,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub keymap: Keymap,
    pub employees: Panel<Vec<Employee>>,
    pub departments: Panel<Vec<Department>>,
    pub sidebar: Panel<Vec<Department>>,
    pub sidebar_cursor: usize,
    pub selection: DepartmentSelection,
    pub employee_form: EmployeeForm,
    pub department_form: DepartmentForm,
    pub analytics: BTreeMap<AnalyticsPanel, Panel<Value>>,
    pub headcount: Option<u64>,
    pub employees_scroll: usize,
    pub departments_scroll: usize,
    pub analytics_scroll: usize,
    pub api_base_url: String,
    pub top_limit: u32,
    pub audit_days: u32,
    pub growth_months: u32,
    /// Department name (or "all departments") of the last salary statistics request
    pub salary_stats_label: Option<String>,
    /// Employee name of the last salary growth request
    pub salary_growth_label: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub command: CommandBar,
    pub alert: Option<Alert>,
    pub status: Option<StatusMessage>,
    pub help_open: bool,
    pub should_quit: bool,
    outbox: Vec<RuntimeCommand>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            current_tab: Tab::Employees,
            focus: Focus::Sidebar,
            input_mode: InputMode::Normal,
            keymap: Keymap::standard(),
            employees: Panel::Idle,
            departments: Panel::Idle,
            sidebar: Panel::Idle,
            sidebar_cursor: 0,
            selection: DepartmentSelection::new(),
            employee_form: EmployeeForm::new(),
            department_form: DepartmentForm::new(),
            analytics: BTreeMap::new(),
            headcount: None,
            employees_scroll: 0,
            departments_scroll: 0,
            analytics_scroll: 0,
            api_base_url: crate::config::DEFAULT_API_BASE_URL.to_string(),
            top_limit: crate::config::DEFAULT_TOP_LIMIT,
            audit_days: crate::config::DEFAULT_AUDIT_DAYS,
            growth_months: crate::config::DEFAULT_GROWTH_MONTHS,
            salary_stats_label: None,
            salary_growth_label: None,
            export_dir: None,
            command: CommandBar::default(),
            alert: None,
            status: None,
            help_open: false,
            should_quit: false,
            outbox: Vec::new(),
        }
    }

    pub fn with_config(config: &Config) -> Self {
        let mut app = Self::new();
        app.api_base_url = config.api_base_url();
        app.top_limit = config.top_departments_limit;
        app.audit_days = config.audit_days;
        app.growth_months = config.growth_months;
        app.export_dir = config.export_dir.clone();
        app
    }

    /// Drain the requests queued since the last call
    pub fn take_commands(&mut self) -> Vec<RuntimeCommand> {
        std::mem::take(&mut self.outbox)
    }

    fn queue(&mut self, cmd: RuntimeCommand) {
        tracing::debug!(?cmd, "queued");
        self.outbox.push(cmd);
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: NotifyLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, NotifyLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    fn open_alert(&mut self, title: &'static str, message: impl Into<String>, level: NotifyLevel) {
        self.alert = Some(Alert {
            title,
            message: message.into(),
            level,
        });
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
    }

    /// Everything the first frame needs
    pub fn load_initial(&mut self) {
        self.load_employees();
        self.load_departments();
        self.load_departments_sidebar();
    }

    pub fn load_employees(&mut self) {
        if !matches!(self.employees, Panel::Ready(_)) {
            self.employees = Panel::Loading;
        }
        self.queue(RuntimeCommand::LoadEmployees);
        self.queue(RuntimeCommand::LoadHeadcount);
    }

    pub fn load_departments(&mut self) {
        if !matches!(self.departments, Panel::Ready(_)) {
            self.departments = Panel::Loading;
        }
        self.queue(RuntimeCommand::LoadDepartments {
            target: DepartmentTarget::List,
        });
    }

    pub fn load_departments_sidebar(&mut self) {
        self.sidebar = Panel::Loading;
        self.queue(RuntimeCommand::LoadDepartments {
            target: DepartmentTarget::Sidebar,
        });
    }

    pub fn load_top_departments(&mut self, limit: Option<u32>) {
        if let Some(limit) = limit {
            self.top_limit = limit;
        }
        self.analytics
            .insert(AnalyticsPanel::TopDepartments, Panel::Loading);
        self.queue(RuntimeCommand::LoadTopDepartments {
            limit: self.top_limit,
        });
    }

    pub fn load_salary_insights(&mut self) {
        self.analytics
            .insert(AnalyticsPanel::SalaryInsights, Panel::Loading);
        self.queue(RuntimeCommand::LoadSalaryInsights);
    }

    /// Statistics for the selected department; needs a selection
    pub fn load_department_stats(&mut self) {
        let Some(department_id) = self.selection.department_id() else {
            self.set_status(
                "Select a department on the Employees tab first",
                NotifyLevel::Warn,
            );
            return;
        };
        self.analytics
            .insert(AnalyticsPanel::DepartmentStats, Panel::Loading);
        self.queue(RuntimeCommand::LoadDepartmentStats { department_id });
    }

    pub fn load_audit_summary(&mut self, days: Option<u32>) {
        if let Some(days) = days {
            self.audit_days = days;
        }
        self.analytics
            .insert(AnalyticsPanel::AuditSummary, Panel::Loading);
        self.queue(RuntimeCommand::LoadAuditSummary {
            days: self.audit_days,
        });
    }

    /// Salary figures for the selected department, or for every department
    pub fn load_salary_stats(&mut self) {
        let department = self.selection.get();
        let department_id = department.map(|dept| dept.department_id);
        self.salary_stats_label = Some(
            department
                .map(|dept| dept.department_name.clone())
                .unwrap_or_else(|| "all departments".to_string()),
        );
        self.analytics
            .insert(AnalyticsPanel::SalaryStats, Panel::Loading);
        self.queue(RuntimeCommand::LoadSalaryStats { department_id });
    }

    /// Growth report for the employee under the Employees list cursor
    pub fn load_salary_growth(&mut self, months: Option<u32>) {
        if let Some(months) = months {
            self.growth_months = months;
        }
        let target = self
            .employees
            .ready()
            .and_then(|list| list.get(self.employees_scroll))
            .and_then(|emp| emp.employee_id.map(|id| (id, emp.full_name())));
        let Some((employee_id, name)) = target else {
            self.set_status(
                "Highlight an employee in the Employees list first",
                NotifyLevel::Warn,
            );
            return;
        };
        self.salary_growth_label = Some(name);
        self.analytics
            .insert(AnalyticsPanel::SalaryGrowth, Panel::Loading);
        self.queue(RuntimeCommand::LoadSalaryGrowth {
            employee_id,
            months_back: self.growth_months,
        });
    }

    /// Reload what the current tab shows
    pub fn refresh(&mut self) {
        match self.current_tab {
            Tab::Employees => {
                self.load_employees();
                self.load_departments_sidebar();
            }
            Tab::Departments => self.load_departments(),
            Tab::Analytics => {
                let loaded: Vec<AnalyticsPanel> = self
                    .analytics
                    .iter()
                    .filter(|(_, panel)| !matches!(panel, Panel::Idle))
                    .map(|(panel, _)| *panel)
                    .collect();
                if loaded.is_empty() {
                    self.load_top_departments(None);
                    self.load_salary_insights();
                    return;
                }
                for panel in loaded {
                    match panel {
                        AnalyticsPanel::TopDepartments => self.load_top_departments(None),
                        AnalyticsPanel::SalaryInsights => self.load_salary_insights(),
                        AnalyticsPanel::DepartmentStats => self.load_department_stats(),
                        AnalyticsPanel::AuditSummary => self.load_audit_summary(None),
                        AnalyticsPanel::SalaryStats => self.load_salary_stats(),
                        AnalyticsPanel::SalaryGrowth => self.load_salary_growth(None),
                    }
                }
            }
        }
    }

    pub fn select_department(&mut self, department: Department) {
        if let Some(index) = self.sidebar.ready().and_then(|list| {
            list.iter()
                .position(|d| d.department_id == department.department_id)
        }) {
            self.sidebar_cursor = index;
        }
        self.employee_form.department_id = Some(department.department_id);
        self.set_status(
            format!("Selected {}", department.selection_label()),
            NotifyLevel::Info,
        );
        self.selection.select(department);
    }

    pub fn select_department_at(&mut self, index: usize) {
        let department = self
            .sidebar
            .ready()
            .and_then(|list| list.get(index))
            .cloned();
        if let Some(department) = department {
            self.select_department(department);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.employee_form.department_id = None;
    }

    pub fn selected_department_label(&self) -> String {
        self.selection.label()
    }

    pub fn submit_employee_form(&mut self) {
        let Some(department) = self.selection.get() else {
            self.open_alert(
                "Select a department",
                SELECT_DEPARTMENT_FIRST,
                NotifyLevel::Warn,
            );
            return;
        };
        let record = self.employee_form.to_record(department);
        self.input_mode = InputMode::Normal;
        self.queue(RuntimeCommand::CreateEmployee { record });
        self.set_status("Adding employee...", NotifyLevel::Info);
    }

    pub fn submit_department_form(&mut self) {
        let record = self.department_form.to_record();
        self.input_mode = InputMode::Normal;
        self.queue(RuntimeCommand::CreateDepartment { record });
        self.set_status("Adding department...", NotifyLevel::Info);
    }

    fn active_form_mut(&mut self) -> Option<&mut dyn Form> {
        match self.current_tab {
            Tab::Employees => Some(&mut self.employee_form),
            Tab::Departments => Some(&mut self.department_form),
            Tab::Analytics => None,
        }
    }

    pub fn start_editing(&mut self) {
        if self.active_form_mut().is_none() {
            return;
        }
        self.focus = Focus::Form;
        self.input_mode = InputMode::Editing;
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn edit_input(&mut self, ch: char) {
        if let Some(form) = self.active_form_mut() {
            form.input_char(ch);
        }
    }

    pub fn edit_backspace(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.backspace();
        }
    }

    pub fn edit_next_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.next_field();
        }
    }

    pub fn edit_prev_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.prev_field();
        }
    }

    /// Left/Right on a choice field; text fields ignore it
    pub fn edit_cycle_choice(&mut self) {
        if self.current_tab == Tab::Employees
            && self.employee_form.active_field() == EmployeeField::Status
        {
            self.employee_form.status = self.employee_form.status.toggled();
        }
    }

    pub fn submit_active_form(&mut self) {
        match self.current_tab {
            Tab::Employees => self.submit_employee_form(),
            Tab::Departments => self.submit_department_form(),
            Tab::Analytics => {}
        }
    }

    pub fn show_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
        }
        if !tab.panes().contains(&self.focus) {
            self.focus = tab.panes()[0];
        }
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let count = Tab::ALL.len();
        let index = self.current_tab.index();
        let next = if forward {
            (index + 1) % count
        } else {
            (index + count - 1) % count
        };
        self.show_tab(Tab::ALL[next]);
    }

    pub fn cycle_focus(&mut self) {
        let panes = self.current_tab.panes();
        let index = panes.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = panes[(index + 1) % panes.len()];
    }

    fn move_cursor(&mut self, down: bool) {
        match (self.current_tab, self.focus) {
            (Tab::Employees, Focus::Sidebar) => {
                let len = self.sidebar.ready().map(Vec::len).unwrap_or(0);
                self.sidebar_cursor = step(self.sidebar_cursor, down, len);
            }
            (Tab::Employees, Focus::List) => {
                let len = self.employees.ready().map(Vec::len).unwrap_or(0);
                self.employees_scroll = step(self.employees_scroll, down, len);
            }
            (Tab::Departments, Focus::List) => {
                let len = self.departments.ready().map(Vec::len).unwrap_or(0);
                self.departments_scroll = step(self.departments_scroll, down, len);
            }
            (Tab::Analytics, _) => {
                let lines = self.analytics_line_count();
                self.analytics_scroll = step(self.analytics_scroll, down, lines);
            }
            _ => {}
        }
    }

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command.input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command.input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command.input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let cmd = parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
        self.command.last = Some(input);
    }

    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Employees => Action::ShowTab(Tab::Employees),
            Command::Departments => Action::ShowTab(Tab::Departments),
            Command::Analytics => Action::ShowTab(Tab::Analytics),
            Command::Refresh => Action::Refresh,
            Command::Top(limit) => {
                self.show_tab(Tab::Analytics);
                Action::LoadTopDepartments(*limit)
            }
            Command::Insights => {
                self.show_tab(Tab::Analytics);
                Action::LoadSalaryInsights
            }
            Command::DeptStats => {
                self.show_tab(Tab::Analytics);
                Action::LoadDepartmentStats
            }
            Command::Audit(days) => {
                self.show_tab(Tab::Analytics);
                Action::LoadAuditSummary(*days)
            }
            Command::SalaryStats => {
                self.show_tab(Tab::Analytics);
                Action::LoadSalaryStats
            }
            Command::Growth(months) => {
                self.show_tab(Tab::Analytics);
                Action::LoadSalaryGrowth(*months)
            }
            Command::Export => Action::Export,
            Command::Help => Action::ToggleHelp,
            Command::Quit => Action::Quit,
            Command::Unknown(input) => Action::Notify(
                format!("Unknown command: {input}"),
                NotifyLevel::Warn,
            ),
        }
    }

    /// Single dispatch point for key bindings, clicks and commands
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::ShowTab(tab) => self.show_tab(tab),
            Action::CycleTab { forward } => self.cycle_tab(forward),
            Action::CycleFocus => self.cycle_focus(),
            Action::CursorUp => self.move_cursor(false),
            Action::CursorDown => self.move_cursor(true),
            Action::SelectDepartment => self.select_department_at(self.sidebar_cursor),
            Action::SelectDepartmentAt(index) => {
                self.focus = Focus::Sidebar;
                self.select_department_at(index);
            }
            Action::StartEditing => self.start_editing(),
            Action::SubmitEmployeeForm => self.submit_employee_form(),
            Action::SubmitDepartmentForm => self.submit_department_form(),
            Action::Refresh => self.refresh(),
            Action::ReloadSidebar => self.load_departments_sidebar(),
            Action::LoadTopDepartments(limit) => self.load_top_departments(limit),
            Action::LoadSalaryInsights => self.load_salary_insights(),
            Action::LoadDepartmentStats => self.load_department_stats(),
            Action::LoadAuditSummary(days) => self.load_audit_summary(days),
            Action::LoadSalaryStats => self.load_salary_stats(),
            Action::LoadSalaryGrowth(months) => self.load_salary_growth(months),
            Action::Export => {
                let outcome = crate::export::export_current_tab(self);
                self.apply_action(outcome);
            }
            Action::OpenCommand => self.enter_command(),
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::DismissAlert => self.alert = None,
            Action::Notify(msg, level) => self.set_status(msg, level),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Apply a completed request
    pub fn apply_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::EmployeesLoaded(result) => {
                self.employees = match result {
                    Ok(list) => {
                        self.employees_scroll =
                            self.employees_scroll.min(list.len().saturating_sub(1));
                        Panel::Ready(list)
                    }
                    Err(_) => Panel::Failed,
                };
            }
            RuntimeEvent::DepartmentsLoaded { target, result } => {
                let panel = match result {
                    Ok(list) => Panel::Ready(list),
                    Err(_) => Panel::Failed,
                };
                match target {
                    DepartmentTarget::List => {
                        if let Panel::Ready(list) = &panel {
                            self.departments_scroll =
                                self.departments_scroll.min(list.len().saturating_sub(1));
                        }
                        self.departments = panel;
                    }
                    DepartmentTarget::Sidebar => {
                        if let Panel::Ready(list) = &panel {
                            self.sidebar_cursor =
                                self.sidebar_cursor.min(list.len().saturating_sub(1));
                        }
                        self.sidebar = panel;
                    }
                }
            }
            RuntimeEvent::HeadcountLoaded(result) => {
                self.headcount = result.ok();
            }
            RuntimeEvent::EmployeeCreated(Ok(())) => {
                self.open_alert("Success", EMPLOYEE_ADDED, NotifyLevel::Info);
                self.employee_form.reset();
                self.clear_selection();
                self.load_employees();
            }
            RuntimeEvent::EmployeeCreated(Err(err)) => {
                let message = failure_message(
                    &err,
                    EMPLOYEE_REJECTED_FALLBACK,
                    EMPLOYEE_TRANSPORT_ERROR,
                );
                self.open_alert("Error", message, NotifyLevel::Error);
            }
            RuntimeEvent::DepartmentCreated(Ok(())) => {
                self.open_alert("Success", DEPARTMENT_ADDED, NotifyLevel::Info);
                self.department_form.reset();
                self.load_departments();
                self.load_departments_sidebar();
            }
            RuntimeEvent::DepartmentCreated(Err(err)) => {
                let message = failure_message(
                    &err,
                    DEPARTMENT_REJECTED_FALLBACK,
                    DEPARTMENT_TRANSPORT_ERROR,
                );
                self.open_alert("Error", message, NotifyLevel::Error);
            }
            RuntimeEvent::AnalyticsLoaded { panel, result } => {
                let state = match result {
                    Ok(value) => Panel::Ready(value),
                    Err(_) => Panel::Failed,
                };
                self.analytics.insert(panel, state);
                let lines = self.analytics_line_count();
                self.analytics_scroll = self.analytics_scroll.min(lines.saturating_sub(1));
            }
        }
    }

    pub fn employees_view(&self) -> PanelView<Vec<String>> {
        match &self.employees {
            Panel::Idle | Panel::Loading => PanelView::Message(EMPLOYEES_LOADING),
            Panel::Failed => PanelView::Error(EMPLOYEES_ERROR),
            Panel::Ready(list) if list.is_empty() => PanelView::Message(EMPLOYEES_EMPTY),
            Panel::Ready(list) => PanelView::Content(list.iter().map(Employee::list_line).collect()),
        }
    }

    pub fn departments_view(&self) -> PanelView<Vec<String>> {
        match &self.departments {
            Panel::Idle | Panel::Loading => PanelView::Message(DEPARTMENTS_LOADING),
            Panel::Failed => PanelView::Error(DEPARTMENTS_ERROR),
            Panel::Ready(list) if list.is_empty() => PanelView::Message(DEPARTMENTS_EMPTY),
            Panel::Ready(list) => {
                PanelView::Content(list.iter().map(Department::list_line).collect())
            }
        }
    }

    pub fn sidebar_view(&self) -> PanelView<Vec<SidebarCard>> {
        match &self.sidebar {
            Panel::Idle | Panel::Loading => PanelView::Message(DEPARTMENTS_LOADING),
            Panel::Failed => PanelView::Error(SIDEBAR_ERROR),
            Panel::Ready(list) if list.is_empty() => PanelView::Message(SIDEBAR_EMPTY),
            Panel::Ready(list) => PanelView::Content(
                list.iter()
                    .enumerate()
                    .map(|(index, dept)| SidebarCard {
                        title: dept.department_name.clone(),
                        subtitle: dept.location.clone(),
                        selected: self.selection.is_selected(dept),
                        under_cursor: index == self.sidebar_cursor,
                    })
                    .collect(),
            ),
        }
    }

    pub fn analytics_view(&self, panel: AnalyticsPanel) -> PanelView<String> {
        match self.analytics.get(&panel) {
            None | Some(Panel::Idle) => PanelView::Message(analytics_hint(panel)),
            Some(Panel::Loading) => PanelView::Message(ANALYTICS_LOADING),
            Some(Panel::Failed) => PanelView::Error(ANALYTICS_ERROR),
            Some(Panel::Ready(value)) => PanelView::Content(
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
            ),
        }
    }

    /// Lines in the tallest analytics panel; the panels share one scroll offset
    fn analytics_line_count(&self) -> usize {
        AnalyticsPanel::ALL
            .into_iter()
            .map(|panel| match self.analytics_view(panel) {
                PanelView::Message(text) | PanelView::Error(text) => text.lines().count(),
                PanelView::Content(json) => json.lines().count(),
            })
            .max()
            .unwrap_or(0)
    }

    /// Loaded analytics panels, for export
    pub fn loaded_analytics(&self) -> BTreeMap<&'static str, &Value> {
        self.analytics
            .iter()
            .filter_map(|(panel, state)| state.ready().map(|value| (panel.key(), value)))
            .collect()
    }
}

fn analytics_hint(panel: AnalyticsPanel) -> &'static str {
    match panel {
        AnalyticsPanel::TopDepartments => "Press t to load top departments",
        AnalyticsPanel::SalaryInsights => "Press s to load salary insights",
        AnalyticsPanel::DepartmentStats => "Press d to load stats for the selected department",
        AnalyticsPanel::AuditSummary => "Press a to load the audit summary",
        AnalyticsPanel::SalaryStats => "Press p for salary statistics (selected department or all)",
        AnalyticsPanel::SalaryGrowth => {
            "Press g for the employee highlighted in the Employees list"
        }
    }
}

fn failure_message(err: &ApiError, fallback: &str, transport: &str) -> String {
    match err {
        ApiError::Status { detail, .. } => {
            format!("Error: {}", detail.as_deref().unwrap_or(fallback))
        }
        ApiError::Transport { .. } | ApiError::Decode { .. } => transport.to_string(),
    }
}

fn step(current: usize, down: bool, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    if down {
        (current + 1).min(len - 1)
    } else {
        current.saturating_sub(1)
    }
}
