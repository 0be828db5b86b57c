//! Actions that key bindings, mouse clicks and commands ask the app to perform

use crate::app::Tab;

/// Everything the view controller can be asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No action needed
    None,

    /// Make one tab visible
    ShowTab(Tab),
    /// Move to the next or previous tab
    CycleTab { forward: bool },
    /// Move focus to the next pane of the current tab
    CycleFocus,

    /// Move the sidebar cursor or scroll the focused list
    CursorUp,
    CursorDown,

    /// Select the department under the sidebar cursor
    SelectDepartment,
    /// Select the department shown at this sidebar position
    SelectDepartmentAt(usize),

    /// Start typing into the form of the current tab
    StartEditing,
    SubmitEmployeeForm,
    SubmitDepartmentForm,

    /// Reload whatever the current tab shows
    Refresh,
    /// Reload the department sidebar only
    ReloadSidebar,

    LoadTopDepartments(Option<u32>),
    LoadSalaryInsights,
    LoadDepartmentStats,
    LoadAuditSummary(Option<u32>),
    LoadSalaryStats,
    /// Growth report for the employee under the Employees list cursor
    LoadSalaryGrowth(Option<u32>),

    /// Write the current tab's data to disk
    Export,

    /// Open command palette
    OpenCommand,
    ToggleHelp,
    /// Close the alert popup
    DismissAlert,

    /// Show notification in status bar
    Notify(String, NotifyLevel),

    /// Request quit
    Quit,
}

/// Notification levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Warn,
    Error,
}
