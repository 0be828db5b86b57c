//! Key bindings as an explicit registration list
//!
//! Every binding names the scope it applies to. Resolution walks from the
//! focused pane outwards, so a pane binding shadows a tab binding, which
//! shadows a global one. The help popup is generated from the same list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{Focus, Tab};
use crate::core::action::Action;

/// Where a binding is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Tab(Tab),
    Pane(Tab, Focus),
}

impl Scope {
    pub fn label(&self) -> String {
        match self {
            Scope::Global => "Global".to_string(),
            Scope::Tab(tab) => tab.title().to_string(),
            Scope::Pane(tab, focus) => format!("{} / {}", tab.title(), focus.title()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub scope: Scope,
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    pub description: &'static str,
}

impl Binding {
    fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        // Shift is already part of the character for Char keys
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
            _ => key.modifiers,
        };
        self.modifiers == modifiers
    }

    pub fn key_label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift-Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            other => format!("{other:?}"),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("Ctrl-{key}")
        } else {
            key
        }
    }
}

/// One help line: all keys sharing a scope and description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub scope: Scope,
    pub keys: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Binding>,
}

impl Keymap {
    /// Empty keymap
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(
        &mut self,
        scope: Scope,
        code: KeyCode,
        action: Action,
        description: &'static str,
    ) -> &mut Self {
        self.bind_with(scope, code, KeyModifiers::NONE, action, description)
    }

    pub fn bind_with(
        &mut self,
        scope: Scope,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: Action,
        description: &'static str,
    ) -> &mut Self {
        self.bindings.push(Binding {
            scope,
            code,
            modifiers,
            action,
            description,
        });
        self
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Find the action for a key press, most specific scope first
    pub fn resolve(&self, tab: Tab, focus: Focus, key: &KeyEvent) -> Option<Action> {
        [Scope::Pane(tab, focus), Scope::Tab(tab), Scope::Global]
            .into_iter()
            .find_map(|scope| {
                self.bindings
                    .iter()
                    .find(|binding| binding.scope == scope && binding.matches(key))
                    .map(|binding| binding.action.clone())
            })
    }

    /// Help lines in registration order
    pub fn help_entries(&self) -> Vec<HelpEntry> {
        let mut entries: Vec<HelpEntry> = Vec::new();
        for binding in &self.bindings {
            let label = binding.key_label();
            match entries
                .iter_mut()
                .find(|e| e.scope == binding.scope && e.description == binding.description)
            {
                Some(entry) => {
                    entry.keys.push('/');
                    entry.keys.push_str(&label);
                }
                None => entries.push(HelpEntry {
                    scope: binding.scope,
                    keys: label,
                    description: binding.description,
                }),
            }
        }
        entries
    }

    /// The bindings the application ships with
    pub fn standard() -> Self {
        use KeyCode::{Char, Down, Enter, Tab as TabKey, Up};

        let mut map = Self::new();

        map.bind(Scope::Global, Char('q'), Action::Quit, "Quit")
            .bind_with(
                Scope::Global,
                Char('c'),
                KeyModifiers::CONTROL,
                Action::Quit,
                "Quit",
            )
            .bind(Scope::Global, Char('?'), Action::ToggleHelp, "Toggle help")
            .bind(Scope::Global, Char(':'), Action::OpenCommand, "Command bar")
            .bind(Scope::Global, Char('/'), Action::OpenCommand, "Command bar");
        for tab in Tab::ALL {
            map.bind(
                Scope::Global,
                Char(tab.shortcut()),
                Action::ShowTab(tab),
                tab.description(),
            );
        }
        map.bind(
            Scope::Global,
            Char(']'),
            Action::CycleTab { forward: true },
            "Next tab",
        )
        .bind(
            Scope::Global,
            Char('['),
            Action::CycleTab { forward: false },
            "Previous tab",
        )
        .bind(Scope::Global, TabKey, Action::CycleFocus, "Next pane")
        .bind(Scope::Global, Char('r'), Action::Refresh, "Reload tab")
        .bind(Scope::Global, Char('e'), Action::Export, "Export tab");

        let sidebar = Scope::Pane(Tab::Employees, Focus::Sidebar);
        map.bind(sidebar, Up, Action::CursorUp, "Move cursor")
            .bind(sidebar, Char('k'), Action::CursorUp, "Move cursor")
            .bind(sidebar, Down, Action::CursorDown, "Move cursor")
            .bind(sidebar, Char('j'), Action::CursorDown, "Move cursor")
            .bind(sidebar, Enter, Action::SelectDepartment, "Select department")
            .bind(sidebar, Char(' '), Action::SelectDepartment, "Select department")
            .bind(sidebar, Char('r'), Action::ReloadSidebar, "Reload departments");

        let employee_form = Scope::Pane(Tab::Employees, Focus::Form);
        map.bind(employee_form, Enter, Action::StartEditing, "Edit form")
            .bind(employee_form, Char('i'), Action::StartEditing, "Edit form")
            .bind(employee_form, Char('s'), Action::SubmitEmployeeForm, "Add employee");

        let department_form = Scope::Pane(Tab::Departments, Focus::Form);
        map.bind(department_form, Enter, Action::StartEditing, "Edit form")
            .bind(department_form, Char('i'), Action::StartEditing, "Edit form")
            .bind(
                department_form,
                Char('s'),
                Action::SubmitDepartmentForm,
                "Add department",
            );

        for tab in [Tab::Employees, Tab::Departments] {
            let list = Scope::Pane(tab, Focus::List);
            map.bind(list, Up, Action::CursorUp, "Scroll")
                .bind(list, Char('k'), Action::CursorUp, "Scroll")
                .bind(list, Down, Action::CursorDown, "Scroll")
                .bind(list, Char('j'), Action::CursorDown, "Scroll");
        }

        let analytics = Scope::Tab(Tab::Analytics);
        map.bind(
            analytics,
            Char('t'),
            Action::LoadTopDepartments(None),
            "Top departments",
        )
        .bind(analytics, Char('s'), Action::LoadSalaryInsights, "Salary insights")
        .bind(analytics, Char('d'), Action::LoadDepartmentStats, "Selected department stats")
        .bind(analytics, Char('a'), Action::LoadAuditSummary(None), "Audit summary")
        .bind(
            analytics,
            Char('p'),
            Action::LoadSalaryStats,
            "Salary statistics (selected department or all)",
        )
        .bind(
            analytics,
            Char('g'),
            Action::LoadSalaryGrowth(None),
            "Salary growth of the highlighted employee",
        )
        .bind(analytics, Up, Action::CursorUp, "Scroll")
        .bind(analytics, Char('k'), Action::CursorUp, "Scroll")
        .bind(analytics, Down, Action::CursorDown, "Scroll")
        .bind(analytics, Char('j'), Action::CursorDown, "Scroll");

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_binding_applies_everywhere() {
        let map = Keymap::standard();
        for tab in Tab::ALL {
            for focus in tab.panes() {
                assert_eq!(
                    map.resolve(tab, *focus, &key(KeyCode::Char('q'))),
                    Some(Action::Quit)
                );
            }
        }
    }

    #[test]
    fn test_pane_binding_shadows_global() {
        let map = Keymap::standard();
        let r = key(KeyCode::Char('r'));
        assert_eq!(
            map.resolve(Tab::Employees, Focus::Sidebar, &r),
            Some(Action::ReloadSidebar)
        );
        assert_eq!(
            map.resolve(Tab::Employees, Focus::List, &r),
            Some(Action::Refresh)
        );
    }

    #[test]
    fn test_tab_binding_only_in_its_tab() {
        let map = Keymap::standard();
        let t = key(KeyCode::Char('t'));
        assert_eq!(
            map.resolve(Tab::Analytics, Focus::List, &t),
            Some(Action::LoadTopDepartments(None))
        );
        assert_eq!(map.resolve(Tab::Departments, Focus::List, &t), None);
    }

    #[test]
    fn test_modifiers_must_match() {
        let map = Keymap::standard();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            map.resolve(Tab::Departments, Focus::Form, &ctrl_c),
            Some(Action::Quit)
        );
        assert_eq!(
            map.resolve(Tab::Departments, Focus::Form, &key(KeyCode::Char('c'))),
            None
        );
        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(
            map.resolve(Tab::Analytics, Focus::List, &shifted),
            Some(Action::ToggleHelp)
        );
    }

    #[test]
    fn test_help_groups_keys() {
        let mut map = Keymap::new();
        map.bind(Scope::Global, KeyCode::Up, Action::CursorUp, "Move")
            .bind(Scope::Global, KeyCode::Char('k'), Action::CursorUp, "Move")
            .bind_with(
                Scope::Global,
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
                Action::Quit,
                "Quit",
            );

        let entries = map.help_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].keys, "Up/k");
        assert_eq!(entries[1].keys, "Ctrl-c");
        assert_eq!(entries[1].scope.label(), "Global");
    }
}
