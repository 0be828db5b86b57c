//! Department chosen for the pending employee submission

use super::model::Department;

pub const NO_SELECTION_LABEL: &str = "No department selected - pick one from the sidebar";

/// Holds at most one department. Owned by the view controller.
#[derive(Debug, Clone, Default)]
pub struct DepartmentSelection {
    current: Option<Department>,
}

impl DepartmentSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior selection
    pub fn select(&mut self, department: Department) {
        self.current = Some(department);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn get(&self) -> Option<&Department> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn department_id(&self) -> Option<i64> {
        self.current.as_ref().map(|dept| dept.department_id)
    }

    pub fn is_selected(&self, department: &Department) -> bool {
        self.department_id() == Some(department.department_id)
    }

    pub fn label(&self) -> String {
        self.current
            .as_ref()
            .map(Department::selection_label)
            .unwrap_or_else(|| NO_SELECTION_LABEL.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dept(id: i64, name: &str) -> Department {
        Department {
            department_id: id,
            department_name: name.to_string(),
            location: "HQ".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_select_replaces_previous() {
        let mut selection = DepartmentSelection::new();
        assert!(selection.is_empty());
        assert_eq!(selection.label(), NO_SELECTION_LABEL);

        selection.select(dept(1, "Sales"));
        selection.select(dept(2, "Ops"));
        assert_eq!(selection.department_id(), Some(2));
        assert!(!selection.is_selected(&dept(1, "Sales")));
        assert!(selection.is_selected(&dept(2, "Ops")));
        assert_eq!(selection.label(), "Ops - HQ");
    }

    #[test]
    fn test_clear() {
        let mut selection = DepartmentSelection::new();
        selection.select(dept(5, "Legal"));
        selection.clear();
        assert!(selection.is_empty());
        assert_eq!(selection.department_id(), None);
    }
}
