//! Domain layer - records, forms and selection state

pub mod form;
pub mod model;
pub mod selection;

pub use form::{DepartmentField, DepartmentForm, EmployeeField, EmployeeForm, Form, FormRow};
pub use model::{Department, Employee, EmployeeStatus, NewDepartment, NewEmployee};
pub use selection::DepartmentSelection;
