//! Editable employee and department forms

use chrono::Local;

use super::model::{Department, EmployeeStatus, NewDepartment, NewEmployee};

/// One rendered form row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    pub label: &'static str,
    pub value: String,
    pub active: bool,
}

/// Shared editing behaviour of the two forms
pub trait Form {
    fn field_count(&self) -> usize;
    fn active(&self) -> usize;
    fn set_active(&mut self, index: usize);
    fn field_label(&self, index: usize) -> &'static str;
    fn field_value(&self, index: usize) -> String;
    /// Type a character into the active field
    fn input_char(&mut self, ch: char);
    fn backspace(&mut self);
    /// Clear every field back to its initial value
    fn reset(&mut self);

    fn next_field(&mut self) {
        let count = self.field_count();
        self.set_active((self.active() + 1) % count);
    }

    fn prev_field(&mut self) {
        let count = self.field_count();
        self.set_active((self.active() + count - 1) % count);
    }

    fn rows(&self) -> Vec<FormRow> {
        (0..self.field_count())
            .map(|index| FormRow {
                label: self.field_label(index),
                value: self.field_value(index),
                active: index == self.active(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    FirstName,
    LastName,
    Email,
    Salary,
    DateJoined,
    Status,
}

impl EmployeeField {
    pub const ALL: [EmployeeField; 6] = [
        EmployeeField::FirstName,
        EmployeeField::LastName,
        EmployeeField::Email,
        EmployeeField::Salary,
        EmployeeField::DateJoined,
        EmployeeField::Status,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EmployeeField::FirstName => "First name",
            EmployeeField::LastName => "Last name",
            EmployeeField::Email => "Email",
            EmployeeField::Salary => "Salary",
            EmployeeField::DateJoined => "Date joined",
            EmployeeField::Status => "Status",
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub salary: String,
    pub date_joined: String,
    pub status: EmployeeStatus,
    /// Hidden field, filled by department selection
    pub department_id: Option<i64>,
    active: usize,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EmployeeForm {
    pub fn new() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            salary: String::new(),
            date_joined: today(),
            status: EmployeeStatus::default(),
            department_id: None,
            active: 0,
        }
    }

    pub fn active_field(&self) -> EmployeeField {
        EmployeeField::ALL[self.active]
    }

    /// Build the POST body for the given department
    pub fn to_record(&self, department: &Department) -> NewEmployee {
        NewEmployee {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            salary: parse_salary(&self.salary),
            department_id: department.department_id,
            date_joined: self.date_joined.clone(),
            status: self.status,
        }
    }

    fn text_mut(&mut self, field: EmployeeField) -> Option<&mut String> {
        match field {
            EmployeeField::FirstName => Some(&mut self.first_name),
            EmployeeField::LastName => Some(&mut self.last_name),
            EmployeeField::Email => Some(&mut self.email),
            EmployeeField::Salary => Some(&mut self.salary),
            EmployeeField::DateJoined => Some(&mut self.date_joined),
            EmployeeField::Status => None,
        }
    }
}

impl Form for EmployeeForm {
    fn field_count(&self) -> usize {
        EmployeeField::ALL.len()
    }

    fn active(&self) -> usize {
        self.active
    }

    fn set_active(&mut self, index: usize) {
        self.active = index.min(EmployeeField::ALL.len() - 1);
    }

    fn field_label(&self, index: usize) -> &'static str {
        EmployeeField::ALL
            .get(index)
            .map(EmployeeField::label)
            .unwrap_or("")
    }

    fn field_value(&self, index: usize) -> String {
        match EmployeeField::ALL.get(index) {
            Some(EmployeeField::FirstName) => self.first_name.clone(),
            Some(EmployeeField::LastName) => self.last_name.clone(),
            Some(EmployeeField::Email) => self.email.clone(),
            Some(EmployeeField::Salary) => self.salary.clone(),
            Some(EmployeeField::DateJoined) => self.date_joined.clone(),
            Some(EmployeeField::Status) => self.status.to_string(),
            None => String::new(),
        }
    }

    fn input_char(&mut self, ch: char) {
        let field = self.active_field();
        if field == EmployeeField::Status {
            // select box: space toggles, initials pick directly
            self.status = match ch {
                'a' | 'A' => EmployeeStatus::Active,
                'r' | 'R' => EmployeeStatus::Resigned,
                ' ' => self.status.toggled(),
                _ => self.status,
            };
            return;
        }
        if let Some(text) = self.text_mut(field) {
            text.push(ch);
        }
    }

    fn backspace(&mut self) {
        let field = self.active_field();
        if let Some(text) = self.text_mut(field) {
            text.pop();
        }
    }

    fn reset(&mut self) {
        let department_id = self.department_id;
        *self = Self::new();
        // the hidden field survives a reset; selection clears it explicitly
        self.department_id = department_id;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepartmentField {
    Name,
    Location,
}

impl DepartmentField {
    pub const ALL: [DepartmentField; 2] = [DepartmentField::Name, DepartmentField::Location];

    pub fn label(&self) -> &'static str {
        match self {
            DepartmentField::Name => "Department name",
            DepartmentField::Location => "Location",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentForm {
    pub department_name: String,
    pub location: String,
    active: usize,
}

impl DepartmentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_record(&self) -> NewDepartment {
        NewDepartment {
            department_name: self.department_name.clone(),
            location: self.location.clone(),
        }
    }

    fn active_text(&mut self) -> &mut String {
        match DepartmentField::ALL[self.active] {
            DepartmentField::Name => &mut self.department_name,
            DepartmentField::Location => &mut self.location,
        }
    }
}

impl Form for DepartmentForm {
    fn field_count(&self) -> usize {
        DepartmentField::ALL.len()
    }

    fn active(&self) -> usize {
        self.active
    }

    fn set_active(&mut self, index: usize) {
        self.active = index.min(DepartmentField::ALL.len() - 1);
    }

    fn field_label(&self, index: usize) -> &'static str {
        DepartmentField::ALL
            .get(index)
            .map(DepartmentField::label)
            .unwrap_or("")
    }

    fn field_value(&self, index: usize) -> String {
        match DepartmentField::ALL.get(index) {
            Some(DepartmentField::Name) => self.department_name.clone(),
            Some(DepartmentField::Location) => self.location.clone(),
            None => String::new(),
        }
    }

    fn input_char(&mut self, ch: char) {
        self.active_text().push(ch);
    }

    fn backspace(&mut self) {
        self.active_text().pop();
    }

    fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Longest leading number of the input, so `"50000abc"` reads as 50000
fn parse_salary(input: &str) -> Option<f64> {
    let text = input.trim_start();
    text.char_indices()
        .map(|(index, ch)| index + ch.len_utf8())
        .rev()
        .find_map(|end| text[..end].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
