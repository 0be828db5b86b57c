//! View controller behaviour driven through actions and runtime events

use roster::app::{
    App, Focus, InputMode, PanelView, Tab, ANALYTICS_ERROR, DEPARTMENTS_EMPTY, DEPARTMENTS_ERROR,
    DEPARTMENT_ADDED, EMPLOYEES_EMPTY, EMPLOYEES_ERROR, EMPLOYEE_ADDED, EMPLOYEE_TRANSPORT_ERROR,
    SELECT_DEPARTMENT_FIRST, SIDEBAR_EMPTY, SIDEBAR_ERROR,
};
use roster::core::{Action, NotifyLevel};
use roster::domain::{Department, Employee, EmployeeStatus, Form};
use roster::infrastructure::{AnalyticsPanel, ApiError, DepartmentTarget, RuntimeCommand, RuntimeEvent};
use serde_json::json;

fn dept(id: i64, name: &str, location: &str) -> Department {
    Department {
        department_id: id,
        department_name: name.to_string(),
        location: location.to_string(),
        created_at: None,
    }
}

fn employee(first: &str, last: &str, salary: f64, department_id: i64) -> Employee {
    Employee {
        employee_id: Some(1),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        salary,
        department_id,
        date_joined: None,
        status: Some("active".to_string()),
        last_updated: None,
    }
}

fn down() -> ApiError {
    ApiError::Transport {
        url: "http://localhost:8000/employees/".to_string(),
        message: "connection refused".to_string(),
    }
}

/// App with a loaded sidebar and nothing queued
fn app_with_sidebar(departments: Vec<Department>) -> App {
    let mut app = App::new();
    app.load_initial();
    app.take_commands();
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::Sidebar,
        result: Ok(departments),
    });
    app
}

fn selected_count(app: &App) -> usize {
    match app.sidebar_view() {
        PanelView::Content(cards) => cards.iter().filter(|card| card.selected).count(),
        _ => 0,
    }
}

fn count_of(cmds: &[RuntimeCommand], wanted: &RuntimeCommand) -> usize {
    cmds.iter().filter(|cmd| *cmd == wanted).count()
}

#[test]
fn test_initial_load_requests_every_list() {
    let mut app = App::new();
    app.load_initial();
    let cmds = app.take_commands();

    assert!(cmds.contains(&RuntimeCommand::LoadEmployees));
    assert!(cmds.contains(&RuntimeCommand::LoadHeadcount));
    assert!(cmds.contains(&RuntimeCommand::LoadDepartments {
        target: DepartmentTarget::List
    }));
    assert!(cmds.contains(&RuntimeCommand::LoadDepartments {
        target: DepartmentTarget::Sidebar
    }));
    assert!(app.take_commands().is_empty());
    assert_eq!(
        app.sidebar_view(),
        PanelView::Message("Loading departments...")
    );
}

#[test]
fn test_submit_without_selection_never_hits_network() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin")]);
    app.employee_form.first_name = "Ada".to_string();

    app.apply_action(Action::SubmitEmployeeForm);

    assert!(app.take_commands().is_empty());
    let alert = app.alert.as_ref().expect("guidance alert");
    assert_eq!(alert.message, SELECT_DEPARTMENT_FIRST);
    assert_eq!(alert.level, NotifyLevel::Warn);
    // the form is untouched
    assert_eq!(app.employee_form.first_name, "Ada");

    // same guard when submitting from the editing mode
    app.apply_action(Action::DismissAlert);
    app.start_editing();
    app.submit_active_form();
    assert!(app.take_commands().is_empty());
    assert!(app.alert.is_some());
}

#[test]
fn test_submit_with_selection_posts_selected_department() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin"), dept(2, "Sales", "Paris")]);
    app.apply_action(Action::CursorDown);
    app.apply_action(Action::SelectDepartment);

    app.employee_form.first_name = "Grace".to_string();
    app.employee_form.last_name = "Hopper".to_string();
    app.employee_form.email = "grace@example.com".to_string();
    app.employee_form.salary = "98000".to_string();
    app.employee_form.date_joined = "2024-01-15".to_string();
    app.employee_form.status = EmployeeStatus::Resigned;

    app.apply_action(Action::SubmitEmployeeForm);

    let cmds = app.take_commands();
    assert_eq!(cmds.len(), 1);
    let RuntimeCommand::CreateEmployee { record } = &cmds[0] else {
        panic!("expected CreateEmployee, got {cmds:?}");
    };
    assert_eq!(record.department_id, 2);
    assert_eq!(record.salary, Some(98000.0));
    assert_eq!(record.status, EmployeeStatus::Resigned);
    assert_eq!(record.date_joined, "2024-01-15");
    assert!(app.alert.is_none());
}

#[test]
fn test_employee_created_clears_selection_and_reloads_once() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin")]);
    app.apply_action(Action::SelectDepartment);
    assert_eq!(app.employee_form.department_id, Some(1));
    app.employee_form.first_name = "Linus".to_string();
    app.apply_action(Action::SubmitEmployeeForm);
    app.take_commands();

    app.apply_event(RuntimeEvent::EmployeeCreated(Ok(())));

    assert!(app.selection.is_empty());
    assert_eq!(app.employee_form.department_id, None);
    assert!(app.employee_form.first_name.is_empty());
    assert_eq!(selected_count(&app), 0);
    assert_eq!(
        app.selected_department_label(),
        roster::domain::selection::NO_SELECTION_LABEL
    );
    assert_eq!(app.alert.as_ref().map(|a| a.message.as_str()), Some(EMPLOYEE_ADDED));

    let cmds = app.take_commands();
    assert_eq!(count_of(&cmds, &RuntimeCommand::LoadEmployees), 1);
}

#[test]
fn test_employee_rejected_keeps_form_and_selection() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin")]);
    app.apply_action(Action::SelectDepartment);
    app.employee_form.email = "taken@example.com".to_string();
    app.apply_action(Action::SubmitEmployeeForm);
    app.take_commands();

    app.apply_event(RuntimeEvent::EmployeeCreated(Err(ApiError::Status {
        url: "http://localhost:8000/employees/".to_string(),
        status: 400,
        detail: Some("Email already registered".to_string()),
    })));

    let alert = app.alert.as_ref().expect("error alert");
    assert_eq!(alert.message, "Error: Email already registered");
    assert_eq!(alert.level, NotifyLevel::Error);
    assert_eq!(app.selection.department_id(), Some(1));
    assert_eq!(app.employee_form.email, "taken@example.com");
    assert!(app.take_commands().is_empty());
}

#[test]
fn test_employee_rejected_without_detail_uses_fallback() {
    let mut app = App::new();
    app.apply_event(RuntimeEvent::EmployeeCreated(Err(ApiError::Status {
        url: "u".to_string(),
        status: 500,
        detail: None,
    })));
    assert_eq!(
        app.alert.as_ref().map(|a| a.message.as_str()),
        Some("Error: Failed to add employee")
    );

    app.apply_event(RuntimeEvent::EmployeeCreated(Err(down())));
    assert_eq!(
        app.alert.as_ref().map(|a| a.message.as_str()),
        Some(EMPLOYEE_TRANSPORT_ERROR)
    );
}

#[test]
fn test_department_created_reloads_list_and_sidebar() {
    let mut app = App::new();
    app.show_tab(Tab::Departments);
    app.department_form.department_name = "Legal".to_string();
    app.department_form.location = "Lisbon".to_string();
    app.apply_action(Action::SubmitDepartmentForm);

    let cmds = app.take_commands();
    assert_eq!(cmds.len(), 1);
    let RuntimeCommand::CreateDepartment { record } = &cmds[0] else {
        panic!("expected CreateDepartment, got {cmds:?}");
    };
    assert_eq!(record.department_name, "Legal");
    assert_eq!(record.location, "Lisbon");

    app.apply_event(RuntimeEvent::DepartmentCreated(Ok(())));

    let cmds = app.take_commands();
    assert_eq!(
        count_of(
            &cmds,
            &RuntimeCommand::LoadDepartments {
                target: DepartmentTarget::List
            }
        ),
        1
    );
    assert_eq!(
        count_of(
            &cmds,
            &RuntimeCommand::LoadDepartments {
                target: DepartmentTarget::Sidebar
            }
        ),
        1
    );
    assert!(app.department_form.department_name.is_empty());
    assert_eq!(app.alert.as_ref().map(|a| a.message.as_str()), Some(DEPARTMENT_ADDED));
}

#[test]
fn test_department_rejected_uses_department_fallback() {
    let mut app = App::new();
    app.apply_event(RuntimeEvent::DepartmentCreated(Err(ApiError::Status {
        url: "u".to_string(),
        status: 422,
        detail: None,
    })));
    assert_eq!(
        app.alert.as_ref().map(|a| a.message.as_str()),
        Some("Error: Failed to add department")
    );
}

#[test]
fn test_selection_marks_exactly_one_card() {
    let mut app = app_with_sidebar(vec![
        dept(1, "Engineering", "Berlin"),
        dept(2, "Sales", "Paris"),
        dept(3, "Support", "Austin"),
    ]);
    assert_eq!(selected_count(&app), 0);

    for index in [0, 2, 1, 1, 0] {
        app.apply_action(Action::SelectDepartmentAt(index));
        assert_eq!(selected_count(&app), 1);
        assert_eq!(app.sidebar_cursor, index);
        assert_eq!(app.employee_form.department_id, Some(index as i64 + 1));
    }
    assert_eq!(app.selected_department_label(), "Engineering - Berlin");
    assert_eq!(app.focus, Focus::Sidebar);
}

#[test]
fn test_selection_survives_sidebar_reload() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin"), dept(2, "Sales", "Paris")]);
    app.apply_action(Action::SelectDepartmentAt(1));

    app.apply_action(Action::ReloadSidebar);
    assert_eq!(
        app.take_commands(),
        vec![RuntimeCommand::LoadDepartments {
            target: DepartmentTarget::Sidebar
        }]
    );
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::Sidebar,
        result: Ok(vec![
            dept(5, "Legal", "Lisbon"),
            dept(1, "Engineering", "Berlin"),
            dept(2, "Sales", "Paris"),
        ]),
    });

    let PanelView::Content(cards) = app.sidebar_view() else {
        panic!("sidebar should list departments");
    };
    let selected: Vec<&str> = cards
        .iter()
        .filter(|card| card.selected)
        .map(|card| card.title.as_str())
        .collect();
    assert_eq!(selected, vec!["Sales"]);
}

#[test]
fn test_selecting_past_the_end_is_ignored() {
    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin")]);
    app.apply_action(Action::SelectDepartmentAt(7));
    assert!(app.selection.is_empty());
}

#[test]
fn test_empty_collections_show_messages() {
    let mut app = app_with_sidebar(Vec::new());
    app.apply_event(RuntimeEvent::EmployeesLoaded(Ok(Vec::new())));
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::List,
        result: Ok(Vec::new()),
    });

    assert_eq!(app.employees_view(), PanelView::Message(EMPLOYEES_EMPTY));
    assert_eq!(app.departments_view(), PanelView::Message(DEPARTMENTS_EMPTY));
    assert_eq!(app.sidebar_view(), PanelView::Message(SIDEBAR_EMPTY));
}

#[test]
fn test_failed_fetches_show_errors() {
    let mut app = App::new();
    app.load_initial();
    app.apply_event(RuntimeEvent::EmployeesLoaded(Err(down())));
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::List,
        result: Err(down()),
    });
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::Sidebar,
        result: Err(ApiError::Decode {
            url: "u".to_string(),
            message: "expected array".to_string(),
        }),
    });
    app.apply_event(RuntimeEvent::HeadcountLoaded(Err(down())));

    assert_eq!(app.employees_view(), PanelView::Error(EMPLOYEES_ERROR));
    assert_eq!(app.departments_view(), PanelView::Error(DEPARTMENTS_ERROR));
    assert_eq!(app.sidebar_view(), PanelView::Error(SIDEBAR_ERROR));
    assert_eq!(app.headcount, None);
    assert!(app.alert.is_none());
}

#[test]
fn test_lists_render_rows() {
    let mut app = App::new();
    app.apply_event(RuntimeEvent::EmployeesLoaded(Ok(vec![employee(
        "Ada", "Lovelace", 85000.5, 3,
    )])));
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::List,
        result: Ok(vec![dept(3, "Research", "London")]),
    });
    app.apply_event(RuntimeEvent::HeadcountLoaded(Ok(42)));

    assert_eq!(
        app.employees_view(),
        PanelView::Content(vec![
            "Ada Lovelace - ada@example.com - $85000.5 - Dept: 3".to_string()
        ])
    );
    assert_eq!(
        app.departments_view(),
        PanelView::Content(vec!["Research - London (ID: 3)".to_string()])
    );
    assert_eq!(app.headcount, Some(42));
}

#[test]
fn test_responses_in_any_order() {
    let mut app = App::new();
    app.load_initial();
    app.take_commands();

    // sidebar answers before the list, employees last
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::Sidebar,
        result: Ok(vec![dept(1, "Engineering", "Berlin")]),
    });
    app.apply_event(RuntimeEvent::DepartmentsLoaded {
        target: DepartmentTarget::List,
        result: Ok(vec![dept(1, "Engineering", "Berlin"), dept(2, "Sales", "Paris")]),
    });
    app.apply_event(RuntimeEvent::EmployeesLoaded(Ok(Vec::new())));

    assert!(matches!(app.sidebar_view(), PanelView::Content(cards) if cards.len() == 1));
    assert!(matches!(app.departments_view(), PanelView::Content(rows) if rows.len() == 2));
}

#[test]
fn test_analytics_panels() {
    let mut app = App::new();
    app.apply_action(Action::ShowTab(Tab::Analytics));
    assert_eq!(app.focus, Focus::List);

    app.apply_action(Action::LoadTopDepartments(None));
    app.apply_action(Action::LoadSalaryInsights);
    assert_eq!(
        app.take_commands(),
        vec![
            RuntimeCommand::LoadTopDepartments { limit: 5 },
            RuntimeCommand::LoadSalaryInsights
        ]
    );

    let insights = json!({"average_salary": 72000.0, "total_employees": 12});
    app.apply_event(RuntimeEvent::AnalyticsLoaded {
        panel: AnalyticsPanel::SalaryInsights,
        result: Ok(insights.clone()),
    });
    app.apply_event(RuntimeEvent::AnalyticsLoaded {
        panel: AnalyticsPanel::TopDepartments,
        result: Err(down()),
    });

    let PanelView::Content(text) = app.analytics_view(AnalyticsPanel::SalaryInsights) else {
        panic!("insights should render");
    };
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, insights);
    assert!(text.contains('\n'));
    assert_eq!(
        app.analytics_view(AnalyticsPanel::TopDepartments),
        PanelView::Error(ANALYTICS_ERROR)
    );
    assert!(matches!(
        app.analytics_view(AnalyticsPanel::AuditSummary),
        PanelView::Message(_)
    ));
}

#[test]
fn test_audit_and_stats_use_settings() {
    let mut app = App::new();
    app.audit_days = 14;
    app.apply_action(Action::LoadAuditSummary(None));
    app.apply_action(Action::LoadAuditSummary(Some(60)));
    assert_eq!(
        app.take_commands(),
        vec![
            RuntimeCommand::LoadAuditSummary { days: 14 },
            RuntimeCommand::LoadAuditSummary { days: 60 }
        ]
    );
    assert_eq!(app.audit_days, 60);
}

#[test]
fn test_salary_stats_follow_selection() {
    let mut app = app_with_sidebar(vec![dept(2, "Sales", "Paris")]);
    app.apply_action(Action::LoadSalaryStats);
    assert_eq!(app.salary_stats_label.as_deref(), Some("all departments"));

    app.apply_action(Action::SelectDepartmentAt(0));
    app.apply_action(Action::LoadSalaryStats);
    assert_eq!(app.salary_stats_label.as_deref(), Some("Sales"));
    assert_eq!(
        app.take_commands(),
        vec![
            RuntimeCommand::LoadSalaryStats { department_id: None },
            RuntimeCommand::LoadSalaryStats {
                department_id: Some(2)
            }
        ]
    );
}

#[test]
fn test_salary_growth_uses_highlighted_employee() {
    let mut app = App::new();
    app.apply_action(Action::LoadSalaryGrowth(None));
    assert!(app.take_commands().is_empty());
    assert_eq!(app.status_text().map(|(_, level)| level), Some(NotifyLevel::Warn));

    let mut second = employee("Alan", "Turing", 90000.0, 1);
    second.employee_id = Some(42);
    app.apply_event(RuntimeEvent::EmployeesLoaded(Ok(vec![
        employee("Ada", "Lovelace", 85000.0, 1),
        second,
    ])));
    app.show_tab(Tab::Employees);
    app.focus = Focus::List;
    app.apply_action(Action::CursorDown);

    app.enter_command();
    app.command.input = "growth 24".to_string();
    app.apply_command();

    assert_eq!(app.current_tab, Tab::Analytics);
    assert_eq!(app.growth_months, 24);
    assert_eq!(app.salary_growth_label.as_deref(), Some("Alan Turing"));
    assert_eq!(
        app.take_commands(),
        vec![RuntimeCommand::LoadSalaryGrowth {
            employee_id: 42,
            months_back: 24
        }]
    );

    // refresh repeats it with the remembered window
    app.refresh();
    assert_eq!(
        app.take_commands(),
        vec![RuntimeCommand::LoadSalaryGrowth {
            employee_id: 42,
            months_back: 24
        }]
    );
}

#[test]
fn test_analytics_scroll_stops_at_longest_panel() {
    let mut app = App::new();
    app.show_tab(Tab::Analytics);
    // only one-line hints so far
    app.apply_action(Action::CursorDown);
    assert_eq!(app.analytics_scroll, 0);

    app.apply_event(RuntimeEvent::AnalyticsLoaded {
        panel: AnalyticsPanel::AuditSummary,
        result: Ok(json!({"period_days": 30, "total_actions": 3})),
    });
    // {, two fields, }
    for _ in 0..10 {
        app.apply_action(Action::CursorDown);
    }
    assert_eq!(app.analytics_scroll, 3);

    // a shorter reload pulls the offset back
    app.apply_event(RuntimeEvent::AnalyticsLoaded {
        panel: AnalyticsPanel::AuditSummary,
        result: Ok(json!({"total_actions": 3})),
    });
    assert_eq!(app.analytics_scroll, 2);
    app.apply_action(Action::CursorUp);
    assert_eq!(app.analytics_scroll, 1);
}

#[test]
fn test_tab_switch_has_no_data_effect() {
    let mut app = App::new();
    for tab in [Tab::Analytics, Tab::Departments, Tab::Employees, Tab::Departments] {
        app.apply_action(Action::ShowTab(tab));
    }
    assert_eq!(app.current_tab, Tab::Departments);
    assert!(app.take_commands().is_empty());
}

#[test]
fn test_editing_types_into_active_form() {
    let mut app = App::new();
    app.show_tab(Tab::Departments);
    app.apply_action(Action::StartEditing);
    assert_eq!(app.input_mode, InputMode::Editing);

    for ch in "Ops".chars() {
        app.edit_input(ch);
    }
    app.edit_next_field();
    for ch in "Rome".chars() {
        app.edit_input(ch);
    }
    app.edit_backspace();

    assert_eq!(app.department_form.department_name, "Ops");
    assert_eq!(app.department_form.location, "Rom");
    assert_eq!(app.department_form.active(), 1);

    app.submit_active_form();
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.take_commands().len(), 1);
}

#[test]
fn test_keymap_drives_app() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    let mut app = app_with_sidebar(vec![dept(1, "Engineering", "Berlin"), dept(2, "Sales", "Paris")]);
    let press = |app: &mut App, code: KeyCode| {
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(action) = app.keymap.resolve(app.current_tab, app.focus, &key) {
            app.apply_action(action);
        }
    };

    press(&mut app, KeyCode::Char('j'));
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.selection.department_id(), Some(2));

    press(&mut app, KeyCode::Tab);
    assert_eq!(app.focus, Focus::Form);
    press(&mut app, KeyCode::Char('s'));
    assert!(matches!(
        app.take_commands().as_slice(),
        [RuntimeCommand::CreateEmployee { .. }]
    ));

    press(&mut app, KeyCode::Char('3'));
    assert_eq!(app.current_tab, Tab::Analytics);
    press(&mut app, KeyCode::Char('d'));
    assert_eq!(
        app.take_commands(),
        vec![RuntimeCommand::LoadDepartmentStats { department_id: 2 }]
    );

    press(&mut app, KeyCode::Char('q'));
    assert!(app.should_quit);
}
