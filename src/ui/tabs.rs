//! Tab-based UI rendering

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs as RataTabs, Wrap};
use ratatui::Frame;

use crate::app::{App, Focus, InputMode, PanelView, Tab};
use crate::domain::{Form, FormRow};
use crate::infrastructure::AnalyticsPanel;
use crate::ui::layout::{self, SIDEBAR_CARD_HEIGHT};

const TAB_DIVIDER: &str = " │ ";

fn tab_label(tab: Tab) -> String {
    format!("{}:{}", tab.shortcut(), tab.title())
}

/// Draw the tab bar at the top
pub fn draw_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|tab| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", tab.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(tab.title()),
            ])
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.current_tab).unwrap_or(0);

    let tabs = RataTabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Roster",
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(TAB_DIVIDER);

    f.render_widget(tabs, area);
}

/// Tab whose title is drawn at `col` on the tab bar's text row
pub fn tab_at(area: Rect, col: u16, row: u16) -> Option<Tab> {
    if row != area.y.saturating_add(1) {
        return None;
    }
    // one border column, then " title " per tab separated by the divider
    let mut x = area.x.saturating_add(1);
    for tab in Tab::ALL {
        let width = tab_label(tab).chars().count() as u16 + 2;
        if col >= x && col < x + width {
            return Some(tab);
        }
        x += width + TAB_DIVIDER.chars().count() as u16;
    }
    None
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

fn message_lines(view_text: &str, color: Color) -> Text<'static> {
    Text::from(
        view_text
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(color))))
            .collect::<Vec<_>>(),
    )
}

/// Draw the Employees tab: department sidebar, form, list
pub fn draw_employees_tab(f: &mut Frame, area: Rect, app: &App) {
    let areas = layout::employees_areas(area);
    draw_sidebar(f, areas.sidebar, app);
    draw_employee_form(f, areas.form, app);
    draw_record_list(
        f,
        areas.list,
        app,
        "Employees",
        app.employees_view(),
        app.employees_scroll,
    );
}

/// Draw the Departments tab: form, list
pub fn draw_departments_tab(f: &mut Frame, area: Rect, app: &App) {
    let areas = layout::departments_areas(area);
    let editing = app.input_mode == InputMode::Editing && app.focus == Focus::Form;
    let mut lines = form_lines(&app.department_form.rows(), editing);
    lines.push(Line::from(Span::styled(
        "Enter/i edit   s submit   Esc stop editing",
        Style::default().fg(Color::DarkGray),
    )));
    let form = Paragraph::new(Text::from(lines))
        .block(pane_block("Add Department".to_string(), app.focus == Focus::Form));
    f.render_widget(form, areas.form);

    draw_record_list(
        f,
        areas.list,
        app,
        "Departments",
        app.departments_view(),
        app.departments_scroll,
    );
}

/// Draw the Analytics tab: one panel per report
pub fn draw_analytics_tab(f: &mut Frame, area: Rect, app: &App) {
    let rects = layout::analytics_areas(area);
    for (panel, rect) in AnalyticsPanel::ALL.into_iter().zip(rects) {
        let mut title = panel.title().to_string();
        match panel {
            AnalyticsPanel::TopDepartments => title.push_str(&format!(" (limit {})", app.top_limit)),
            AnalyticsPanel::AuditSummary => title.push_str(&format!(" ({} days)", app.audit_days)),
            AnalyticsPanel::DepartmentStats => {
                if let Some(dept) = app.selection.get() {
                    title.push_str(&format!(" ({})", dept.department_name));
                }
            }
            AnalyticsPanel::SalaryStats => {
                if let Some(label) = &app.salary_stats_label {
                    title.push_str(&format!(" ({label})"));
                }
            }
            AnalyticsPanel::SalaryGrowth => {
                if let Some(label) = &app.salary_growth_label {
                    title.push_str(&format!(" ({label}, {} months)", app.growth_months));
                }
            }
            AnalyticsPanel::SalaryInsights => {}
        }

        let text = match app.analytics_view(panel) {
            PanelView::Message(msg) => message_lines(msg, Color::DarkGray),
            PanelView::Error(msg) => message_lines(msg, Color::LightRed),
            PanelView::Content(json) => Text::from(json),
        };
        let paragraph = Paragraph::new(text)
            .block(pane_block(title, false))
            .scroll((app.analytics_scroll.min(u16::MAX as usize) as u16, 0));
        f.render_widget(paragraph, rect);
    }
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let block = pane_block("Departments (r reload)".to_string(), focused);

    let text = match app.sidebar_view() {
        PanelView::Message(msg) => message_lines(msg, Color::DarkGray),
        PanelView::Error(msg) => message_lines(msg, Color::LightRed),
        PanelView::Content(cards) => {
            let inner_height = area.height.saturating_sub(2);
            let offset = layout::sidebar_offset(app.sidebar_cursor, inner_height);
            let visible = (inner_height / SIDEBAR_CARD_HEIGHT) as usize;
            let mut lines = Vec::new();
            for card in cards.iter().skip(offset).take(visible.max(1)) {
                let marker = if card.selected { "● " } else { "  " };
                let mut title_style = if card.selected {
                    Style::default()
                        .fg(Color::LightGreen)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                if card.under_cursor && focused {
                    title_style = title_style.bg(Color::DarkGray);
                }
                lines.push(Line::from(Span::styled(
                    format!("{marker}{}", card.title),
                    title_style,
                )));
                lines.push(Line::from(Span::styled(
                    format!("  {}", card.subtitle),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            Text::from(lines)
        }
    };

    f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_employee_form(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Form;
    let editing = app.input_mode == InputMode::Editing && focused;

    let selected_style = if app.selection.is_empty() {
        Style::default().fg(Color::LightYellow)
    } else {
        Style::default().fg(Color::LightGreen)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("Department: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.selected_department_label(), selected_style),
    ])];
    lines.extend(form_lines(&app.employee_form.rows(), editing));
    lines.push(Line::from(vec![
        Span::styled("Department ID ", Style::default().fg(Color::DarkGray)),
        Span::raw(
            app.employee_form
                .department_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "--".to_string()),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        "Enter/i edit   s submit   status: a/r/Space",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(Text::from(lines))
        .block(pane_block("Add Employee".to_string(), focused))
        .wrap(Wrap { trim: false });
    f.render_widget(form, area);
}

fn form_lines(rows: &[FormRow], editing: bool) -> Vec<Line<'static>> {
    let width = rows.iter().map(|row| row.label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|row| {
            let label_style = if row.active {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let mut value = row.value.clone();
            if row.active && editing {
                value.push('_');
            }
            Line::from(vec![
                Span::styled(format!("{:<width$} ", row.label), label_style),
                Span::raw(value),
            ])
        })
        .collect()
}

fn draw_record_list(
    f: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    view: PanelView<Vec<String>>,
    selected: usize,
) {
    let focused = app.focus == Focus::List;
    match view {
        PanelView::Message(msg) => {
            let paragraph = Paragraph::new(message_lines(msg, Color::DarkGray))
                .block(pane_block(title.to_string(), focused));
            f.render_widget(paragraph, area);
        }
        PanelView::Error(msg) => {
            let paragraph = Paragraph::new(message_lines(msg, Color::LightRed))
                .block(pane_block(title.to_string(), focused))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
        PanelView::Content(rows) => {
            let count = rows.len();
            let items: Vec<ListItem> = rows.into_iter().map(ListItem::new).collect();
            let highlight_style = if focused {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let list = List::new(items)
                .block(pane_block(format!("{title} ({count})"), focused))
                .highlight_style(highlight_style);

            let mut state = ListState::default();
            if focused {
                state.select(Some(selected));
            }
            f.render_stateful_widget(list, area, &mut state);
        }
    }
}
