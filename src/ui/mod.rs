use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

pub mod layout;
pub mod tabs;

use crate::app::{App, InputMode, Tab};
use crate::core::{NotifyLevel, Scope};

pub fn draw(f: &mut Frame, app: &App) {
    let areas = layout::areas(f.size());

    tabs::draw_tab_bar(f, areas.tab_bar, app);
    draw_header_info(f, areas.info, app);

    match app.current_tab {
        Tab::Employees => tabs::draw_employees_tab(f, areas.main, app),
        Tab::Departments => tabs::draw_departments_tab(f, areas.main, app),
        Tab::Analytics => tabs::draw_analytics_tab(f, areas.main, app),
    }

    draw_status_line(f, areas.status_line, app);
    draw_command_line(f, areas.command_line, app);

    if app.help_open {
        draw_help_popup(f, areas.size, app);
    }
    if app.alert.is_some() {
        draw_alert_popup(f, areas.size, app);
    }
}

fn draw_header_info(f: &mut Frame, area: Rect, app: &App) {
    let headcount = app
        .headcount
        .map(|count| count.to_string())
        .unwrap_or_else(|| "--".to_string());
    let line = Line::from(vec![
        Span::styled("API ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", truncate_str(&app.api_base_url, 24))),
        Span::styled("Headcount ", Style::default().fg(Color::DarkGray)),
        Span::raw(headcount),
    ]);
    let paragraph = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Left);
    f.render_widget(paragraph, area);
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Tab ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.current_tab.title())),
        Span::styled("Focus ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.focus.title())),
        Span::styled("Selected ", Style::default().fg(Color::DarkGray)),
        Span::raw(
            app.selection
                .get()
                .map(|dept| dept.department_name.clone())
                .unwrap_or_else(|| "--".to_string()),
        ),
    ];
    if app.input_mode == InputMode::Editing {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "-- EDITING --",
            Style::default().fg(Color::LightYellow),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Left);

    f.render_widget(paragraph, area);
}

/// Get command hint for autocompletion
fn command_hint(input: &str) -> Option<&'static str> {
    let input = input.trim().to_lowercase();
    if input.is_empty() {
        return None;
    }

    let commands = [
        ("employees", "Show employees"),
        ("departments", "Show departments"),
        ("analytics", "Show analytics"),
        ("refresh", "Reload current tab"),
        ("top", "Top departments [N]"),
        ("insights", "Salary insights"),
        ("dstats", "Selected department stats"),
        ("audit", "Audit summary [days]"),
        ("salstats", "Salary statistics"),
        ("growth", "Salary growth [months]"),
        ("export", "Export current tab"),
        ("help", "Toggle help"),
        ("quit", "Quit"),
    ];

    for (cmd, desc) in commands {
        if cmd.starts_with(&input) {
            return Some(desc);
        }
    }
    None
}

fn draw_command_line(f: &mut Frame, area: Rect, app: &App) {
    let content = match app.input_mode {
        InputMode::Command => {
            let hint = command_hint(&app.command.input);
            let hint_text = hint.unwrap_or("employees | departments | analytics | top N | audit N");
            Line::from(vec![
                Span::styled(": ", Style::default().fg(Color::Yellow)),
                Span::raw(app.command.input.clone()),
                Span::styled(
                    format!("  {}", hint_text),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        InputMode::Editing => Line::from(Span::styled(
            "Tab/Down next field  Shift-Tab/Up previous  Enter submit  Esc done",
            Style::default().fg(Color::DarkGray),
        )),
        InputMode::Normal => {
            if let Some((text, level)) = app.status_text() {
                Line::from(vec![
                    Span::styled("msg: ", Style::default().fg(Color::DarkGray)),
                    Span::styled(text.to_string(), Style::default().fg(level_color(level))),
                ])
            } else {
                Line::from(Span::styled(
                    "? help  : command  1-3 tabs  Tab pane  r reload  e export  q quit",
                    Style::default().fg(Color::DarkGray),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(content).style(Style::default().fg(Color::White));
    f.render_widget(paragraph, area);
}

fn level_color(level: NotifyLevel) -> Color {
    match level {
        NotifyLevel::Info => Color::LightGreen,
        NotifyLevel::Warn => Color::LightYellow,
        NotifyLevel::Error => Color::LightRed,
    }
}

fn draw_help_popup(f: &mut Frame, area: Rect, app: &App) {
    let popup_area = centered_rect(72, 80, area);
    f.render_widget(Clear, popup_area);

    let mut lines = Vec::new();
    let mut current: Option<Scope> = None;
    for entry in app.keymap.help_entries() {
        if current != Some(entry.scope) {
            if current.is_some() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                entry.scope.label(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            current = Some(entry.scope);
        }
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", entry.keys), Style::default().fg(Color::Yellow)),
            Span::raw(entry.description),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Commands: employees dept analytics refresh top [N] insights dstats audit [days] salstats growth [months] export help quit",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(Block::default().title("Help (? or Esc to close)").borders(Borders::ALL))
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

fn draw_alert_popup(f: &mut Frame, area: Rect, app: &App) {
    let Some(alert) = app.alert.as_ref() else {
        return;
    };
    let popup_area = centered_rect(60, 40, area);
    f.render_widget(Clear, popup_area);

    let mut lines: Vec<Line> = alert.message.lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Enter or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(alert.title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(level_color(alert.level))),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, popup_area);
}

fn truncate_str(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    value.chars().take(max).collect::<String>() + "…"
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
