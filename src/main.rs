use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use roster::app::{App, Focus, InputMode, Tab};
use roster::config::{self, Config};
use roster::core::{Action, NotifyLevel};
use roster::infrastructure::{HttpApiClient, RuntimeBridge};
use roster::ui::layout::contains;
use roster::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "roster",
    version,
    about = "Roster: a terminal front end for the employee/department API"
)]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(long)]
    api: Option<String>,

    /// Config file to read instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many departments the top-departments report asks for
    #[arg(long)]
    top_limit: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let (mut config, config_error) = match config::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    if let Some(api) = args.api {
        config.api_base_url = api;
    }
    if let Some(limit) = args.top_limit {
        config.top_departments_limit = limit;
    }

    if let Some(path) = config::log_path() {
        if let Err(err) = logging::init(&path, config.log_filter.as_deref()) {
            eprintln!("logging disabled: {err:#}");
        }
    }
    if let Some(err) = config_error.as_ref() {
        tracing::warn!("{err:#}; using defaults");
    }
    tracing::info!(api = %config.api_base_url(), "starting");

    let client =
        HttpApiClient::new(&config.api_base_url()).context("failed to build HTTP client")?;
    let runtime = RuntimeBridge::new(Arc::new(client)).context("failed to start runtime")?;

    let mut app = App::with_config(&config);
    if let Some(err) = config_error {
        app.set_status(format!("Config ignored: {err}"), NotifyLevel::Warn);
    }
    app.load_initial();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, &runtime);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!("{err:#}");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: &RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, runtime)?;
        terminal.draw(|f| ui::draw(f, &app))?;
        if app.should_quit {
            tracing::info!("quitting");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

/// Forward queued requests and apply finished ones
fn pump_background(app: &mut App, runtime: &RuntimeBridge) -> Result<()> {
    for cmd in app.take_commands() {
        runtime.send(cmd)?;
    }
    for event in runtime.poll_events() {
        app.apply_event(event);
    }
    // events may have queued reloads
    for cmd in app.take_commands() {
        runtime.send(cmd)?;
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.alert.is_some() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.apply_action(Action::DismissAlert);
        }
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if let Some(action) = app.keymap.resolve(app.current_tab, app.focus, &key) {
        app.apply_action(action);
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => app.submit_active_form(),
        KeyCode::Tab | KeyCode::Down => app.edit_next_field(),
        KeyCode::BackTab | KeyCode::Up => app.edit_prev_field(),
        KeyCode::Left | KeyCode::Right => app.edit_cycle_choice(),
        KeyCode::Backspace => app.edit_backspace(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.apply_action(Action::Quit);
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.edit_input(ch);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open || app.alert.is_some() || app.input_mode != InputMode::Normal {
        return;
    }
    let Some(size) = terminal_rect() else {
        return;
    };
    let areas = ui::layout::areas(size);
    let col = mouse.column;
    let row = mouse.row;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => handle_click(app, areas, col, row),
        MouseEventKind::ScrollUp => app.apply_action(Action::CursorUp),
        MouseEventKind::ScrollDown => app.apply_action(Action::CursorDown),
        _ => {}
    }
}

fn handle_click(app: &mut App, areas: ui::layout::UiAreas, col: u16, row: u16) {
    if let Some(tab) = ui::tabs::tab_at(areas.tab_bar, col, row) {
        app.apply_action(Action::ShowTab(tab));
        return;
    }

    match app.current_tab {
        Tab::Employees => {
            let panes = ui::layout::employees_areas(areas.main);
            if contains(panes.sidebar, col, row) {
                app.focus = Focus::Sidebar;
                if let Some(index) =
                    ui::layout::sidebar_index_at(panes.sidebar, app.sidebar_cursor, col, row)
                {
                    app.apply_action(Action::SelectDepartmentAt(index));
                }
            } else if contains(panes.form, col, row) {
                app.focus = Focus::Form;
            } else if contains(panes.list, col, row) {
                app.focus = Focus::List;
            }
        }
        Tab::Departments => {
            let panes = ui::layout::departments_areas(areas.main);
            if contains(panes.form, col, row) {
                app.focus = Focus::Form;
            } else if contains(panes.list, col, row) {
                app.focus = Focus::List;
            }
        }
        Tab::Analytics => {}
    }
}

fn terminal_rect() -> Option<Rect> {
    let (width, height) = crossterm::terminal::size().ok()?;
    Some(Rect {
        x: 0,
        y: 0,
        width,
        height,
    })
}
