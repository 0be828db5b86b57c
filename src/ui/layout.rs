use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    pub tab_bar: Rect,
    pub info: Rect,
    pub main: Rect,
    pub footer: Rect,
    pub status_line: Rect,
    pub command_line: Rect,
}

pub fn areas(size: Rect) -> UiAreas {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(44)])
        .split(vertical[0]);

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[2]);

    UiAreas {
        size,
        header: vertical[0],
        tab_bar: header_chunks[0],
        info: header_chunks[1],
        main: vertical[1],
        footer: vertical[2],
        status_line: footer_chunks[0],
        command_line: footer_chunks[1],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EmployeesAreas {
    pub sidebar: Rect,
    pub form: Rect,
    pub list: Rect,
}

pub fn employees_areas(main: Rect) -> EmployeesAreas {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(main);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(columns[1]);

    EmployeesAreas {
        sidebar: columns[0],
        form: right[0],
        list: right[1],
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DepartmentsAreas {
    pub form: Rect,
    pub list: Rect,
}

pub fn departments_areas(main: Rect) -> DepartmentsAreas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(main);

    DepartmentsAreas {
        form: rows[0],
        list: rows[1],
    }
}

/// Analytics grid, three rows of two, in `AnalyticsPanel::ALL` order
pub fn analytics_areas(main: Rect) -> [Rect; 6] {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(main);

    let halves = |area: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area)
    };
    let top = halves(rows[0]);
    let middle = halves(rows[1]);
    let bottom = halves(rows[2]);

    [top[0], top[1], middle[0], middle[1], bottom[0], bottom[1]]
}

/// Lines each sidebar card takes
pub const SIDEBAR_CARD_HEIGHT: u16 = 2;

/// First card drawn when the cursor must stay visible in `height` rows
pub fn sidebar_offset(cursor: usize, height: u16) -> usize {
    let visible = (height / SIDEBAR_CARD_HEIGHT).max(1) as usize;
    if cursor >= visible {
        cursor + 1 - visible
    } else {
        0
    }
}

/// Sidebar card under a click, `area` being the bordered sidebar pane
///
/// Rows past the last whole card and the border itself hit nothing. The
/// index may still be past the end of the department list.
pub fn sidebar_index_at(area: Rect, cursor: usize, col: u16, row: u16) -> Option<usize> {
    let inner = bordered_inner(area);
    if !contains(inner, col, row) {
        return None;
    }
    let visible = ((inner.height / SIDEBAR_CARD_HEIGHT) as usize).max(1);
    let slot = ((row - inner.y) / SIDEBAR_CARD_HEIGHT) as usize;
    if slot >= visible {
        return None;
    }
    Some(sidebar_offset(cursor, inner.height) + slot)
}

pub fn contains(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Area inside a one-cell border
fn bordered_inner(rect: Rect) -> Rect {
    Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: rect.width.saturating_sub(2),
        height: rect.height.saturating_sub(2),
    }
}
