//! Layout helpers.

use ratatui::prelude::*;

/// Screen frame: body plus the two bottom bars.
pub struct MainLayout {
    /// Area owned by the mounted screen.
    pub body: Rect,
    /// Key help.
    pub help_bar: Rect,
    /// Screen title, notices and errors.
    pub status_bar: Rect,
}

/// Home screen columns.
pub struct HomeLayout {
    pub left: Rect,
    pub logo: Rect,
    pub right: Rect,
}

/// Split the terminal into body, help and status.
pub fn create_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(area);

    MainLayout {
        body: chunks[0],
        help_bar: chunks[1],
        status_bar: chunks[2],
    }
}

/// Logo in the middle, one menu on each side.
pub fn create_home_layout(area: Rect) -> HomeLayout {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    HomeLayout {
        left: chunks[0],
        logo: chunks[1],
        right: chunks[2],
    }
}

/// Cells for the items that fit, filled row by row with `columns` cells
/// each, paired with their item index. Rows never shrink below
/// `min_row_height`; when not all rows fit, the window scrolls so the row
/// holding `focused` is the last one shown.
pub fn grid_cells(
    area: Rect,
    columns: usize,
    count: usize,
    min_row_height: u16,
    focused: Option<usize>,
) -> Vec<(usize, Rect)> {
    if columns == 0 || count == 0 || area.height == 0 {
        return vec![];
    }
    let rows = count.div_ceil(columns);
    let fit = usize::from((area.height / min_row_height.max(1)).max(1));
    let shown = rows.min(fit);
    let focus_row = focused.map_or(0, |f| f.min(count - 1) / columns);
    let first_row = (focus_row + 1).saturating_sub(shown);

    let row_height = area.height / shown as u16;
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(row_height); shown])
        .split(area);

    let mut cells = Vec::with_capacity(shown * columns);
    for (offset, row) in row_areas.iter().enumerate() {
        let first = (first_row + offset) * columns;
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row);
        cells.extend(
            cols.iter()
                .enumerate()
                .map(|(c, cell)| (first + c, *cell))
                .filter(|(index, _)| *index < count),
        );
    }
    cells
}

/// Centered popup `width_percent` wide and `height` rows tall.
pub fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width_percent) / 2),
            Constraint::Percentage(width_percent),
            Constraint::Percentage((100 - width_percent) / 2),
        ])
        .split(popup_layout[1])[1]
}
