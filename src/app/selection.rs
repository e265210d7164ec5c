use tracing::debug;

use crate::calendar::{
    cell_index, date_key, format_long_date, month_grid, parse_date_key, week_overview, GRID_CELLS,
};

use super::state::AppState;

pub const NO_SELECTION: &str = "Select a date";

/// Makes `key` the selected date and updates everything derived from it.
pub fn select_date(state: &mut AppState, key: &str) {
    state.selected_date = Some(key.to_string());

    for cell in &mut state.grid {
        cell.selected = false;
    }
    match cell_index(&state.grid, key) {
        Some(idx) => state.grid[idx].selected = true,
        None => debug!(date = key, "selected date is not in the rendered grid"),
    }

    state.notes_cursor = 0;
    state.selected_display = selected_date_display(state.selected_date.as_deref());
}

pub fn selected_date_display(selected: Option<&str>) -> String {
    selected
        .and_then(parse_date_key)
        .map(format_long_date)
        .unwrap_or_else(|| NO_SELECTION.to_string())
}

/// Rebuilds the grid and week overview from the stores.
pub fn render_grid(state: &mut AppState) {
    state.grid = month_grid(
        state.displayed_month,
        state.today,
        state.selected_date.as_deref(),
        state.notes.as_map(),
        state.labels.as_map(),
    );
    state.week = week_overview(state.today, state.notes.as_map());
    state.grid_cursor = state.grid_cursor.min(GRID_CELLS - 1);
    let count = state.selected_notes().len();
    if state.notes_cursor >= count {
        state.notes_cursor = count.saturating_sub(1);
    }
}

pub fn today_cell(state: &AppState) -> usize {
    cell_index(&state.grid, &date_key(state.today)).unwrap_or(0)
}

pub fn prev_month(state: &mut AppState) {
    state.displayed_month = state.displayed_month.prev();
    render_grid(state);
}

pub fn next_month(state: &mut AppState) {
    state.displayed_month = state.displayed_month.next();
    render_grid(state);
}

pub fn go_to_today(state: &mut AppState) {
    state.displayed_month = crate::calendar::YearMonth::of(state.today);
    render_grid(state);
    state.grid_cursor = today_cell(state);
}

/// Advances `today` after midnight so highlights and the week overview follow
/// the wall clock. Returns whether the day changed.
pub fn roll_today(state: &mut AppState, today: chrono::NaiveDate) -> bool {
    if state.today == today {
        return false;
    }
    debug!(from = %state.today, to = %today, "day changed");
    state.today = today;
    render_grid(state);
    true
}

/// Moves the grid cursor without wrapping past the grid edges.
pub fn move_cursor(state: &mut AppState, rows: i32, cols: i32) {
    let row = (state.grid_cursor / 7) as i32 + rows;
    let col = (state.grid_cursor % 7) as i32 + cols;
    let max_row = (GRID_CELLS / 7) as i32;
    if (0..max_row).contains(&row) && (0..7).contains(&col) {
        state.grid_cursor = (row * 7 + col) as usize;
    }
}
