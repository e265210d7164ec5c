pub mod analytics;
pub mod assistant;
pub mod bulk;
pub mod calendar_grid;
pub mod deadlines;
pub mod form;
pub mod header;
pub mod labels;
pub mod notes_panel;
pub mod popups;
pub mod status_bar;

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::Frame;

use crate::app::{AppState, InputMode, InputTarget, Tab};
use crate::calendar::format_long_date;
use crate::edit_buffer::EditBuffer;

use calendar_grid::CalendarGrid;
use deadlines::DeadlinePanel;
use header::Header;
use notes_panel::{NotesPanel, WeekOverview};
use status_bar::StatusBar;

const DEADLINE_PANEL_WIDTH: u16 = 38;

pub fn render(frame: &mut Frame, state: &AppState) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(frame.area());

    let today = format_long_date(state.today);
    let header = Header {
        active: state.tab,
        date: &today,
    };
    frame.render_widget(header, chunks[0]);

    let body = if state.deadlines_visible && chunks[1].width > DEADLINE_PANEL_WIDTH * 2 {
        let cols = Layout::horizontal([Constraint::Min(1), Constraint::Length(DEADLINE_PANEL_WIDTH)])
            .split(chunks[1]);
        frame.render_widget(DeadlinePanel { view: &state.deadlines }, cols[1]);
        cols[0]
    } else {
        chunks[1]
    };

    match state.tab {
        Tab::Calendar => render_calendar(frame, state, body),
        Tab::Labels => frame.render_widget(labels::LabelsView { state }, body),
        Tab::BulkDelete => frame.render_widget(bulk::BulkView { state }, body),
        Tab::Analytics => frame.render_widget(analytics::AnalyticsView { state }, body),
        Tab::Assistant => frame.render_widget(assistant::AssistantView { state }, body),
    }

    if let Some(modal) = &state.note_modal {
        popups::render_note_modal(frame, modal, body);
    }
    if let Some(confirm) = &state.confirm {
        popups::render_confirm_popup(frame, &confirm.message, body);
    }
    if state.show_help {
        popups::render_help_popup(frame, &state.help, body);
    }
    if let Some(err) = &state.error_popup {
        popups::render_error_popup(frame, err, body);
    }

    let insert_mode = !matches!(state.input_mode, InputMode::Normal) || state.note_modal.is_some();
    let status = StatusBar {
        hints: &state.hints,
        message: state.status_message.as_deref(),
        insert_mode,
        context: state.selected_date.as_deref(),
    };
    frame.render_widget(status, chunks[2]);
}

fn render_calendar(frame: &mut Frame, state: &AppState, area: Rect) {
    let cols = Layout::horizontal([Constraint::Percentage(62), Constraint::Percentage(38)]).split(area);

    let grid = CalendarGrid {
        title: state.displayed_month.title(),
        cells: &state.grid,
        cursor: state.grid_cursor,
    };
    frame.render_widget(grid, cols[0]);

    let side = Layout::vertical([Constraint::Min(6), Constraint::Length(9)]).split(cols[1]);
    let draft_edit = match &state.input_mode {
        InputMode::Insert {
            buffer,
            target: InputTarget::NoteDraft,
        } => Some(buffer),
        _ => None,
    };
    let panel = NotesPanel {
        date_display: &state.selected_display,
        notes: state.selected_notes(),
        cursor: state.notes_cursor,
        draft: &state.note_draft,
        draft_edit,
    };
    frame.render_widget(panel, side[0]);
    frame.render_widget(WeekOverview { days: &state.week }, side[1]);
}

/// `#rrggbb`, or `#rrggbbaa` blended over black.
pub fn hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
    match digits.len() {
        6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
        8 => {
            let alpha = channel(6)? as u16;
            let blend = |c: u8| ((c as u16 * alpha) / 255) as u8;
            Some(Color::Rgb(blend(channel(0)?), blend(channel(2)?), blend(channel(4)?)))
        }
        _ => None,
    }
}

/// Text with the char under the cursor shown reversed.
pub fn edit_spans(buffer: &EditBuffer, style: Style) -> Vec<Span<'static>> {
    let (before, at, after) = buffer.split_at_cursor();
    let cursor_style = style.add_modifier(Modifier::REVERSED);
    vec![
        Span::styled(before, style),
        Span::styled(at.map_or(" ".to_string(), String::from), cursor_style),
        Span::styled(after, style),
    ]
}

pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Scroll offset that keeps `line` inside a viewport of `height` rows.
pub fn scroll_to(line: usize, height: u16) -> u16 {
    let height = height.max(1) as usize;
    line.saturating_sub(height - 1) as u16
}

/// Buffer contents row by row. Cells hidden behind a wide glyph are skipped
/// so emoji read as they were written.
#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    let area = buf.area;
    let mut rows = Vec::with_capacity(area.height as usize);
    for y in area.y..area.bottom() {
        let mut row = String::new();
        let mut hidden = 0;
        for x in area.x..area.right() {
            if hidden > 0 {
                hidden -= 1;
                continue;
            }
            let symbol = buf.cell((x, y)).map_or(" ", |c| c.symbol());
            hidden = Span::raw(symbol).width().saturating_sub(1);
            row.push_str(symbol);
        }
        rows.push(row);
    }
    rows.join("\n")
}
