use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::app::{rows, AppState, ButtonId, FieldId, FormRow};
use crate::calendar::{current_week_span, format_short_date};

use super::form::{heading, row_line};
use super::scroll_to;

pub struct BulkView<'a> {
    pub state: &'a AppState,
}

/// Section heading shown above the row that opens it.
fn section(state: &AppState, row: &FormRow) -> Option<String> {
    match row {
        FormRow::Field(FieldId::BulkSingleDate) => Some("Delete by Date".into()),
        FormRow::Field(FieldId::BulkRangeStart) => Some("Delete Date Range".into()),
        FormRow::Button(ButtonId::DeleteWeek) => {
            let (monday, sunday) = current_week_span(state.today);
            Some(format!(
                "Delete Current Week ({} to {})",
                format_short_date(monday),
                format_short_date(sunday)
            ))
        }
        FormRow::MonthPicker => Some("Delete Month".into()),
        FormRow::Field(FieldId::BulkMultipleDates) => Some("Delete Multiple Dates".into()),
        _ => None,
    }
}

impl<'a> Widget for BulkView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" Bulk Delete ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        let mut focus_line = 0;
        for (i, row) in rows(state).iter().enumerate() {
            if let Some(title) = section(state, row) {
                if !lines.is_empty() {
                    lines.push(Line::raw(""));
                }
                lines.push(heading(&title));
            }
            let focused = i == state.form_cursor;
            if focused {
                focus_line = lines.len();
            }
            lines.push(row_line(state, row, focused));
        }

        if !state.bulk.result.is_empty() {
            lines.push(Line::raw(""));
            let ok = state.bulk.result.first().is_some_and(|l| l.starts_with('✅'));
            let color = if ok { Color::Green } else { Color::Red };
            for text in &state.bulk.result {
                lines.push(Line::styled(text.clone(), Style::default().fg(color)));
            }
        }

        Paragraph::new(lines)
            .scroll((scroll_to(focus_line, inner.height), 0))
            .render(inner, buf);
    }
}
