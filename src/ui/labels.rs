use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::app::{rows, AppState, FormRow};
use crate::labels::NO_LABELS;

use super::form::{heading, row_line};
use super::scroll_to;

pub struct LabelsView<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for LabelsView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Labels ");
        let inner = block.inner(area);
        block.render(area, buf);

        let title = if state.label_form.is_editing() {
            "Edit Label"
        } else {
            "Create Label"
        };
        let mut lines = vec![heading(title)];
        let mut focus_line = 0;
        let mut listed = false;

        for (i, row) in rows(state).iter().enumerate() {
            if matches!(row, FormRow::LabelItem(_)) && !listed {
                push_list_heading(state, &mut lines);
                listed = true;
            }
            let focused = i == state.form_cursor;
            if focused {
                focus_line = lines.len();
            }
            lines.push(row_line(state, row, focused));
        }

        if !listed {
            push_list_heading(state, &mut lines);
            lines.push(Line::styled(NO_LABELS, Style::default().fg(Color::DarkGray)));
        }

        Paragraph::new(lines)
            .scroll((scroll_to(focus_line, inner.height), 0))
            .render(inner, buf);
    }
}

fn push_list_heading(state: &AppState, lines: &mut Vec<Line<'static>>) {
    if let Some(result) = &state.label_result {
        lines.push(Line::styled(result.text.clone(), Style::default().fg(Color::Green)));
    }
    lines.push(Line::raw(""));
    lines.push(heading(&format!("Your labels ({})", state.labels.len())));
}
