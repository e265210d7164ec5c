use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::calendar::WeekDay;
use crate::edit_buffer::EditBuffer;

use super::{edit_spans, scroll_to, wrap_text};

const EMPTY_NOTES: &str = "No notes for this date";

/// Notes of the selected date plus the new-note draft line.
pub struct NotesPanel<'a> {
    pub date_display: &'a str,
    pub notes: &'a [String],
    pub cursor: usize,
    pub draft: &'a str,
    pub draft_edit: Option<&'a EditBuffer>,
}

impl<'a> Widget for NotesPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Notes ");
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let mut lines = vec![
            Line::styled(
                self.date_display.to_string(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Line::raw(""),
        ];

        let mut cursor_line = 0;
        if self.notes.is_empty() {
            lines.push(Line::styled(EMPTY_NOTES, Style::default().fg(Color::DarkGray)));
        }
        let text_width = (inner.width as usize).saturating_sub(2);
        for (i, note) in self.notes.iter().enumerate() {
            let focused = i == self.cursor;
            if focused {
                cursor_line = lines.len();
            }
            let (marker, style) = if focused {
                ("▸ ", Style::default().fg(Color::Black).bg(Color::Cyan))
            } else {
                ("• ", Style::default().fg(Color::White))
            };
            for (j, part) in wrap_text(note, text_width).into_iter().enumerate() {
                let prefix = if j == 0 { marker } else { "  " };
                lines.push(Line::from(vec![
                    Span::styled(prefix, Style::default().fg(Color::Cyan)),
                    Span::styled(part, style),
                ]));
            }
        }

        lines.push(Line::raw(""));
        lines.push(Line::styled("New note:", Style::default().fg(Color::Gray)));
        let draft_line = match self.draft_edit {
            Some(buffer) => {
                cursor_line = lines.len();
                Line::from(edit_spans(buffer, Style::default().fg(Color::Green)))
            }
            None if self.draft.is_empty() => Line::styled(
                "(press a to write)",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
            None => Line::raw(self.draft.to_string()),
        };
        lines.push(draft_line);

        Paragraph::new(lines)
            .scroll((scroll_to(cursor_line, inner.height), 0))
            .render(inner, buf);
    }
}

/// The seven days starting today with their note counts.
pub struct WeekOverview<'a> {
    pub days: &'a [WeekDay],
}

impl<'a> Widget for WeekOverview<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" This Week ");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = self
            .days
            .iter()
            .map(|day| {
                let style = if day.today {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                let count_style = if day.note_count > 0 {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Line::from(vec![
                    Span::styled(format!("{} {:>2}", day.weekday, day.day), style),
                    Span::raw("  "),
                    Span::styled(day.count_text(), count_style),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}
