use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::calendar::GridCell;

use super::hex_color;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const ROWS: u16 = 6;

pub struct CalendarGrid<'a> {
    pub title: String,
    pub cells: &'a [GridCell],
    pub cursor: usize,
}

impl<'a> Widget for CalendarGrid<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!(" {} ", self.title));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 7 || inner.height < 2 {
            return;
        }

        let col_w = inner.width / 7;
        for (i, name) in WEEKDAYS.iter().enumerate() {
            let x = inner.x + i as u16 * col_w;
            Line::styled(*name, Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD))
                .render(Rect::new(x, inner.y, col_w, 1), buf);
        }

        let row_h = ((inner.height - 1) / ROWS).max(1);
        for (i, cell) in self.cells.iter().enumerate() {
            let row = i as u16 / 7;
            let col = i as u16 % 7;
            let y = inner.y + 1 + row * row_h;
            if y >= inner.bottom() {
                break;
            }
            let h = row_h.min(inner.bottom() - y);
            let cell_area = Rect::new(inner.x + col * col_w, y, col_w, h);
            render_cell(cell, i == self.cursor, cell_area, buf);
        }
    }
}

fn render_cell(cell: &GridCell, focused: bool, area: Rect, buf: &mut Buffer) {
    let mut base = Style::default();
    if cell.selected {
        base = base.bg(Color::Blue);
    } else if let Some(bg) = cell.label.as_ref().and_then(|l| hex_color(&l.background)) {
        base = base.bg(bg);
    }
    buf.set_style(area, base);

    let mut day_style = base;
    if cell.today {
        day_style = day_style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
    } else if cell.other_month {
        day_style = day_style.fg(Color::DarkGray);
    }
    if focused {
        day_style = day_style.add_modifier(Modifier::REVERSED);
    }

    let mut lines = vec![Line::from(Span::styled(format!("{:>2}", cell.day), day_style))];
    if let Some(label) = &cell.label {
        let fg = hex_color(&label.color).unwrap_or(Color::White);
        lines.push(Line::from(Span::styled(
            label.text.clone(),
            base.fg(fg).add_modifier(Modifier::BOLD),
        )));
    }
    let note_style = if cell.other_month {
        base.fg(Color::DarkGray)
    } else {
        base.fg(Color::White)
    };
    for preview in &cell.previews {
        lines.push(Line::from(Span::styled(preview.clone(), note_style)));
    }
    if let Some(more) = cell.more {
        lines.push(Line::from(Span::styled(
            format!("+{} more", more),
            base.fg(Color::Gray).add_modifier(Modifier::ITALIC),
        )));
    }

    for (i, line) in lines.into_iter().take(area.height as usize).enumerate() {
        line.render(Rect::new(area.x, area.y + i as u16, area.width, 1), buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Label, LabelsMap, NotesMap};
    use crate::calendar::{month_grid, YearMonth};
    use crate::ui::buffer_text;
    use chrono::NaiveDate;

    fn grid(selected: Option<&str>) -> Vec<GridCell> {
        let mut notes = NotesMap::new();
        notes.insert(
            "2024-01-15".into(),
            vec!["one".into(), "two".into(), "three".into()],
        );
        let mut labels = LabelsMap::new();
        labels.insert(
            "2024-01-20".into(),
            Label {
                label: "Exam".into(),
                color: "#dc3545".into(),
            },
        );
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        month_grid(YearMonth::new(2024, 1), today, selected, &notes, &labels)
    }

    fn render(widget: CalendarGrid, width: u16, height: u16) -> Buffer {
        let area = Rect::new(0, 0, width, height);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buf
    }

    #[test]
    fn shows_title_weekdays_and_content() {
        let cells = grid(None);
        let buf = render(
            CalendarGrid {
                title: "January 2024".into(),
                cells: &cells,
                cursor: 0,
            },
            86,
            32,
        );
        let text = buffer_text(&buf);
        assert!(text.contains("January 2024"));
        assert!(text.contains("Sun"));
        assert!(text.contains("Sat"));
        assert!(text.contains("Exam"));
        assert!(text.contains("one"));
        assert!(text.contains("+1 more"));
        assert!(!text.contains("three"));
    }

    #[test]
    fn selected_cell_has_blue_background() {
        let cells = grid(Some("2024-01-15"));
        let idx = cells.iter().position(|c| c.selected).unwrap();
        let buf = render(
            CalendarGrid {
                title: "January 2024".into(),
                cells: &cells,
                cursor: 0,
            },
            86,
            32,
        );
        // 84 inner columns, 12 per day; 30 inner rows, 4 + header per week
        let x = 1 + (idx as u16 % 7) * 12 + 5;
        let y = 2 + (idx as u16 / 7) * 4 + 3;
        assert_eq!(buf.cell((x, y)).unwrap().bg, Color::Blue);
    }

    #[test]
    fn cursor_cell_is_reversed() {
        let cells = grid(None);
        let buf = render(
            CalendarGrid {
                title: "January 2024".into(),
                cells: &cells,
                cursor: 3,
            },
            86,
            32,
        );
        let x = 1 + 3 * 12 + 1;
        let cell = buf.cell((x, 2)).unwrap();
        assert!(cell.modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn tiny_area_does_not_panic() {
        let cells = grid(None);
        render(
            CalendarGrid {
                title: "January 2024".into(),
                cells: &cells,
                cursor: 0,
            },
            6,
            3,
        );
    }
}
