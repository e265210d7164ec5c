use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::NoteModal;
use crate::error::ErrorPopup;

use super::{edit_spans, wrap_text};

const CLOSE_HINT: &str = "Press any key to close";

/// Centered popup of `percent` width (at least 30 columns) and `height` rows
/// including borders, clamped to `area`.
fn popup_rect(area: Rect, percent: u16, height: usize) -> Rect {
    let width = (area.width * percent / 100).max(30).min(area.width);
    let height = (height as u16).min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn draw(frame: &mut Frame, rect: Rect, title: String, border: Color, lines: Vec<Line<'static>>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .title(title);
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn footer(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

pub fn render_help_popup(frame: &mut Frame, entries: &[(String, &'static str)], area: Rect) {
    let rect = popup_rect(area, 60, entries.len() + 3);
    let mut lines: Vec<Line<'static>> = entries
        .iter()
        .take((rect.height as usize).saturating_sub(3))
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:>12}", key), Style::default().fg(Color::Yellow)),
                Span::raw("  "),
                Span::styled(*action, Style::default().fg(Color::White)),
            ])
        })
        .collect();
    lines.push(footer(CLOSE_HINT));
    draw(frame, rect, " Help ".into(), Color::Cyan, lines);
}

pub fn render_error_popup(frame: &mut Frame, popup: &ErrorPopup, area: Rect) {
    let probe = popup_rect(area, 50, 0);
    let message = wrap_text(&popup.message, probe.width.saturating_sub(2) as usize);

    let mut lines = vec![Line::raw("")];
    lines.extend(
        message
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::White))),
    );
    lines.push(Line::raw(""));
    if !popup.hint.is_empty() {
        lines.push(footer(&popup.hint));
        lines.push(Line::raw(""));
    }
    lines.push(footer(CLOSE_HINT));

    let rect = popup_rect(area, 50, lines.len() + 2);
    draw(frame, rect, format!(" ! {} ", popup.title), Color::Red, lines);
}

pub fn render_confirm_popup(frame: &mut Frame, message: &str, area: Rect) {
    let probe = popup_rect(area, 50, 0);
    let mut lines = vec![Line::raw("")];
    lines.extend(
        wrap_text(message, probe.width.saturating_sub(2) as usize)
            .into_iter()
            .map(|l| Line::styled(l, Style::default().fg(Color::White))),
    );
    lines.push(Line::raw(""));
    lines.push(footer("y/Enter confirm · n/Esc cancel"));

    let rect = popup_rect(area, 50, lines.len() + 2);
    draw(frame, rect, " Confirm ".into(), Color::Yellow, lines);
}

pub fn render_note_modal(frame: &mut Frame, modal: &NoteModal, area: Rect) {
    let mut lines = vec![
        Line::styled(modal.date.clone(), Style::default().fg(Color::Gray)),
        Line::raw(""),
        Line::from(edit_spans(&modal.buffer, Style::default().fg(Color::Green))),
        Line::raw(""),
    ];
    lines.push(if modal.saving {
        Line::styled(
            "Saving...",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        )
    } else {
        footer("Enter save · Esc cancel")
    });

    let rect = popup_rect(area, 60, lines.len() + 2);
    draw(frame, rect, " Edit Note ".into(), Color::Cyan, lines);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit_buffer::EditBuffer;
    use crate::ui::buffer_text;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw_with(f: impl FnOnce(&mut Frame, Rect)) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                f(frame, area)
            })
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn popup_rect_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 20);
        assert_eq!(popup_rect(area, 50, 6), Rect::new(25, 7, 50, 6));
        assert_eq!(popup_rect(Rect::new(0, 0, 20, 4), 50, 10), Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn help_lists_entries() {
        let entries = vec![("j".to_string(), "down"), ("q".to_string(), "quit")];
        let text = draw_with(|f, area| render_help_popup(f, &entries, area));
        assert!(text.contains("Help"));
        assert!(text.contains("j  down"));
        assert!(text.contains(CLOSE_HINT));
    }

    #[test]
    fn error_shows_title_message_and_hint() {
        let popup = ErrorPopup {
            title: "Failed to Save Note".into(),
            message: "Server unavailable".into(),
            hint: "Nothing was changed".into(),
        };
        let text = draw_with(|f, area| render_error_popup(f, &popup, area));
        assert!(text.contains("! Failed to Save Note"));
        assert!(text.contains("Server unavailable"));
        assert!(text.contains("Nothing was changed"));
    }

    #[test]
    fn confirm_shows_prompt() {
        let text = draw_with(|f, area| render_confirm_popup(f, "Delete this note?", area));
        assert!(text.contains("Confirm"));
        assert!(text.contains("Delete this note?"));
        assert!(text.contains("n/Esc cancel"));
    }

    #[test]
    fn note_modal_shows_buffer_and_saving() {
        let mut modal = NoteModal {
            date: "2024-01-15".into(),
            index: 0,
            buffer: EditBuffer::new("Study chapter 5"),
            saving: false,
        };
        let text = draw_with(|f, area| render_note_modal(f, &modal, area));
        assert!(text.contains("Edit Note"));
        assert!(text.contains("Study chapter 5"));
        assert!(text.contains("Enter save"));

        modal.saving = true;
        let text = draw_with(|f, area| render_note_modal(f, &modal, area));
        assert!(text.contains("Saving..."));
    }
}
