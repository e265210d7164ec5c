use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

use crate::app::{rows, AppState, ButtonId, FormRow};

use super::form::{heading, row_line};

pub struct AssistantView<'a> {
    pub state: &'a AppState,
}

fn output_lines(text: &str, lines: &mut Vec<Line<'static>>) {
    let style = if text.starts_with("Error") {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    lines.extend(text.lines().map(|l| Line::styled(l.to_string(), style)));
}

impl<'a> Widget for AssistantView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let panel = &state.assistant;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green))
            .title(" AI Assistant ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![heading("Plan My Week")];
        for (i, row) in rows(state).iter().enumerate() {
            lines.push(row_line(state, row, i == state.form_cursor));
            match row {
                FormRow::Button(ButtonId::GeneratePlan) => {
                    output_lines(&panel.plan_text, &mut lines);
                    lines.push(Line::raw(""));
                    lines.push(heading("Ask About Your Schedule"));
                }
                FormRow::Button(ButtonId::AskAi) => output_lines(&panel.answer_text, &mut lines),
                _ => {}
            }
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((panel.scroll, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_helpers::*;
    use crate::app::Tab;
    use crate::ui::buffer_text;

    fn render(state: &AppState) -> String {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        AssistantView { state }.render(area, &mut buf);
        buffer_text(&buf)
    }

    #[test]
    fn shows_both_sections() {
        let state = state_on_tab(Tab::Assistant);
        let text = render(&state);
        assert!(text.contains("Plan My Week"));
        assert!(text.contains("[ Generate Plan ]"));
        assert!(text.contains("Ask About Your Schedule"));
        assert!(text.contains("[ Ask AI ]"));
    }

    #[test]
    fn plan_and_answer_follow_their_buttons() {
        let mut state = state_on_tab(Tab::Assistant);
        state.assistant.plan_text = "📆 Monday, Jan 15:\n   1. Study".into();
        state.assistant.answer_text = "You have 3 notes today.".into();
        let text = render(&state);
        let plan_at = text.find("1. Study").unwrap();
        let ask_heading = text.find("Ask About Your Schedule").unwrap();
        let answer_at = text.find("You have 3 notes today.").unwrap();
        assert!(plan_at < ask_heading);
        assert!(ask_heading < answer_at);
    }

    #[test]
    fn scroll_offsets_output() {
        let mut state = state_on_tab(Tab::Assistant);
        state.assistant.scroll = 1;
        assert!(!render(&state).contains("Plan My Week"));
    }
}
