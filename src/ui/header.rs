use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::Tab;

pub struct Header<'a> {
    pub active: Tab,
    pub date: &'a str,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Style::default().bg(Color::DarkGray);
        let mut spans = vec![Span::styled(
            " planner ",
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )];

        for (i, tab) in Tab::ALL.iter().enumerate() {
            let style = if *tab == self.active {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray).bg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, tab.title()), style));
        }

        let used: usize = spans.iter().map(|s| s.width()).sum();
        let date_width = self.date.chars().count() + 1;
        let spacer_len = (area.width as usize).saturating_sub(used + date_width);
        spans.push(Span::styled(" ".repeat(spacer_len), bg));
        spans.push(Span::styled(
            format!("{} ", self.date),
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ));

        Line::from(spans).render(area, buf);
    }
}
