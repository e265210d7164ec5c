use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

pub struct StatusBar<'a> {
    pub hints: &'a [(String, &'static str)],
    pub message: Option<&'a str>,
    pub insert_mode: bool,
    /// Right-aligned, e.g. the selected date.
    pub context: Option<&'a str>,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = if self.insert_mode {
            vec![Span::styled(
                " -- INSERT -- Enter saves, Esc leaves ",
                Style::default().fg(Color::Green),
            )]
        } else if let Some(msg) = self.message {
            vec![Span::styled(
                format!(" {} ", msg),
                Style::default().fg(Color::Yellow),
            )]
        } else {
            let mut spans = vec![Span::raw(" ")];
            for (i, (key, action)) in self.hints.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                spans.push(Span::styled(
                    format!("[{}]", key),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::styled(
                    action.to_string(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                ));
            }
            spans
        };

        if let Some(context) = self.context {
            let used: usize = spans.iter().map(|s| s.width()).sum();
            let context = format!("{} ", context);
            let room = (area.width as usize).saturating_sub(used);
            if room > context.chars().count() {
                spans.push(Span::raw(" ".repeat(room - context.chars().count())));
                spans.push(Span::styled(context, Style::default().fg(Color::Gray)));
            }
        }

        Line::from(spans).render(area, buf);
    }
}
