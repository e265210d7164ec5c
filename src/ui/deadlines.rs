use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap};

use crate::calendar::{format_short_date, parse_date_key};
use crate::deadlines::{
    days_text, priority_icon, summary_chips, DeadlineView, LOAD_FAILED, LOAD_FAILED_HINT,
    NO_DEADLINES, NO_DEADLINES_HINT,
};

use super::hex_color;

pub struct DeadlinePanel<'a> {
    pub view: &'a DeadlineView,
}

fn days_color(days: i64) -> Color {
    match days {
        d if d <= 1 => Color::Red,
        d if d <= 7 => Color::Yellow,
        _ => Color::Green,
    }
}

impl<'a> Widget for DeadlinePanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" ⏰ Upcoming Deadlines ");
        let inner = block.inner(area);
        block.render(area, buf);

        let notice = |title: &str, hint: &str| {
            vec![
                Line::raw(""),
                Line::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)),
                Line::styled(hint.to_string(), Style::default().fg(Color::DarkGray)),
            ]
        };

        let lines = match self.view {
            DeadlineView::Loading => vec![Line::styled(
                "Loading deadlines...",
                Style::default().fg(Color::DarkGray),
            )],
            DeadlineView::Empty => notice(NO_DEADLINES, NO_DEADLINES_HINT),
            DeadlineView::Failed => notice(LOAD_FAILED, LOAD_FAILED_HINT),
            DeadlineView::Loaded { items, statistics } => {
                let mut lines = vec![Line::styled(
                    summary_chips(statistics).join("  "),
                    Style::default().fg(Color::Gray),
                )];
                for item in items {
                    let label_color = hex_color(&item.label_color).unwrap_or(Color::White);
                    let date = parse_date_key(&item.date)
                        .map_or_else(|| item.date.clone(), format_short_date);
                    lines.push(Line::raw(""));
                    lines.push(Line::from(vec![
                        Span::raw(format!("{} ", priority_icon(&item.priority))),
                        Span::styled(
                            item.label.clone(),
                            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!("  {}", date), Style::default().fg(Color::Gray)),
                    ]));
                    if !item.activity.is_empty() {
                        lines.push(Line::raw(format!("   {}", item.activity)));
                    }
                    lines.push(Line::styled(
                        format!("   {}", days_text(item.days_remaining)),
                        Style::default()
                            .fg(days_color(item.days_remaining))
                            .add_modifier(Modifier::BOLD),
                    ));
                }
                lines
            }
        };

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
