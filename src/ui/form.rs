use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::app::{button_text, AppState, FormRow, InputMode, InputTarget};
use crate::calendar::{format_short_date, month_name, parse_date_key};
use crate::labels::TEMPLATES;

use super::{edit_spans, hex_color};

fn swatch(color: &str) -> Span<'static> {
    let fg = hex_color(color).unwrap_or(Color::Gray);
    Span::styled("■ ", Style::default().fg(fg))
}

/// One focusable form row as a single line.
pub fn row_line(state: &AppState, row: &FormRow, focused: bool) -> Line<'static> {
    let text_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![Span::styled(
        if focused { "▸ " } else { "  " },
        Style::default().fg(Color::Cyan),
    )];

    match row {
        FormRow::Field(id) => {
            spans.push(Span::styled(
                format!("{}: ", id.title()),
                Style::default().fg(Color::Gray),
            ));
            match &state.input_mode {
                InputMode::Insert {
                    buffer,
                    target: InputTarget::Field(editing),
                } if editing == id => {
                    spans.extend(edit_spans(buffer, Style::default().fg(Color::Green)));
                }
                _ => {
                    let value = state.field(*id);
                    if value.is_empty() {
                        spans.push(Span::styled(
                            "(empty)",
                            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                        ));
                    } else {
                        spans.push(Span::styled(value.to_string(), text_style));
                    }
                }
            }
        }
        FormRow::TemplatePicker => {
            let template = &TEMPLATES[state.template_index % TEMPLATES.len()];
            spans.push(Span::styled("Template: ", Style::default().fg(Color::Gray)));
            spans.push(swatch(template.color));
            spans.push(Span::styled(format!("◀ {} ▶", template.label), text_style));
        }
        FormRow::MonthPicker => {
            spans.push(Span::styled("Month: ", Style::default().fg(Color::Gray)));
            let name = month_name(state.bulk.month).unwrap_or("?");
            spans.push(Span::styled(format!("◀ {} ▶", name), text_style));
        }
        FormRow::Button(id) => {
            let style = if focused {
                text_style.add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan)
            };
            spans.push(Span::styled(format!("[ {} ]", button_text(state, *id)), style));
        }
        FormRow::LabelItem(date) => {
            if let Some(label) = state.labels.get(date) {
                spans.push(swatch(&label.color));
                spans.push(Span::styled(label.label.clone(), text_style));
                let shown = parse_date_key(date).map_or_else(|| date.clone(), format_short_date);
                spans.push(Span::styled(
                    format!("  {}  {}", shown, date),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }
    }
    Line::from(spans)
}

pub fn heading(text: &str) -> Line<'static> {
    Line::styled(
        text.to_string(),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )
}
