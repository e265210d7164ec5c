use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

use crate::analytics::{
    bar_rows, capitalize, confidence, insights, intensity_description, summary_stats,
    trend_summary, weekly_breakdown, DETAIL_ACTIVITIES, SAMPLE_ACTIVITIES,
};
use crate::api::types::{AnalyticsReport, TrendsResponse};
use crate::app::{rows, AppState};

use super::form::{heading, row_line};
use super::hex_color;

const BAR_WIDTH: usize = 24;

pub struct AnalyticsView<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for AnalyticsView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let panel = &state.analytics;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Time Allocation Analytics ");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line<'static>> = rows(state)
            .iter()
            .enumerate()
            .map(|(i, row)| row_line(state, row, i == state.form_cursor))
            .collect();

        if let Some(result) = &panel.result {
            let color = if result.text.starts_with('✅') {
                Color::Green
            } else {
                Color::Red
            };
            lines.push(Line::styled(result.text.clone(), Style::default().fg(color)));
        }
        if panel.loading {
            lines.push(Line::styled(
                "Analyzing your activities...",
                Style::default().fg(Color::Yellow),
            ));
        }

        if let Some(report) = &panel.report {
            report_lines(report, state, &mut lines);
        }
        if let Some(trends) = &panel.trends {
            trend_lines(trends, &mut lines);
        }

        Paragraph::new(lines)
            .scroll((panel.scroll, 0))
            .render(inner, buf);
    }
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn report_lines(report: &AnalyticsReport, state: &AppState, lines: &mut Vec<Line<'static>>) {
    let stats = summary_stats(report);
    lines.push(Line::raw(""));
    lines.push(heading("Summary"));
    lines.push(Line::raw(format!(
        "Total activities: {}   Categories: {}   Most active: {}   Avg intensity: {}",
        stats.total_activities, stats.categories, stats.most_active, stats.average_intensity
    )));

    lines.push(Line::raw(""));
    lines.push(heading("Activity Distribution"));
    for row in bar_rows(&report.chart_data) {
        let color = hex_color(&row.color).unwrap_or(Color::Cyan);
        let filled = (row.ratio * BAR_WIDTH as f64).round() as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("{} {:<10} ", row.icon, capitalize(&row.category))),
            Span::styled("█".repeat(filled), Style::default().fg(color)),
            Span::styled("░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)), dim()),
            Span::raw(format!(
                " {} ({}%)  intensity {}/10",
                row.count, row.percentage, row.average_intensity
            )),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Categories"));
    for stat in &report.chart_data {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {}", stat.icon, capitalize(&stat.category)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}% confidence", confidence(stat)), dim()),
        ]));
        lines.push(Line::raw(format!(
            "  {} activities · avg intensity {}/10 · {}",
            stat.count,
            stat.average_intensity,
            intensity_description(&stat.category, stat.average_intensity)
        )));
        for detail in stat.details.iter().take(SAMPLE_ACTIVITIES) {
            lines.push(Line::styled(format!("    - {}", detail.activity), dim()));
        }
    }

    lines.push(Line::raw(""));
    lines.push(heading("Activity Details"));
    for stat in &report.chart_data {
        lines.push(Line::raw(format!("{} {}", stat.icon, capitalize(&stat.category))));
        for detail in stat.details.iter().take(DETAIL_ACTIVITIES) {
            lines.push(Line::raw(format!(
                "  {}  {}  ({}/10)",
                detail.date, detail.activity, detail.intensity
            )));
        }
        if stat.details.len() > DETAIL_ACTIVITIES {
            lines.push(Line::styled(
                format!("  +{} more", stat.details.len() - DETAIL_ACTIVITIES),
                dim(),
            ));
        }
    }

    lines.push(Line::raw(""));
    lines.push(heading("This Week"));
    for day in weekly_breakdown(report, state.today) {
        let mut spans = vec![Span::styled(
            format!("{} {:>3}  ", day.weekday, day.total),
            Style::default().fg(Color::Cyan),
        )];
        if day.categories.is_empty() {
            spans.push(Span::styled("-", dim()));
        }
        for cat in &day.categories {
            spans.push(Span::raw(format!(
                "{} {} ({:.1})  ",
                capitalize(&cat.category),
                cat.count,
                cat.average_intensity
            )));
        }
        lines.push(Line::from(spans));
    }

    let found = insights(report);
    if !found.is_empty() {
        lines.push(Line::raw(""));
        lines.push(heading("Insights"));
        for insight in found {
            lines.push(Line::styled(
                format!("💡 {}", insight.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::raw(format!("   {}", insight.text)));
        }
    }
}

fn trend_lines(trends: &TrendsResponse, lines: &mut Vec<Line<'static>>) {
    let summary = trend_summary(&trends.trends);
    lines.push(Line::raw(""));
    lines.push(heading("Activity Trends"));
    let period = trends.period.as_deref().unwrap_or("recent days");
    lines.push(Line::raw(format!("{} days of data ({})", summary.days, period)));
    match summary.busiest {
        Some((date, total)) => {
            lines.push(Line::raw(format!("Busiest day: {} with {} activities", date, total)))
        }
        None => lines.push(Line::styled("No activity recorded", dim())),
    }
}
