use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::api::types::{AnalyticsReport, CategoryStat, TrendDay};
use crate::calendar::{current_week_span, date_key};
use crate::error::Result;

pub const ANALYSIS_DONE: &str = "✅ Time allocation analysis completed!";
pub const ANALYSIS_FAILED: &str = "❌ Error analyzing time allocation. Please try again.";
pub const TRENDS_LOADED: &str = "✅ Activity trends loaded!";
pub const TRENDS_FAILED: &str = "❌ Error loading trends. Please try again.";
pub const EXPORT_DONE: &str = "✅ Data exported successfully!";
pub const EXPORT_NOTHING: &str = "❌ No data to export. Please run analysis first.";

const BASE_CONFIDENCE: f64 = 85.0;
const MAX_PENALTY: f64 = 15.0;
const DEFAULT_DAY_INTENSITY: f64 = 5.0;

pub const SAMPLE_ACTIVITIES: usize = 3;
pub const DETAIL_ACTIVITIES: usize = 5;

/// Population standard deviation; 0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Categorisation confidence in percent. Consistent intensities score higher.
pub fn confidence(stat: &CategoryStat) -> u32 {
    let intensities: Vec<f64> = stat.details.iter().map(|d| d.intensity).collect();
    let penalty = (std_dev(&intensities) * 2.0).min(MAX_PENALTY);
    (BASE_CONFIDENCE - penalty).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityBand {
    Low,
    Medium,
    High,
}

impl IntensityBand {
    pub fn of(intensity: f64) -> Self {
        if intensity <= 3.0 {
            Self::Low
        } else if intensity <= 7.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

pub fn intensity_description(category: &str, intensity: f64) -> &'static str {
    use IntensityBand::*;
    match (category, IntensityBand::of(intensity)) {
        ("study", Low) => "Light reading, casual learning",
        ("study", Medium) => "Regular studying, homework",
        ("study", High) => "Intensive studying, exam prep",
        ("exercise", Low) => "Light walking, stretching",
        ("exercise", Medium) => "Regular workouts, moderate exercise",
        ("exercise", High) => "Intense workouts, sports games",
        ("rest", Low) => "Light relaxation, short breaks",
        ("rest", Medium) => "Regular rest, leisure activities",
        ("rest", High) => "Deep relaxation, meditation",
        (_, Low) => "Light effort",
        (_, Medium) => "Moderate effort",
        (_, High) => "High effort",
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_activities: u32,
    pub categories: usize,
    pub most_active: String,
    /// Mean of the per-category averages, one decimal.
    pub average_intensity: String,
}

/// The server orders `chart_data` by count, so the first entry is the most
/// active category.
pub fn summary_stats(report: &AnalyticsReport) -> SummaryStats {
    SummaryStats {
        total_activities: report.total_activities,
        categories: report.chart_data.len(),
        most_active: report
            .chart_data
            .first()
            .map(|c| capitalize(&c.category))
            .unwrap_or_else(|| "N/A".to_string()),
        average_intensity: match mean_average_intensity(&report.chart_data) {
            Some(avg) => format!("{:.1}", avg),
            None => "0".to_string(),
        },
    }
}

fn mean_average_intensity(chart: &[CategoryStat]) -> Option<f64> {
    if chart.is_empty() {
        return None;
    }
    Some(chart.iter().map(|c| c.average_intensity).sum::<f64>() / chart.len() as f64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarRow {
    pub category: String,
    pub icon: String,
    pub color: String,
    pub count: u32,
    pub percentage: f64,
    /// count / max count, 0..=1
    pub ratio: f64,
    pub average_intensity: f64,
}

pub fn bar_rows(chart: &[CategoryStat]) -> Vec<BarRow> {
    let max = chart.iter().map(|c| c.count).max().unwrap_or(0);
    chart
        .iter()
        .map(|c| BarRow {
            category: c.category.clone(),
            icon: c.icon.clone(),
            color: c.color.clone(),
            count: c.count,
            percentage: c.percentage,
            ratio: if max == 0 {
                0.0
            } else {
                c.count as f64 / max as f64
            },
            average_intensity: c.average_intensity,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCategory {
    pub category: String,
    pub count: u32,
    pub average_intensity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayBreakdown {
    pub weekday: &'static str,
    pub key: String,
    pub total: u32,
    pub categories: Vec<DayCategory>,
}

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Monday..Sunday of the week containing `today`.
pub fn weekly_breakdown(report: &AnalyticsReport, today: NaiveDate) -> Vec<WeekdayBreakdown> {
    let (monday, _) = current_week_span(today);
    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, &weekday)| {
            let key = date_key(monday + Duration::days(i as i64));
            let counts = report.weekly_analysis.get(&key);
            let intensities = report.weekly_intensities.get(&key);
            let categories: Vec<DayCategory> = counts
                .into_iter()
                .flatten()
                .filter(|(_, count)| **count > 0)
                .map(|(category, count)| {
                    let values = intensities
                        .and_then(|m| m.get(category))
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    let average_intensity = if values.is_empty() {
                        DEFAULT_DAY_INTENSITY
                    } else {
                        values.iter().sum::<f64>() / values.len() as f64
                    };
                    DayCategory {
                        category: category.clone(),
                        count: *count,
                        average_intensity,
                    }
                })
                .collect();
            WeekdayBreakdown {
                weekday,
                total: counts.map_or(0, |m| m.values().sum()),
                categories,
                key,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Insight {
    pub title: &'static str,
    pub text: String,
}

pub fn insights(report: &AnalyticsReport) -> Vec<Insight> {
    let chart = &report.chart_data;
    let Some(most_active) = chart.first() else {
        return Vec::new();
    };

    let mut out = vec![Insight {
        title: "Most Active Category",
        text: format!(
            "AI identified {} as your most active category ({}% of activities) with average intensity of {}/10.",
            most_active.category, most_active.percentage, most_active.average_intensity
        ),
    }];

    if let Some(avg) = mean_average_intensity(chart) {
        if avg > 7.0 {
            out.push(Insight {
                title: "High Intensity Schedule",
                text: "Your activities have high average intensity. Consider adding more low-intensity activities for better balance.".into(),
            });
        } else if avg < 4.0 {
            out.push(Insight {
                title: "Low Intensity Schedule",
                text: "Your activities have low average intensity. Consider adding some challenging activities to maintain engagement.".into(),
            });
        }
    }

    let find = |name: &str| chart.iter().find(|c| c.category == name);

    if let (Some(study), Some(rest)) = (find("study"), find("rest")) {
        if study.average_intensity > 7.0 && rest.average_intensity < 5.0 {
            out.push(Insight {
                title: "Study-Rest Balance",
                text: "High study intensity with low rest quality. Consider improving rest quality to maintain productivity.".into(),
            });
        }
    }

    if let Some(exercise) = find("exercise") {
        if exercise.average_intensity < 5.0 {
            out.push(Insight {
                title: "Exercise Intensity",
                text: "Consider increasing exercise intensity for better fitness benefits.".into(),
            });
        } else if exercise.average_intensity > 8.0 {
            out.push(Insight {
                title: "High Exercise Intensity",
                text: "Great job maintaining high exercise intensity! Make sure to include adequate recovery.".into(),
            });
        }
    }

    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendSummary {
    pub days: usize,
    pub busiest: Option<(String, u32)>,
}

pub fn trend_summary(trends: &[TrendDay]) -> TrendSummary {
    let busiest = trends
        .iter()
        .filter(|t| t.total_activities > 0)
        // first of equals wins
        .fold(None::<&TrendDay>, |best, t| match best {
            Some(b) if b.total_activities >= t.total_activities => Some(b),
            _ => Some(t),
        })
        .map(|t| (t.date.clone(), t.total_activities));
    TrendSummary {
        days: trends.len(),
        busiest,
    }
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("time_allocation_analysis_{}.json", date_key(today))
}

/// Writes the report as pretty JSON into `dir`, returning the written path.
pub fn export_report(report: &AnalyticsReport, dir: &Path, today: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(today));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}
