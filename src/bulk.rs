use crate::api::types::DeleteSummary;
use crate::calendar::{is_date_key_format, month_name};
use crate::error::{PlannerError, Result};

/// One of the five bulk-delete operations, with validated inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteScope {
    SingleDate(String),
    DateRange { start: String, end: String },
    CurrentWeek,
    Month { year: i32, month: u32 },
    MultipleDates(Vec<String>),
}

impl DeleteScope {
    pub fn single_date(date: &str) -> Result<Self> {
        let date = date.trim();
        if date.is_empty() {
            return Err(PlannerError::Validation("Please select a date".into()));
        }
        Ok(Self::SingleDate(date.to_string()))
    }

    pub fn date_range(start: &str, end: &str) -> Result<Self> {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() {
            return Err(PlannerError::Validation(
                "Please select both start and end dates".into(),
            ));
        }
        Ok(Self::DateRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    pub fn month(year: &str, month: u32) -> Result<Self> {
        let year: i32 = year
            .trim()
            .parse()
            .map_err(|_| PlannerError::Validation("Please enter a year".into()))?;
        if month_name(month).is_none() {
            return Err(PlannerError::Validation("Please select a month".into()));
        }
        Ok(Self::Month { year, month })
    }

    pub fn multiple_dates(input: &str) -> Result<Self> {
        parse_multiple_dates(input).map(Self::MultipleDates)
    }

    pub fn confirm_text(&self) -> String {
        match self {
            Self::SingleDate(date) => {
                format!("Are you sure you want to delete all notes for {}?", date)
            }
            Self::DateRange { start, end } => format!(
                "Are you sure you want to delete all notes from {} to {}?",
                start, end
            ),
            Self::CurrentWeek => {
                "Are you sure you want to delete all notes for the current week?".to_string()
            }
            Self::Month { year, month } => format!(
                "Are you sure you want to delete all notes for {} {}?",
                month_name(*month).unwrap_or(""),
                year
            ),
            Self::MultipleDates(dates) => format!(
                "Are you sure you want to delete all notes for {} date(s)?",
                dates.len()
            ),
        }
    }

    /// Result text when the request never got a usable response.
    pub fn fallback_error(&self) -> &'static str {
        match self {
            Self::SingleDate(_) => "Error deleting date. Please try again.",
            Self::DateRange { .. } => "Error deleting date range. Please try again.",
            Self::CurrentWeek => "Error deleting current week. Please try again.",
            Self::Month { .. } => "Error deleting month. Please try again.",
            Self::MultipleDates(_) => "Error deleting multiple dates. Please try again.",
        }
    }
}

/// Splits comma-separated input and checks each entry is `YYYY-MM-DD`.
/// The first malformed entry aborts the whole operation.
pub fn parse_multiple_dates(input: &str) -> Result<Vec<String>> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PlannerError::Validation(
            "Please enter dates to delete".into(),
        ));
    }
    let mut dates = Vec::new();
    for entry in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !is_date_key_format(entry) {
            return Err(PlannerError::Validation(format!(
                "Invalid date format: {}. Please use YYYY-MM-DD format.",
                entry
            )));
        }
        dates.push(entry.to_string());
    }
    if dates.is_empty() {
        return Err(PlannerError::Validation(
            "Please enter at least one valid date".into(),
        ));
    }
    Ok(dates)
}

pub fn success_lines(summary: &DeleteSummary) -> Vec<String> {
    let mut lines = vec![format!("✅ {}", summary.message)];
    if !summary.deleted_dates.is_empty() {
        lines.push(String::new());
        lines.push("🗓️ Deleted dates:".to_string());
        lines.extend(summary.deleted_dates.iter().map(|d| format!("   • {}", d)));
        lines.push(String::new());
        lines.push(format!(
            "📊 Total notes deleted: {}",
            summary.deleted_notes_count
        ));
    }
    lines
}

pub fn failure_lines(error: &str) -> Vec<String> {
    let error = if error.trim().is_empty() {
        "Unknown error occurred"
    } else {
        error
    };
    vec![format!("❌ {}", error)]
}
