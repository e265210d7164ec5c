use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Notes per date key, as returned by `/get_notes`.
pub type NotesMap = HashMap<String, Vec<String>>;

/// Labels per date key, as returned by `/get_labels`.
pub type LabelsMap = HashMap<String, Label>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Label {
    pub label: String,
    pub color: String,
}

// --- Requests ---

#[derive(Debug, Serialize)]
pub struct SaveNoteRequest<'a> {
    pub date: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct UpdateNoteRequest<'a> {
    pub date: &'a str,
    pub contents: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct DeleteNoteRequest<'a> {
    pub date: &'a str,
    pub note_index: usize,
}

#[derive(Debug, Serialize)]
pub struct DateRequest<'a> {
    pub date: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DateRangeRequest<'a> {
    pub start_date: &'a str,
    pub end_date: &'a str,
}

#[derive(Debug, Serialize)]
pub struct WeekRequest {}

#[derive(Debug, Serialize)]
pub struct MonthRequest {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
pub struct MultipleDatesRequest<'a> {
    pub dates: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct LabelRequest<'a> {
    pub date: &'a str,
    pub label: &'a str,
    pub color: &'a str,
}

#[derive(Debug, Serialize)]
pub struct GoalRequest<'a> {
    pub goal: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QuestionRequest<'a> {
    pub question: &'a str,
}

// --- Responses ---

/// `{status}` envelope returned by every simple mutation.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl StatusResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    pub fn into_result(self) -> Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(PlannerError::Rejected(
                self.error.or(self.message).unwrap_or_default(),
            ))
        }
    }
}

/// Result of any of the bulk-delete endpoints.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DeleteSummary {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub deleted_dates: Vec<String>,
    #[serde(default)]
    pub deleted_notes_count: usize,
    #[serde(default)]
    pub error: Option<String>,
}

impl DeleteSummary {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PlanResponse {
    #[serde(default)]
    pub status: Option<String>,
    /// Activities per date key. Ordered so the plan reads chronologically.
    #[serde(default)]
    pub plan: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Payload of `/analyze_time_allocation`. Unknown fields are kept so an
/// export writes back everything the server sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalyticsReport {
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub chart_data: Vec<CategoryStat>,
    /// date key -> category -> count
    #[serde(default)]
    pub weekly_analysis: HashMap<String, BTreeMap<String, u32>>,
    /// date key -> category -> intensities
    #[serde(default)]
    pub weekly_intensities: HashMap<String, BTreeMap<String, Vec<f64>>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub average_intensity: f64,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub details: Vec<ActivityDetail>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActivityDetail {
    #[serde(default)]
    pub date: String,
    pub activity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub intensity: f64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrendsResponse {
    #[serde(default)]
    pub trends: Vec<TrendDay>,
    #[serde(default)]
    pub period: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TrendDay {
    pub date: String,
    #[serde(default)]
    pub total_activities: u32,
    #[serde(default)]
    pub categories: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct DeadlinesResponse {
    #[serde(default)]
    pub countdowns: Vec<Countdown>,
    #[serde(default)]
    pub statistics: DeadlineStatistics,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Countdown {
    pub date: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub label_color: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub days_remaining: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq)]
pub struct DeadlineStatistics {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub critical: usize,
    #[serde(default)]
    pub urgent: usize,
    #[serde(default)]
    pub high: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn week_request_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(WeekRequest {}).unwrap(), json!({}));
    }

    #[test]
    fn update_request_carries_full_list() {
        let contents = vec!["a".to_string(), "b".to_string()];
        let req = UpdateNoteRequest {
            date: "2024-01-15",
            contents: &contents,
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"date": "2024-01-15", "contents": ["a", "b"]})
        );
    }

    #[test]
    fn delete_note_request_uses_note_index_field() {
        let req = DeleteNoteRequest {
            date: "2024-01-15",
            note_index: 1,
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"date": "2024-01-15", "note_index": 1})
        );
    }

    #[test]
    fn status_response_success() {
        let resp: StatusResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(resp.into_result().is_ok());
    }

    #[test]
    fn status_response_missing_status_is_rejected() {
        let resp: StatusResponse =
            serde_json::from_value(json!({"error": "Label not found"})).unwrap();
        match resp.into_result() {
            Err(PlannerError::Rejected(msg)) => assert_eq!(msg, "Label not found"),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn delete_summary_defaults_for_week_without_notes() {
        let summary: DeleteSummary = serde_json::from_value(json!({
            "status": "success",
            "message": "No notes found for week from 2024-01-15 to 2024-01-21"
        }))
        .unwrap();
        assert!(summary.is_success());
        assert!(summary.deleted_dates.is_empty());
        assert_eq!(summary.deleted_notes_count, 0);
    }

    #[test]
    fn analytics_report_keeps_unknown_fields() {
        let report: AnalyticsReport = serde_json::from_value(json!({
            "total_activities": 2,
            "chart_data": [{
                "category": "study",
                "count": 2,
                "percentage": 100.0,
                "average_intensity": 6.5,
                "color": "#4e79a7",
                "icon": "📚",
                "scale_range": [1, 10],
                "details": [
                    {"date": "2024-01-15", "activity": "Read", "category": "study", "intensity": 5},
                    {"date": "2024-01-16", "activity": "Exam", "category": "study", "intensity": 8}
                ]
            }],
            "weekly_analysis": {},
            "weekly_intensities": {},
            "activity_categories": {"study": {}}
        }))
        .unwrap();
        assert_eq!(report.chart_data[0].details.len(), 2);
        assert!(report.extra.contains_key("activity_categories"));
        assert!(report.chart_data[0].extra.contains_key("scale_range"));

        let back = serde_json::to_value(&report).unwrap();
        assert!(back.get("activity_categories").is_some());
    }

    #[test]
    fn deadlines_response_tolerates_missing_statistics() {
        let resp: DeadlinesResponse = serde_json::from_value(json!({
            "countdowns": [{"date": "2024-01-20", "priority": "critical", "days_remaining": 3}]
        }))
        .unwrap();
        assert_eq!(resp.countdowns.len(), 1);
        assert_eq!(resp.statistics, DeadlineStatistics::default());
    }
}
