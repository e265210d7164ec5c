//! Paths of the planner backend, relative to the configured base URL.

pub const GET_NOTES: &str = "/get_notes";
pub const SAVE_NOTE: &str = "/save_note";
pub const UPDATE_NOTE: &str = "/update_note";
pub const DELETE_NOTE: &str = "/delete_note";

pub const DELETE_ALL_NOTES: &str = "/delete_all_notes";
pub const DELETE_DATE_RANGE: &str = "/delete_date_range";
pub const DELETE_WEEK: &str = "/delete_week";
pub const DELETE_MONTH: &str = "/delete_month";
pub const DELETE_MULTIPLE_DATES: &str = "/delete_multiple_dates";

pub const GET_LABELS: &str = "/get_labels";
pub const SAVE_LABEL: &str = "/save_label";
pub const UPDATE_LABEL: &str = "/update_label";
pub const DELETE_LABEL: &str = "/delete_label";

pub const GENERATE_PLAN: &str = "/generate_plan";
pub const ASK_AI: &str = "/ask_ai";

pub const ANALYZE_TIME_ALLOCATION: &str = "/analyze_time_allocation";
pub const GET_ACTIVITY_TRENDS: &str = "/get_activity_trends";
pub const GET_LABELED_DEADLINES: &str = "/get_labeled_deadlines";

/// Joins a base URL and an endpoint path without doubling the slash.
pub fn url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
