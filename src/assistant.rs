use std::collections::BTreeMap;

use crate::calendar::{format_plan_date, parse_date_key};
use crate::error::{PlannerError, Result};

pub const PLAN_WAITING: &str = "Generating plan with AI... Please wait.";
pub const ASK_WAITING: &str = "AI is analyzing your schedule... Please wait.";
pub const PLAN_FAILED: &str = "Error generating plan. Please try again.";
pub const ASK_FAILED: &str = "Error getting AI response. Please try again.";

pub fn validate_goal(goal: &str) -> Result<String> {
    non_blank(goal, "Please enter a planning goal")
}

pub fn validate_question(question: &str) -> Result<String> {
    non_blank(question, "Please enter a question")
}

fn non_blank(input: &str, alert: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::Validation(alert.to_string()));
    }
    Ok(trimmed.to_string())
}

/// Plan text with one `📆` heading per day and numbered activities.
pub fn format_plan(plan: &BTreeMap<String, Vec<String>>) -> String {
    let mut out = String::from("✅ AI Plan Generated Successfully!\n\n");
    out.push_str("📅 Weekly Schedule:\n");
    out.push_str("==================\n\n");
    for (date, activities) in plan {
        let heading = parse_date_key(date)
            .map(format_plan_date)
            .unwrap_or_else(|| date.clone());
        out.push_str(&format!("📆 {}:\n", heading));
        for (i, activity) in activities.iter().enumerate() {
            out.push_str(&format!("   {}. {}\n", i + 1, activity));
        }
        out.push('\n');
    }
    out
}

/// `Error: {message}` when the backend said why, the generic text otherwise.
pub fn failure_text(backend_message: Option<&str>, generic: &str) -> String {
    match backend_message {
        Some(msg) => format!("Error: {}", msg),
        None => generic.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_goal_and_question_rejected() {
        assert_eq!(
            validate_goal("   ").unwrap_err().to_string(),
            "Please enter a planning goal"
        );
        assert_eq!(
            validate_question("").unwrap_err().to_string(),
            "Please enter a question"
        );
        assert_eq!(validate_goal("  pass exams ").unwrap(), "pass exams");
    }

    #[test]
    fn plan_is_chronological_with_numbered_activities() {
        let mut plan = BTreeMap::new();
        plan.insert(
            "2024-01-16".to_string(),
            vec!["Review notes".to_string()],
        );
        plan.insert(
            "2024-01-15".to_string(),
            vec!["Make schedule".to_string(), "Read ch. 1".to_string()],
        );
        let text = format_plan(&plan);
        let monday = text.find("📆 Monday, Jan 15:").unwrap();
        let tuesday = text.find("📆 Tuesday, Jan 16:").unwrap();
        assert!(monday < tuesday);
        assert!(text.contains("   1. Make schedule\n   2. Read ch. 1\n"));
        assert!(text.starts_with("✅ AI Plan Generated Successfully!"));
    }

    #[test]
    fn unparseable_date_kept_verbatim() {
        let mut plan = BTreeMap::new();
        plan.insert("someday".to_string(), vec!["Relax".to_string()]);
        assert!(format_plan(&plan).contains("📆 someday:"));
    }

    #[test]
    fn failure_text_prefers_backend() {
        assert_eq!(failure_text(Some("quota"), PLAN_FAILED), "Error: quota");
        assert_eq!(failure_text(None, ASK_FAILED), ASK_FAILED);
    }
}
