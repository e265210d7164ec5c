use chrono::NaiveDate;

use crate::calendar::date_key;
use crate::error::{PlannerError, Result};
use crate::store::LabelStore;

pub const DEFAULT_LABEL_COLOR: &str = "#ff6b6b";
pub const LABEL_SAVED: &str = "✅ Label saved successfully!";
pub const NO_LABELS: &str = "No labels created yet. Add your first label above!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTemplate {
    pub label: &'static str,
    pub color: &'static str,
}

pub const TEMPLATES: [LabelTemplate; 6] = [
    LabelTemplate { label: "Exam", color: "#dc3545" },
    LabelTemplate { label: "Deadline", color: "#fd7e14" },
    LabelTemplate { label: "Meeting", color: "#17a2b8" },
    LabelTemplate { label: "Holiday", color: "#28a745" },
    LabelTemplate { label: "Birthday", color: "#e83e8c" },
    LabelTemplate { label: "Important", color: "#ff6b6b" },
];

/// Validated request to send for a save or update.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSubmission {
    pub date: String,
    pub label: String,
    pub color: String,
}

/// The label form. `editing_label_date` decides between create mode
/// (`None`, save) and edit mode (`Some`, update).
#[derive(Debug, Clone, PartialEq)]
pub struct LabelForm {
    pub date: String,
    pub text: String,
    pub color: String,
    pub editing_label_date: Option<String>,
}

impl LabelForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: date_key(today),
            text: String::new(),
            color: DEFAULT_LABEL_COLOR.to_string(),
            editing_label_date: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_label_date.is_some()
    }

    /// Fills the form from the stored label and enters edit mode. Returns
    /// false when `date` has no label.
    pub fn edit(&mut self, date: &str, labels: &LabelStore) -> bool {
        let Some(label) = labels.get(date) else {
            return false;
        };
        self.date = date.to_string();
        self.text = label.label.clone();
        self.color = label.color.clone();
        self.editing_label_date = Some(date.to_string());
        true
    }

    pub fn use_template(&mut self, template: &LabelTemplate) {
        self.text = template.label.to_string();
        self.color = template.color.to_string();
        self.editing_label_date = None;
    }

    pub fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn validate_save(&self) -> Result<LabelSubmission> {
        let date = self.date.trim();
        if date.is_empty() {
            return Err(PlannerError::Validation("Please select a date".into()));
        }
        let label = self.text.trim();
        if label.is_empty() {
            return Err(PlannerError::Validation("Please enter a label".into()));
        }
        Ok(LabelSubmission {
            date: date.to_string(),
            label: label.to_string(),
            color: self.color.clone(),
        })
    }

    /// Update always targets `editing_label_date`, not the date field.
    pub fn validate_update(&self) -> Result<LabelSubmission> {
        let Some(date) = &self.editing_label_date else {
            return Err(PlannerError::Validation(
                "No label selected for editing".into(),
            ));
        };
        let label = self.text.trim();
        if label.is_empty() {
            return Err(PlannerError::Validation("Please enter a label".into()));
        }
        Ok(LabelSubmission {
            date: date.clone(),
            label: label.to_string(),
            color: self.color.clone(),
        })
    }
}
