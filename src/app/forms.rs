use super::state::{AppState, ButtonId, FieldId, FormRow, Tab};

/// Focusable rows of a form tab, top to bottom. The calendar tab has none.
pub fn rows(state: &AppState) -> Vec<FormRow> {
    match state.tab {
        Tab::Calendar => Vec::new(),
        Tab::Labels => {
            let mut rows = vec![
                FormRow::Field(FieldId::LabelDate),
                FormRow::Field(FieldId::LabelText),
                FormRow::Field(FieldId::LabelColor),
                FormRow::TemplatePicker,
                FormRow::Button(ButtonId::SaveLabel),
                FormRow::Button(ButtonId::ClearLabelForm),
            ];
            rows.extend(
                state
                    .labels
                    .sorted()
                    .into_iter()
                    .map(|(date, _)| FormRow::LabelItem(date.to_string())),
            );
            rows
        }
        Tab::BulkDelete => vec![
            FormRow::Field(FieldId::BulkSingleDate),
            FormRow::Button(ButtonId::DeleteDate),
            FormRow::Field(FieldId::BulkRangeStart),
            FormRow::Field(FieldId::BulkRangeEnd),
            FormRow::Button(ButtonId::DeleteRange),
            FormRow::Button(ButtonId::DeleteWeek),
            FormRow::MonthPicker,
            FormRow::Field(FieldId::BulkYear),
            FormRow::Button(ButtonId::DeleteMonth),
            FormRow::Field(FieldId::BulkMultipleDates),
            FormRow::Button(ButtonId::DeleteMultiple),
        ],
        Tab::Analytics => vec![
            FormRow::Button(ButtonId::Analyze),
            FormRow::Button(ButtonId::Trends),
            FormRow::Button(ButtonId::Export),
        ],
        Tab::Assistant => vec![
            FormRow::Field(FieldId::PlanGoal),
            FormRow::Button(ButtonId::GeneratePlan),
            FormRow::Field(FieldId::AiQuestion),
            FormRow::Button(ButtonId::AskAi),
        ],
    }
}

pub fn focused_row(state: &AppState) -> Option<FormRow> {
    rows(state).into_iter().nth(state.form_cursor)
}

pub fn button_text(state: &AppState, id: ButtonId) -> &'static str {
    match id {
        ButtonId::SaveLabel if state.label_form.is_editing() => "Update Label",
        ButtonId::SaveLabel => "Save Label",
        ButtonId::ClearLabelForm => "Clear",
        ButtonId::DeleteDate => "Delete Date",
        ButtonId::DeleteRange => "Delete Range",
        ButtonId::DeleteWeek => "Delete Current Week",
        ButtonId::DeleteMonth => "Delete Month",
        ButtonId::DeleteMultiple => "Delete Dates",
        ButtonId::Analyze => "Analyze Time Allocation",
        ButtonId::Trends => "Load Activity Trends",
        ButtonId::Export => "Export Analysis",
        ButtonId::GeneratePlan => "Generate Plan",
        ButtonId::AskAi => "Ask AI",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_helpers::*;

    #[test]
    fn calendar_has_no_form_rows() {
        let state = test_state();
        assert!(rows(&state).is_empty());
        assert_eq!(focused_row(&state), None);
    }

    #[test]
    fn labels_tab_lists_labels_after_form() {
        let state = state_on_tab(Tab::Labels);
        let rows = rows(&state);
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[6], FormRow::LabelItem("2024-01-20".into()));
    }

    #[test]
    fn save_button_text_follows_mode() {
        let mut state = state_on_tab(Tab::Labels);
        assert_eq!(button_text(&state, ButtonId::SaveLabel), "Save Label");
        state.label_form.editing_label_date = Some("2024-01-20".into());
        assert_eq!(button_text(&state, ButtonId::SaveLabel), "Update Label");
    }
}
