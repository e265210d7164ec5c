use tracing::{info, warn};

use crate::analytics::{self, EXPORT_DONE, EXPORT_NOTHING};
use crate::assistant::{self, ASK_WAITING, PLAN_WAITING};
use crate::bulk::DeleteScope;
use crate::deadlines::DeadlineView;
use crate::edit_buffer::EditBuffer;
use crate::error::{PlannerError, Result};
use crate::keys::preset::Action;
use crate::labels::TEMPLATES;
use crate::store::validate_note_content;

use super::forms::{focused_row, rows};
use super::selection::{go_to_today, move_cursor, next_month, prev_month, select_date};
use super::state::{
    AppState, ButtonId, FormRow, InputMode, InputTarget, NoteModal, Request, Tab, TimedText,
    ANALYTICS_RESULT_TTL,
};

pub const NOTE_DELETE_CONFIRM: &str = "Are you sure you want to delete this note?";
pub const LABEL_DELETE_CONFIRM: &str = "Are you sure you want to delete this label?";
pub const NO_SELECTION_ALERT: &str = "Please select a date first";

pub fn handle_action(state: &mut AppState, action: &Action) -> Option<Request> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            None
        }
        Action::Help => {
            state.show_help = true;
            None
        }
        Action::NextTab => {
            state.tab = state.tab.next();
            state.form_cursor = 0;
            None
        }
        Action::PrevTab => {
            state.tab = state.tab.prev();
            state.form_cursor = 0;
            None
        }
        Action::Refresh => {
            state.status_message = Some("Refreshing...".into());
            Some(Request::RefreshAll)
        }
        Action::ToggleDeadlines => {
            state.deadlines_visible = !state.deadlines_visible;
            None
        }
        Action::RefreshDeadlines => {
            state.deadlines = DeadlineView::Loading;
            Some(Request::LoadDeadlines)
        }
        Action::Export => {
            export_analysis(state);
            None
        }
        _ if state.tab == Tab::Calendar => calendar_action(state, action),
        _ => form_action(state, action),
    }
}

fn calendar_action(state: &mut AppState, action: &Action) -> Option<Request> {
    match action {
        Action::MoveUp => move_cursor(state, -1, 0),
        Action::MoveDown => move_cursor(state, 1, 0),
        Action::MoveLeft => move_cursor(state, 0, -1),
        Action::MoveRight => move_cursor(state, 0, 1),
        Action::PrevMonth => prev_month(state),
        Action::NextMonth => next_month(state),
        Action::GoToday => go_to_today(state),
        Action::Select => {
            if let Some(key) = state.grid.get(state.grid_cursor).map(|c| c.key.clone()) {
                select_date(state, &key);
            }
        }
        Action::AddNote => {
            if state.selected_date.is_none() {
                state.alert(NO_SELECTION_ALERT);
            } else {
                state.input_mode = InputMode::Insert {
                    buffer: EditBuffer::new(&state.note_draft),
                    target: InputTarget::NoteDraft,
                };
            }
        }
        Action::Edit => open_note_modal(state),
        Action::Delete => return request_note_delete(state),
        Action::PanelUp => {
            state.notes_cursor = state.notes_cursor.saturating_sub(1);
        }
        Action::PanelDown => {
            let count = state.selected_notes().len();
            if state.notes_cursor + 1 < count {
                state.notes_cursor += 1;
            }
        }
        _ => {}
    }
    None
}

/// Sends the add-note request for the selected date, or alerts.
pub(super) fn submit_note_draft(state: &mut AppState) -> Option<Request> {
    let Some(date) = state.selected_date.clone() else {
        state.alert(NO_SELECTION_ALERT);
        return None;
    };
    match validate_note_content(&state.note_draft) {
        Ok(content) => Some(Request::AddNote { date, content }),
        Err(e) => {
            state.alert(e.to_string());
            None
        }
    }
}

fn open_note_modal(state: &mut AppState) {
    let Some(date) = state.selected_date.clone() else {
        state.alert(NO_SELECTION_ALERT);
        return;
    };
    let index = state.notes_cursor;
    if let Some(note) = state.selected_notes().get(index) {
        state.note_modal = Some(NoteModal {
            buffer: EditBuffer::new(note),
            date,
            index,
            saving: false,
        });
    }
}

fn request_note_delete(state: &mut AppState) -> Option<Request> {
    let Some(date) = state.selected_date.clone() else {
        state.alert(NO_SELECTION_ALERT);
        return None;
    };
    let index = state.notes_cursor;
    if index < state.selected_notes().len() {
        state.confirm(NOTE_DELETE_CONFIRM, Request::DeleteNote { date, index });
    }
    None
}

/// Builds the full-list update for the open modal. The store is left as is
/// until the backend confirms.
pub(super) fn submit_note_modal(state: &mut AppState) -> Option<Request> {
    let modal = state.note_modal.as_ref()?;
    if modal.saving {
        return None;
    }
    let content = match validate_note_content(&modal.buffer.text()) {
        Ok(content) => content,
        Err(e) => {
            state.alert(e.to_string());
            return None;
        }
    };
    let date = modal.date.clone();
    let Some(contents) = state.notes.replaced_contents(&date, modal.index, &content) else {
        state.alert("That note no longer exists");
        return None;
    };
    if let Some(modal) = state.note_modal.as_mut() {
        modal.saving = true;
    }
    Some(Request::UpdateNote { date, contents })
}

fn form_action(state: &mut AppState, action: &Action) -> Option<Request> {
    let row_count = rows(state).len();
    match action {
        Action::MoveUp => {
            state.form_cursor = state.form_cursor.saturating_sub(1);
            None
        }
        Action::MoveDown => {
            if state.form_cursor + 1 < row_count {
                state.form_cursor += 1;
            }
            None
        }
        Action::MoveLeft => {
            cycle_row(state, -1);
            None
        }
        Action::MoveRight => {
            cycle_row(state, 1);
            None
        }
        Action::Select => activate_row(state),
        Action::Edit => {
            if let Some(FormRow::LabelItem(date)) = focused_row(state) {
                edit_label(state, &date);
            }
            None
        }
        Action::Delete => {
            if let Some(FormRow::LabelItem(date)) = focused_row(state) {
                state.confirm(LABEL_DELETE_CONFIRM, Request::DeleteLabel(date));
            }
            None
        }
        Action::Exit if state.tab == Tab::Labels => {
            state.label_form.clear(state.today);
            None
        }
        Action::PanelUp => {
            scroll_output(state, -1);
            None
        }
        Action::PanelDown => {
            scroll_output(state, 1);
            None
        }
        _ => None,
    }
}

fn cycle_row(state: &mut AppState, step: i32) {
    match focused_row(state) {
        Some(FormRow::TemplatePicker) => {
            let len = TEMPLATES.len() as i32;
            state.template_index = (state.template_index as i32 + step).rem_euclid(len) as usize;
        }
        Some(FormRow::MonthPicker) => {
            state.bulk.month = ((state.bulk.month as i32 - 1 + step).rem_euclid(12) + 1) as u32;
        }
        _ => {}
    }
}

fn scroll_output(state: &mut AppState, step: i32) {
    let scroll = match state.tab {
        Tab::Analytics => &mut state.analytics.scroll,
        Tab::Assistant => &mut state.assistant.scroll,
        _ => return,
    };
    *scroll = if step < 0 {
        scroll.saturating_sub(1)
    } else {
        scroll.saturating_add(1)
    };
}

fn activate_row(state: &mut AppState) -> Option<Request> {
    match focused_row(state)? {
        FormRow::Field(id) => {
            state.input_mode = InputMode::Insert {
                buffer: EditBuffer::new(state.field(id)),
                target: InputTarget::Field(id),
            };
            None
        }
        FormRow::TemplatePicker => {
            if let Some(template) = TEMPLATES.get(state.template_index) {
                state.label_form.use_template(template);
            }
            None
        }
        FormRow::MonthPicker => None,
        FormRow::Button(id) => press_button(state, id),
        FormRow::LabelItem(date) => {
            edit_label(state, &date);
            None
        }
    }
}

fn edit_label(state: &mut AppState, date: &str) {
    if state.label_form.edit(date, &state.labels) {
        state.form_cursor = 1;
    }
}

pub(super) fn press_button(state: &mut AppState, id: ButtonId) -> Option<Request> {
    let result = match id {
        ButtonId::SaveLabel => label_request(state),
        ButtonId::ClearLabelForm => {
            state.label_form.clear(state.today);
            return None;
        }
        ButtonId::DeleteDate => DeleteScope::single_date(&state.bulk.single_date).map(|s| confirm_bulk(state, s)),
        ButtonId::DeleteRange => {
            DeleteScope::date_range(&state.bulk.range_start, &state.bulk.range_end)
                .map(|s| confirm_bulk(state, s))
        }
        ButtonId::DeleteWeek => Ok(confirm_bulk(state, DeleteScope::CurrentWeek)),
        ButtonId::DeleteMonth => {
            DeleteScope::month(&state.bulk.year, state.bulk.month).map(|s| confirm_bulk(state, s))
        }
        ButtonId::DeleteMultiple => {
            DeleteScope::multiple_dates(&state.bulk.multiple_dates).map(|s| confirm_bulk(state, s))
        }
        ButtonId::Analyze => {
            state.analytics.loading = true;
            Ok(Some(Request::Analyze))
        }
        ButtonId::Trends => Ok(Some(Request::Trends)),
        ButtonId::Export => {
            export_analysis(state);
            Ok(None)
        }
        ButtonId::GeneratePlan => assistant::validate_goal(&state.assistant.goal).map(|goal| {
            state.assistant.plan_text = PLAN_WAITING.to_string();
            Some(Request::GeneratePlan(goal))
        }),
        ButtonId::AskAi => assistant::validate_question(&state.assistant.question).map(|q| {
            state.assistant.answer_text = ASK_WAITING.to_string();
            Some(Request::AskAi(q))
        }),
    };
    match result {
        Ok(request) => request,
        Err(e) => {
            state.alert(e.to_string());
            None
        }
    }
}

fn label_request(state: &AppState) -> Result<Option<Request>> {
    if state.label_form.is_editing() {
        let submission = state.label_form.validate_update()?;
        Ok(Some(Request::UpdateLabel(submission)))
    } else {
        let submission = state.label_form.validate_save()?;
        Ok(Some(Request::SaveLabel(submission)))
    }
}

fn confirm_bulk(state: &mut AppState, scope: DeleteScope) -> Option<Request> {
    state.confirm(scope.confirm_text(), Request::BulkDelete(scope));
    None
}

fn export_analysis(state: &mut AppState) {
    let outcome = match &state.analytics.report {
        None => Err(PlannerError::Validation(EXPORT_NOTHING.into())),
        Some(report) => analytics::export_report(report, &state.analytics.export_dir, state.today),
    };
    let text = match outcome {
        Ok(path) => {
            info!(path = %path.display(), "exported analysis");
            state.status_message = Some(format!("Saved {}", path.display()));
            EXPORT_DONE.to_string()
        }
        Err(PlannerError::Validation(msg)) => msg,
        Err(e) => {
            warn!(error = %e, "analysis export failed");
            format!("❌ {}", e)
        }
    };
    state.analytics.result = Some(TimedText::new(text, ANALYTICS_RESULT_TTL));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::AnalyticsReport;
    use crate::app::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn quit_and_help() {
        let mut state = test_state();
        handle_action(&mut state, &Action::Help);
        assert!(state.show_help);
        handle_action(&mut state, &Action::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn tabs_cycle_and_reset_form_cursor() {
        let mut state = test_state();
        state.form_cursor = 3;
        handle_action(&mut state, &Action::NextTab);
        assert_eq!(state.tab, Tab::Labels);
        assert_eq!(state.form_cursor, 0);
        handle_action(&mut state, &Action::PrevTab);
        handle_action(&mut state, &Action::PrevTab);
        assert_eq!(state.tab, Tab::Assistant);
    }

    #[test]
    fn refresh_requests_notes_and_labels() {
        let mut state = test_state();
        assert_eq!(handle_action(&mut state, &Action::Refresh), Some(Request::RefreshAll));
    }

    #[test]
    fn select_picks_cursor_cell() {
        let mut state = test_state();
        move_cursor(&mut state, 0, 1);
        handle_action(&mut state, &Action::Select);
        assert_eq!(state.selected_date.as_deref(), Some("2024-01-16"));
    }

    #[test]
    fn add_note_enters_insert_with_draft() {
        let mut state = test_state();
        state.note_draft = "half typed".into();
        handle_action(&mut state, &Action::AddNote);
        match &state.input_mode {
            InputMode::Insert { buffer, target } => {
                assert_eq!(buffer.text(), "half typed");
                assert_eq!(target, &InputTarget::NoteDraft);
            }
            other => panic!("expected insert mode, got {:?}", other),
        }
    }

    #[test]
    fn submit_blank_draft_alerts() {
        let mut state = test_state();
        state.note_draft = "   ".into();
        assert_eq!(submit_note_draft(&mut state), None);
        assert_eq!(state.error_popup.unwrap().message, "Please enter note content");
    }

    #[test]
    fn submit_without_selection_alerts() {
        let mut state = test_state();
        state.selected_date = None;
        state.note_draft = "x".into();
        assert_eq!(submit_note_draft(&mut state), None);
        assert_eq!(state.error_popup.unwrap().message, "Please select a date first");
    }

    #[test]
    fn submit_trims_content() {
        let mut state = test_state();
        state.note_draft = "  Study  ".into();
        assert_eq!(
            submit_note_draft(&mut state),
            Some(Request::AddNote {
                date: TODAY.into(),
                content: "Study".into()
            })
        );
    }

    #[test]
    fn delete_note_asks_for_confirmation() {
        let mut state = test_state_with_notes();
        handle_action(&mut state, &Action::PanelDown);
        assert_eq!(handle_action(&mut state, &Action::Delete), None);
        let confirm = state.confirm.unwrap();
        assert_eq!(confirm.message, NOTE_DELETE_CONFIRM);
        assert_eq!(
            confirm.request,
            Request::DeleteNote {
                date: TODAY.into(),
                index: 1
            }
        );
    }

    #[test]
    fn delete_on_empty_day_does_nothing() {
        let mut state = test_state();
        handle_action(&mut state, &Action::Delete);
        assert!(state.confirm.is_none());
    }

    #[test]
    fn panel_cursor_stays_in_range() {
        let mut state = test_state_with_notes();
        for _ in 0..5 {
            handle_action(&mut state, &Action::PanelDown);
        }
        assert_eq!(state.notes_cursor, 2);
        for _ in 0..5 {
            handle_action(&mut state, &Action::PanelUp);
        }
        assert_eq!(state.notes_cursor, 0);
    }

    #[test]
    fn edit_opens_modal_with_note_text() {
        let mut state = test_state_with_notes();
        handle_action(&mut state, &Action::PanelDown);
        handle_action(&mut state, &Action::Edit);
        let modal = state.note_modal.as_ref().unwrap();
        assert_eq!(modal.index, 1);
        assert_eq!(modal.buffer.text(), "Gym session at 6pm");
    }

    #[test]
    fn modal_submit_sends_full_list_without_touching_store() {
        let mut state = test_state_with_notes();
        handle_action(&mut state, &Action::PanelDown);
        handle_action(&mut state, &Action::Edit);
        state.note_modal.as_mut().unwrap().buffer = EditBuffer::new(" Gym at 7pm ");

        let request = submit_note_modal(&mut state).unwrap();
        assert_eq!(
            request,
            Request::UpdateNote {
                date: TODAY.into(),
                contents: vec![
                    "Study chapter 4".into(),
                    "Gym at 7pm".into(),
                    "Call mom".into()
                ],
            }
        );
        assert_eq!(state.notes.notes_for(TODAY)[1], "Gym session at 6pm");
        assert!(state.note_modal.as_ref().unwrap().saving);
        assert_eq!(submit_note_modal(&mut state), None);
    }

    #[test]
    fn modal_submit_blank_alerts_and_keeps_modal() {
        let mut state = test_state_with_notes();
        handle_action(&mut state, &Action::Edit);
        state.note_modal.as_mut().unwrap().buffer = EditBuffer::default();
        assert_eq!(submit_note_modal(&mut state), None);
        assert!(state.note_modal.is_some());
        assert_eq!(state.error_popup.unwrap().message, "Please enter note content");
    }

    #[test]
    fn template_switches_to_create_mode() {
        let mut state = state_on_tab(Tab::Labels);
        state.label_form.editing_label_date = Some("2024-01-20".into());
        state.form_cursor = 3;
        handle_action(&mut state, &Action::MoveRight);
        assert_eq!(state.template_index, 1);
        handle_action(&mut state, &Action::Select);
        assert_eq!(state.label_form.text, "Deadline");
        assert_eq!(state.label_form.color, "#fd7e14");
        assert!(!state.label_form.is_editing());
    }

    #[test]
    fn template_picker_wraps() {
        let mut state = state_on_tab(Tab::Labels);
        state.form_cursor = 3;
        handle_action(&mut state, &Action::MoveLeft);
        assert_eq!(state.template_index, TEMPLATES.len() - 1);
    }

    #[test]
    fn label_item_edit_then_update() {
        let mut state = state_on_tab(Tab::Labels);
        state.form_cursor = 6;
        handle_action(&mut state, &Action::Select);
        assert_eq!(state.label_form.editing_label_date.as_deref(), Some("2024-01-20"));
        assert_eq!(state.label_form.text, "Exam");

        state.label_form.text = "Final exam".into();
        let request = press_button(&mut state, ButtonId::SaveLabel).unwrap();
        match request {
            Request::UpdateLabel(sub) => {
                assert_eq!(sub.date, "2024-01-20");
                assert_eq!(sub.label, "Final exam");
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn save_label_requires_text() {
        let mut state = state_on_tab(Tab::Labels);
        assert_eq!(press_button(&mut state, ButtonId::SaveLabel), None);
        assert_eq!(state.error_popup.unwrap().message, "Please enter a label");
    }

    #[test]
    fn label_delete_asks_for_confirmation() {
        let mut state = state_on_tab(Tab::Labels);
        state.form_cursor = 6;
        handle_action(&mut state, &Action::Delete);
        let confirm = state.confirm.unwrap();
        assert_eq!(confirm.message, LABEL_DELETE_CONFIRM);
        assert_eq!(confirm.request, Request::DeleteLabel("2024-01-20".into()));
    }

    #[test]
    fn bulk_single_date_requires_date() {
        let mut state = state_on_tab(Tab::BulkDelete);
        press_button(&mut state, ButtonId::DeleteDate);
        assert_eq!(state.error_popup.unwrap().message, "Please select a date");
    }

    #[test]
    fn bulk_multiple_dates_rejects_bad_entry_before_confirm() {
        let mut state = state_on_tab(Tab::BulkDelete);
        state.bulk.multiple_dates = "2024-01-15, 01/16/2024".into();
        press_button(&mut state, ButtonId::DeleteMultiple);
        assert!(state.confirm.is_none());
        assert_eq!(
            state.error_popup.unwrap().message,
            "Invalid date format: 01/16/2024. Please use YYYY-MM-DD format."
        );
    }

    #[test]
    fn bulk_month_confirm_names_month() {
        let mut state = state_on_tab(Tab::BulkDelete);
        state.form_cursor = 6;
        handle_action(&mut state, &Action::MoveRight);
        handle_action(&mut state, &Action::MoveRight);
        assert_eq!(state.bulk.month, 3);
        press_button(&mut state, ButtonId::DeleteMonth);
        let confirm = state.confirm.unwrap();
        assert_eq!(
            confirm.message,
            "Are you sure you want to delete all notes for March 2024?"
        );
        assert_eq!(
            confirm.request,
            Request::BulkDelete(DeleteScope::Month {
                year: 2024,
                month: 3
            })
        );
    }

    #[test]
    fn month_picker_wraps_around_year() {
        let mut state = state_on_tab(Tab::BulkDelete);
        state.form_cursor = 6;
        handle_action(&mut state, &Action::MoveLeft);
        assert_eq!(state.bulk.month, 12);
        handle_action(&mut state, &Action::MoveRight);
        assert_eq!(state.bulk.month, 1);
    }

    #[test]
    fn generate_plan_validates_and_shows_waiting() {
        let mut state = state_on_tab(Tab::Assistant);
        press_button(&mut state, ButtonId::GeneratePlan);
        assert_eq!(
            state.error_popup.take().unwrap().message,
            "Please enter a planning goal"
        );

        state.assistant.goal = "pass finals".into();
        assert_eq!(
            press_button(&mut state, ButtonId::GeneratePlan),
            Some(Request::GeneratePlan("pass finals".into()))
        );
        assert_eq!(state.assistant.plan_text, PLAN_WAITING);
    }

    #[test]
    fn ask_ai_validates_question() {
        let mut state = state_on_tab(Tab::Assistant);
        press_button(&mut state, ButtonId::AskAi);
        assert_eq!(state.error_popup.unwrap().message, "Please enter a question");
    }

    #[test]
    fn export_without_report() {
        let mut state = state_on_tab(Tab::Analytics);
        handle_action(&mut state, &Action::Export);
        assert_eq!(state.analytics.result.unwrap().text, EXPORT_NOTHING);
    }

    #[test]
    fn export_writes_file() {
        let tmp = TempDir::new().unwrap();
        let mut state = state_on_tab(Tab::Analytics);
        state.analytics.export_dir = tmp.path().to_path_buf();
        state.analytics.report = Some(AnalyticsReport {
            total_activities: 4,
            ..Default::default()
        });
        handle_action(&mut state, &Action::Export);
        assert_eq!(state.analytics.result.unwrap().text, EXPORT_DONE);
        assert!(tmp
            .path()
            .join("time_allocation_analysis_2024-01-15.json")
            .exists());
    }

    #[test]
    fn toggle_and_refresh_deadlines() {
        let mut state = test_state();
        state.deadlines = DeadlineView::Empty;
        handle_action(&mut state, &Action::ToggleDeadlines);
        assert!(!state.deadlines_visible);
        assert_eq!(
            handle_action(&mut state, &Action::RefreshDeadlines),
            Some(Request::LoadDeadlines)
        );
        assert_eq!(state.deadlines, DeadlineView::Loading);
    }

    #[test]
    fn output_scroll_on_analytics() {
        let mut state = state_on_tab(Tab::Analytics);
        handle_action(&mut state, &Action::PanelDown);
        handle_action(&mut state, &Action::PanelDown);
        handle_action(&mut state, &Action::PanelUp);
        assert_eq!(state.analytics.scroll, 1);
    }
}
