mod actions;
mod forms;
mod input;
mod selection;
mod state;
mod tasks;
pub use actions::handle_action;
pub use forms::{button_text, focused_row, rows};
pub use state::*;

#[cfg(test)]
pub(crate) mod test_helpers;

use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::analytics::{ANALYSIS_DONE, ANALYSIS_FAILED, TRENDS_FAILED, TRENDS_LOADED};
use crate::api::client::PlannerClient;
use crate::assistant::{self, ASK_FAILED, PLAN_FAILED};
use crate::bulk::{self, DeleteScope};
use crate::config::AppConfig;
use crate::deadlines::DeadlineView;
use crate::error::{ErrorPopup, Result};
use crate::keys::Keymap;
use crate::labels::LABEL_SAVED;

use input::{handle_confirm_key, handle_insert_key, handle_modal_key};
use selection::{render_grid, roll_today};
use tasks::dispatch_request;

/// Routes a key press. Popups take precedence over the focused panel.
pub fn handle_key(state: &mut AppState, key: &KeyEvent, keybindings: &Keymap) -> Option<Request> {
    if state.error_popup.is_some() {
        state.error_popup = None;
        None
    } else if state.show_help {
        state.show_help = false;
        None
    } else if state.confirm.is_some() {
        handle_confirm_key(state, key)
    } else if state.note_modal.is_some() {
        handle_modal_key(state, key)
    } else if state.input_mode != InputMode::Normal {
        handle_insert_key(state, key)
    } else {
        let action = *keybindings.resolve(key)?;
        handle_action(state, &action)
    }
}

/// Applies a background result. Returns follow-up requests, such as the
/// reload after a successful mutation.
pub fn apply_message(state: &mut AppState, msg: AppMessage) -> Vec<Request> {
    match msg {
        AppMessage::Key(_) => Vec::new(),
        AppMessage::Tick => {
            expire_results(state, Instant::now());
            roll_today(state, Local::now().date_naive());
            Vec::new()
        }
        AppMessage::DeadlineTimer => vec![Request::LoadDeadlines],
        AppMessage::NotesLoaded(notes) => {
            state.notes.replace(notes);
            state.status_message = None;
            render_grid(state);
            Vec::new()
        }
        AppMessage::LabelsLoaded(labels) => {
            state.labels.replace(labels);
            state.status_message = None;
            render_grid(state);
            let row_count = rows(state).len();
            if state.form_cursor >= row_count {
                state.form_cursor = row_count.saturating_sub(1);
            }
            Vec::new()
        }
        AppMessage::NoteDone(op, result) => note_done(state, op, result),
        AppMessage::BulkDeleted(scope, result) => match result {
            Ok(summary) => {
                state.bulk.result = bulk::success_lines(&summary);
                clear_bulk_inputs(state, &scope);
                vec![Request::LoadNotes]
            }
            Err(info) => {
                let error = info.backend_message().unwrap_or(scope.fallback_error());
                state.bulk.result = bulk::failure_lines(error);
                Vec::new()
            }
        },
        AppMessage::LabelDone(op, result) => match result {
            Ok(()) => {
                if op != LabelOp::Delete {
                    state.label_result = Some(TimedText::new(LABEL_SAVED, LABEL_RESULT_TTL));
                    state.label_form.clear(state.today);
                }
                vec![Request::LoadLabels]
            }
            Err(info) => {
                let error = info.backend_message().map(str::to_string).unwrap_or_else(|| {
                    match op {
                        LabelOp::Save => "Error saving label. Please try again.",
                        LabelOp::Update => "Error updating label. Please try again.",
                        LabelOp::Delete => "Error deleting label. Please try again.",
                    }
                    .to_string()
                });
                state.label_result = Some(TimedText::new(format!("❌ {}", error), LABEL_RESULT_TTL));
                Vec::new()
            }
        },
        AppMessage::AnalysisLoaded(result) => {
            state.analytics.loading = false;
            state.analytics.scroll = 0;
            let text = match result {
                Ok(report) => {
                    state.analytics.report = Some(report);
                    ANALYSIS_DONE
                }
                Err(_) => ANALYSIS_FAILED,
            };
            state.analytics.result = Some(TimedText::new(text, ANALYTICS_RESULT_TTL));
            Vec::new()
        }
        AppMessage::TrendsLoaded(result) => {
            let text = match result {
                Ok(trends) => {
                    state.analytics.trends = Some(trends);
                    TRENDS_LOADED
                }
                Err(_) => TRENDS_FAILED,
            };
            state.analytics.result = Some(TimedText::new(text, ANALYTICS_RESULT_TTL));
            Vec::new()
        }
        AppMessage::DeadlinesLoaded(result) => {
            state.deadlines = match result {
                Ok(resp) => {
                    DeadlineView::from_response(&resp.countdowns, resp.statistics, state.max_deadlines)
                }
                Err(_) => DeadlineView::Failed,
            };
            Vec::new()
        }
        AppMessage::PlanGenerated(result) => {
            state.assistant.scroll = 0;
            match result {
                Ok(resp) => {
                    state.assistant.plan_text = assistant::format_plan(&resp.plan);
                    vec![Request::LoadNotes]
                }
                Err(info) => {
                    state.assistant.plan_text =
                        assistant::failure_text(info.backend_message(), PLAN_FAILED);
                    Vec::new()
                }
            }
        }
        AppMessage::AiAnswered(result) => {
            state.assistant.scroll = 0;
            state.assistant.answer_text = match result {
                Ok(answer) => answer,
                Err(info) => assistant::failure_text(info.backend_message(), ASK_FAILED),
            };
            Vec::new()
        }
    }
}

fn note_done(
    state: &mut AppState,
    op: NoteOp,
    result: std::result::Result<(), crate::error::ErrorInfo>,
) -> Vec<Request> {
    match result {
        Ok(()) => {
            match op {
                NoteOp::Add => state.note_draft.clear(),
                NoteOp::Update => state.note_modal = None,
                NoteOp::Delete => {}
            }
            vec![Request::LoadNotes]
        }
        Err(info) => {
            let (failed, errored) = match op {
                NoteOp::Add => ("Failed to add note", "Error adding note"),
                NoteOp::Delete => ("Failed to delete note", "Error deleting note"),
                NoteOp::Update => ("Failed to update note", "Error updating note"),
            };
            if let Some(modal) = state.note_modal.as_mut() {
                modal.saving = false;
            }
            state.error_popup = Some(ErrorPopup::for_action(failed, errored, &info));
            Vec::new()
        }
    }
}

fn clear_bulk_inputs(state: &mut AppState, scope: &DeleteScope) {
    match scope {
        DeleteScope::SingleDate(_) => state.bulk.single_date.clear(),
        DeleteScope::DateRange { .. } => {
            state.bulk.range_start.clear();
            state.bulk.range_end.clear();
        }
        DeleteScope::MultipleDates(_) => state.bulk.multiple_dates.clear(),
        DeleteScope::CurrentWeek | DeleteScope::Month { .. } => {}
    }
}

fn expire_results(state: &mut AppState, now: Instant) {
    if state.label_result.as_ref().is_some_and(|r| r.is_expired(now)) {
        state.label_result = None;
    }
    if state.analytics.result.as_ref().is_some_and(|r| r.is_expired(now)) {
        state.analytics.result = None;
    }
}

fn spawn_interval(tx: &mpsc::UnboundedSender<AppMessage>, period: Duration, make: fn() -> AppMessage) {
    let tx = tx.clone();
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + period;
        let mut interval = tokio::time::interval_at(start, period);
        loop {
            interval.tick().await;
            if tx.send(make()).is_err() {
                break;
            }
        }
    });
}

pub async fn run(config: &AppConfig, terminal: &mut DefaultTerminal) -> Result<()> {
    let keybindings =
        Keymap::from_preset(&config.keybindings.preset, &config.keybindings.bindings)?;

    let mut state = AppState::new(keybindings.hints());
    state.help = keybindings.help_entries();
    state.max_deadlines = config.deadlines.max_items;
    state.analytics.export_dir = config.analytics.export_dir.clone();

    let client = PlannerClient::new(&config.server.base_url, config.server.timeout())?;
    info!(base_url = client.base_url(), "planner client ready");

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();

    dispatch_request(Request::RefreshAll, &client, &tx);
    tasks::spawn_load_deadlines(&client, &tx);

    // Spawn event reader task
    let event_tx = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        loop {
            match reader.next().await {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if event_tx.send(AppMessage::Key(key)).is_err() {
                        break;
                    }
                }
                Some(Err(e)) => {
                    warn!(error = %e, "terminal event stream failed");
                    break;
                }
                None => break,
                _ => {}
            }
        }
    });

    spawn_interval(&tx, Duration::from_millis(250), || AppMessage::Tick);
    let minutes = |m: u64| Duration::from_secs(m * 60);
    spawn_interval(&tx, minutes(config.deadlines.refresh_minutes), || AppMessage::DeadlineTimer);
    spawn_interval(&tx, minutes(config.deadlines.day_refresh_minutes), || {
        AppMessage::DeadlineTimer
    });

    // Main loop
    loop {
        terminal.draw(|frame| crate::ui::render(frame, &state))?;

        if let Some(msg) = rx.recv().await {
            let requests = match msg {
                AppMessage::Key(key) => handle_key(&mut state, &key, &keybindings)
                    .into_iter()
                    .collect(),
                other => apply_message(&mut state, other),
            };
            for request in requests {
                dispatch_request(request, &client, &tx);
            }
        }

        if state.should_quit {
            info!("quit requested");
            break;
        }
    }

    Ok(())
}
