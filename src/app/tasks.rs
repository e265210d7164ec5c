use tokio::sync::mpsc;
use tracing::warn;

use crate::api::client::PlannerClient;
use crate::api::types::{DeleteSummary, LabelsMap, NotesMap};
use crate::bulk::DeleteScope;
use crate::error::{ErrorInfo, Result};

use super::state::{AppMessage, LabelOp, NoteOp, Request};

type Tx = mpsc::UnboundedSender<AppMessage>;

fn to_info<T>(result: Result<T>) -> std::result::Result<T, ErrorInfo> {
    result.map_err(|e| {
        warn!(error = %e, "request failed");
        ErrorInfo::from_planner_error(&e)
    })
}

pub(super) fn dispatch_request(request: Request, client: &PlannerClient, tx: &Tx) {
    match request {
        Request::LoadNotes => spawn_load_notes(client, tx),
        Request::LoadLabels => spawn_load_labels(client, tx),
        Request::RefreshAll => {
            spawn_load_notes(client, tx);
            spawn_load_labels(client, tx);
        }
        Request::AddNote { date, content } => {
            spawn_note_op(client, tx, NoteOp::Add, move |c| async move {
                c.save_note(&date, &content).await
            })
        }
        Request::DeleteNote { date, index } => {
            spawn_note_op(client, tx, NoteOp::Delete, move |c| async move {
                c.delete_note(&date, index).await
            })
        }
        Request::UpdateNote { date, contents } => {
            spawn_note_op(client, tx, NoteOp::Update, move |c| async move {
                c.update_note(&date, &contents).await
            })
        }
        Request::BulkDelete(scope) => spawn_bulk_delete(client, scope, tx),
        Request::SaveLabel(sub) => spawn_label_op(client, tx, LabelOp::Save, move |c| async move {
            c.save_label(&sub.date, &sub.label, &sub.color).await
        }),
        Request::UpdateLabel(sub) => {
            spawn_label_op(client, tx, LabelOp::Update, move |c| async move {
                c.update_label(&sub.date, &sub.label, &sub.color).await
            })
        }
        Request::DeleteLabel(date) => {
            spawn_label_op(client, tx, LabelOp::Delete, move |c| async move {
                c.delete_label(&date).await
            })
        }
        Request::Analyze => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = to_info(client.analyze_time_allocation().await);
                let _ = tx.send(AppMessage::AnalysisLoaded(result));
            });
        }
        Request::Trends => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = to_info(client.get_activity_trends().await);
                let _ = tx.send(AppMessage::TrendsLoaded(result));
            });
        }
        Request::LoadDeadlines => spawn_load_deadlines(client, tx),
        Request::GeneratePlan(goal) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = to_info(client.generate_plan(&goal).await);
                let _ = tx.send(AppMessage::PlanGenerated(result));
            });
        }
        Request::AskAi(question) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = to_info(client.ask_ai(&question).await);
                let _ = tx.send(AppMessage::AiAnswered(result));
            });
        }
    }
}

/// A failed load empties the store rather than keeping stale data.
fn spawn_load_notes(client: &PlannerClient, tx: &Tx) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let notes = client.get_notes().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load notes");
            NotesMap::new()
        });
        let _ = tx.send(AppMessage::NotesLoaded(notes));
    });
}

fn spawn_load_labels(client: &PlannerClient, tx: &Tx) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let labels = client.get_labels().await.unwrap_or_else(|e| {
            warn!(error = %e, "failed to load labels");
            LabelsMap::new()
        });
        let _ = tx.send(AppMessage::LabelsLoaded(labels));
    });
}

pub(super) fn spawn_load_deadlines(client: &PlannerClient, tx: &Tx) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = to_info(client.get_labeled_deadlines().await);
        let _ = tx.send(AppMessage::DeadlinesLoaded(result));
    });
}

fn spawn_note_op<F, Fut>(client: &PlannerClient, tx: &Tx, op: NoteOp, call: F)
where
    F: FnOnce(PlannerClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send + 'static,
{
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = to_info(call(client).await);
        let _ = tx.send(AppMessage::NoteDone(op, result));
    });
}

fn spawn_label_op<F, Fut>(client: &PlannerClient, tx: &Tx, op: LabelOp, call: F)
where
    F: FnOnce(PlannerClient) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send + 'static,
{
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = to_info(call(client).await);
        let _ = tx.send(AppMessage::LabelDone(op, result));
    });
}

fn spawn_bulk_delete(client: &PlannerClient, scope: DeleteScope, tx: &Tx) {
    let client = client.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result: Result<DeleteSummary> = match &scope {
            DeleteScope::SingleDate(date) => client.delete_all_notes(date).await,
            DeleteScope::DateRange { start, end } => client.delete_date_range(start, end).await,
            DeleteScope::CurrentWeek => client.delete_week().await,
            DeleteScope::Month { year, month } => client.delete_month(*year, *month).await,
            DeleteScope::MultipleDates(dates) => client.delete_multiple_dates(dates).await,
        };
        let _ = tx.send(AppMessage::BulkDeleted(scope, to_info(result)));
    });
}
