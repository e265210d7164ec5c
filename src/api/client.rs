use std::time::Duration;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::endpoints::{self, url};
use crate::api::types::{
    AnalyticsReport, AskResponse, DateRangeRequest, DateRequest, DeadlinesResponse,
    DeleteNoteRequest, DeleteSummary, GoalRequest, LabelRequest, LabelsMap, MonthRequest,
    MultipleDatesRequest, NotesMap, PlanResponse, QuestionRequest, SaveNoteRequest,
    StatusResponse, TrendsResponse, UpdateNoteRequest, WeekRequest,
};
use crate::error::{extract_json_message, PlannerError, Result};

#[derive(Clone)]
pub struct PlannerClient {
    client: Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- Notes ---

    pub async fn get_notes(&self) -> Result<NotesMap> {
        let notes: Option<NotesMap> = self.get(endpoints::GET_NOTES).await?;
        Ok(notes.unwrap_or_default())
    }

    pub async fn save_note(&self, date: &str, content: &str) -> Result<()> {
        self.post_status(endpoints::SAVE_NOTE, &SaveNoteRequest { date, content })
            .await
    }

    /// Replaces the whole note list for `date`.
    pub async fn update_note(&self, date: &str, contents: &[String]) -> Result<()> {
        self.post_status(endpoints::UPDATE_NOTE, &UpdateNoteRequest { date, contents })
            .await
    }

    pub async fn delete_note(&self, date: &str, note_index: usize) -> Result<()> {
        self.post_status(endpoints::DELETE_NOTE, &DeleteNoteRequest { date, note_index })
            .await
    }

    // --- Bulk deletes ---

    pub async fn delete_all_notes(&self, date: &str) -> Result<DeleteSummary> {
        self.post_delete(endpoints::DELETE_ALL_NOTES, &DateRequest { date })
            .await
    }

    pub async fn delete_date_range(&self, start_date: &str, end_date: &str) -> Result<DeleteSummary> {
        self.post_delete(
            endpoints::DELETE_DATE_RANGE,
            &DateRangeRequest {
                start_date,
                end_date,
            },
        )
        .await
    }

    pub async fn delete_week(&self) -> Result<DeleteSummary> {
        self.post_delete(endpoints::DELETE_WEEK, &WeekRequest {})
            .await
    }

    pub async fn delete_month(&self, year: i32, month: u32) -> Result<DeleteSummary> {
        self.post_delete(endpoints::DELETE_MONTH, &MonthRequest { year, month })
            .await
    }

    pub async fn delete_multiple_dates(&self, dates: &[String]) -> Result<DeleteSummary> {
        self.post_delete(endpoints::DELETE_MULTIPLE_DATES, &MultipleDatesRequest { dates })
            .await
    }

    // --- Labels ---

    pub async fn get_labels(&self) -> Result<LabelsMap> {
        let labels: Option<LabelsMap> = self.get(endpoints::GET_LABELS).await?;
        Ok(labels.unwrap_or_default())
    }

    pub async fn save_label(&self, date: &str, label: &str, color: &str) -> Result<()> {
        self.post_status(endpoints::SAVE_LABEL, &LabelRequest { date, label, color })
            .await
    }

    pub async fn update_label(&self, date: &str, label: &str, color: &str) -> Result<()> {
        self.post_status(endpoints::UPDATE_LABEL, &LabelRequest { date, label, color })
            .await
    }

    pub async fn delete_label(&self, date: &str) -> Result<()> {
        self.post_status(endpoints::DELETE_LABEL, &DateRequest { date })
            .await
    }

    // --- Assistant ---

    pub async fn generate_plan(&self, goal: &str) -> Result<PlanResponse> {
        let resp: PlanResponse = self
            .post(endpoints::GENERATE_PLAN, &GoalRequest { goal })
            .await?;
        if resp.status.as_deref() == Some("success") {
            Ok(resp)
        } else {
            Err(PlannerError::Rejected(resp.error.unwrap_or_default()))
        }
    }

    pub async fn ask_ai(&self, question: &str) -> Result<String> {
        let resp: AskResponse = self
            .post(endpoints::ASK_AI, &QuestionRequest { question })
            .await?;
        match resp.answer {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Err(PlannerError::Rejected(resp.error.unwrap_or_default())),
        }
    }

    // --- Analytics & deadlines ---

    pub async fn analyze_time_allocation(&self) -> Result<AnalyticsReport> {
        self.get(endpoints::ANALYZE_TIME_ALLOCATION).await
    }

    pub async fn get_activity_trends(&self) -> Result<TrendsResponse> {
        self.get(endpoints::GET_ACTIVITY_TRENDS).await
    }

    pub async fn get_labeled_deadlines(&self) -> Result<DeadlinesResponse> {
        self.get(endpoints::GET_LABELED_DEADLINES).await
    }

    // --- Transport ---

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .get(url(&self.base_url, path))
            .send()
            .await?;
        read_json(resp).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .client
            .post(url(&self.base_url, path))
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn post_status<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let resp: StatusResponse = self.post(path, body).await?;
        resp.into_result()
    }

    async fn post_delete<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<DeleteSummary> {
        let summary: DeleteSummary = self.post(path, body).await?;
        if summary.is_success() {
            Ok(summary)
        } else {
            Err(PlannerError::Rejected(
                summary.error.unwrap_or_default(),
            ))
        }
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let message = extract_json_message(&body).unwrap_or(body);
        return Err(PlannerError::Api { status, message });
    }

    let body = resp.json::<T>().await?;
    Ok(body)
}
