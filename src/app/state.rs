use std::path::PathBuf;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, NaiveDate};

use crate::api::types::{
    AnalyticsReport, DeadlinesResponse, DeleteSummary, LabelsMap, NotesMap, PlanResponse,
    TrendsResponse,
};
use crate::bulk::DeleteScope;
use crate::calendar::{date_key, GridCell, WeekDay, YearMonth};
use crate::deadlines::DeadlineView;
use crate::edit_buffer::EditBuffer;
use crate::error::{ErrorInfo, ErrorPopup};
use crate::labels::{LabelForm, LabelSubmission};
use crate::store::{LabelStore, NotesStore};

pub const LABEL_RESULT_TTL: Duration = Duration::from_secs(3);
pub const ANALYTICS_RESULT_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Calendar,
    Labels,
    BulkDelete,
    Analytics,
    Assistant,
}

impl Tab {
    pub const ALL: [Tab; 5] = [
        Tab::Calendar,
        Tab::Labels,
        Tab::BulkDelete,
        Tab::Analytics,
        Tab::Assistant,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Calendar => "Calendar",
            Tab::Labels => "Labels",
            Tab::BulkDelete => "Bulk Delete",
            Tab::Analytics => "Analytics",
            Tab::Assistant => "AI Assistant",
        }
    }

    fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Single-line text fields that can be edited in insert mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    LabelDate,
    LabelText,
    LabelColor,
    BulkSingleDate,
    BulkRangeStart,
    BulkRangeEnd,
    BulkYear,
    BulkMultipleDates,
    PlanGoal,
    AiQuestion,
}

impl FieldId {
    pub fn title(self) -> &'static str {
        match self {
            FieldId::LabelDate => "Date",
            FieldId::LabelText => "Label",
            FieldId::LabelColor => "Color",
            FieldId::BulkSingleDate => "Date",
            FieldId::BulkRangeStart => "Start date",
            FieldId::BulkRangeEnd => "End date",
            FieldId::BulkYear => "Year",
            FieldId::BulkMultipleDates => "Dates (comma-separated)",
            FieldId::PlanGoal => "Planning goal",
            FieldId::AiQuestion => "Question",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    SaveLabel,
    ClearLabelForm,
    DeleteDate,
    DeleteRange,
    DeleteWeek,
    DeleteMonth,
    DeleteMultiple,
    Analyze,
    Trends,
    Export,
    GeneratePlan,
    AskAi,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormRow {
    Field(FieldId),
    TemplatePicker,
    MonthPicker,
    Button(ButtonId),
    LabelItem(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputTarget {
    NoteDraft,
    Field(FieldId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Insert {
        buffer: EditBuffer,
        target: InputTarget,
    },
}

/// The note edit modal. `index` is the EditingIndex.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteModal {
    pub date: String,
    pub index: usize,
    pub buffer: EditBuffer,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmPrompt {
    pub message: String,
    pub request: Request,
}

/// Result line that disappears on the first tick after `expires_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedText {
    pub text: String,
    pub expires_at: Instant,
}

impl TimedText {
    pub fn new(text: impl Into<String>, ttl: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + ttl,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BulkForm {
    pub single_date: String,
    pub range_start: String,
    pub range_end: String,
    pub month: u32,
    pub year: String,
    pub multiple_dates: String,
    pub result: Vec<String>,
}

impl BulkForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            single_date: String::new(),
            range_start: String::new(),
            range_end: String::new(),
            month: today.month(),
            year: today.year().to_string(),
            multiple_dates: String::new(),
            result: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsPanel {
    pub report: Option<AnalyticsReport>,
    pub trends: Option<TrendsResponse>,
    pub loading: bool,
    pub result: Option<TimedText>,
    pub scroll: u16,
    pub export_dir: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssistantPanel {
    pub goal: String,
    pub question: String,
    pub plan_text: String,
    pub answer_text: String,
    pub scroll: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteOp {
    Add,
    Delete,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelOp {
    Save,
    Update,
    Delete,
}

/// Work the loop hands to a background task.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    LoadNotes,
    LoadLabels,
    /// Notes and labels together.
    RefreshAll,
    AddNote { date: String, content: String },
    DeleteNote { date: String, index: usize },
    UpdateNote { date: String, contents: Vec<String> },
    BulkDelete(DeleteScope),
    SaveLabel(LabelSubmission),
    UpdateLabel(LabelSubmission),
    DeleteLabel(String),
    Analyze,
    Trends,
    LoadDeadlines,
    GeneratePlan(String),
    AskAi(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    Key(crossterm::event::KeyEvent),
    Tick,
    DeadlineTimer,
    NotesLoaded(NotesMap),
    LabelsLoaded(LabelsMap),
    NoteDone(NoteOp, Result<(), ErrorInfo>),
    BulkDeleted(DeleteScope, Result<DeleteSummary, ErrorInfo>),
    LabelDone(LabelOp, Result<(), ErrorInfo>),
    AnalysisLoaded(Result<AnalyticsReport, ErrorInfo>),
    TrendsLoaded(Result<TrendsResponse, ErrorInfo>),
    DeadlinesLoaded(Result<DeadlinesResponse, ErrorInfo>),
    PlanGenerated(Result<PlanResponse, ErrorInfo>),
    AiAnswered(Result<String, ErrorInfo>),
}

pub struct AppState {
    pub today: NaiveDate,
    pub notes: NotesStore,
    pub labels: LabelStore,
    pub selected_date: Option<String>,
    pub selected_display: String,
    pub displayed_month: YearMonth,
    pub grid: Vec<GridCell>,
    pub grid_cursor: usize,
    pub week: Vec<WeekDay>,
    pub notes_cursor: usize,
    pub note_draft: String,
    pub note_modal: Option<NoteModal>,
    pub input_mode: InputMode,
    pub tab: Tab,
    pub form_cursor: usize,
    pub label_form: LabelForm,
    pub template_index: usize,
    pub label_result: Option<TimedText>,
    pub bulk: BulkForm,
    pub analytics: AnalyticsPanel,
    pub assistant: AssistantPanel,
    pub deadlines: DeadlineView,
    pub deadlines_visible: bool,
    pub max_deadlines: usize,
    pub confirm: Option<ConfirmPrompt>,
    pub error_popup: Option<ErrorPopup>,
    pub show_help: bool,
    pub hints: Vec<(String, &'static str)>,
    pub help: Vec<(String, &'static str)>,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(hints: Vec<(String, &'static str)>) -> Self {
        Self::for_date(Local::now().date_naive(), hints)
    }

    pub fn for_date(today: NaiveDate, hints: Vec<(String, &'static str)>) -> Self {
        let mut state = Self {
            today,
            notes: NotesStore::default(),
            labels: LabelStore::default(),
            selected_date: None,
            selected_display: String::new(),
            displayed_month: YearMonth::of(today),
            grid: Vec::new(),
            grid_cursor: 0,
            week: Vec::new(),
            notes_cursor: 0,
            note_draft: String::new(),
            note_modal: None,
            input_mode: InputMode::Normal,
            tab: Tab::Calendar,
            form_cursor: 0,
            label_form: LabelForm::new(today),
            template_index: 0,
            label_result: None,
            bulk: BulkForm::new(today),
            analytics: AnalyticsPanel {
                report: None,
                trends: None,
                loading: false,
                result: None,
                scroll: 0,
                export_dir: PathBuf::from("."),
            },
            assistant: AssistantPanel::default(),
            deadlines: DeadlineView::Loading,
            deadlines_visible: true,
            max_deadlines: 6,
            confirm: None,
            error_popup: None,
            show_help: false,
            hints,
            help: Vec::new(),
            status_message: Some("Loading notes...".into()),
            should_quit: false,
        };
        super::selection::render_grid(&mut state);
        state.grid_cursor = super::selection::today_cell(&state);
        super::selection::select_date(&mut state, &date_key(today));
        state
    }

    /// Notes for the selected date, empty when nothing is selected.
    pub fn selected_notes(&self) -> &[String] {
        match &self.selected_date {
            Some(date) => self.notes.notes_for(date),
            None => &[],
        }
    }

    pub fn field(&self, id: FieldId) -> &str {
        match id {
            FieldId::LabelDate => &self.label_form.date,
            FieldId::LabelText => &self.label_form.text,
            FieldId::LabelColor => &self.label_form.color,
            FieldId::BulkSingleDate => &self.bulk.single_date,
            FieldId::BulkRangeStart => &self.bulk.range_start,
            FieldId::BulkRangeEnd => &self.bulk.range_end,
            FieldId::BulkYear => &self.bulk.year,
            FieldId::BulkMultipleDates => &self.bulk.multiple_dates,
            FieldId::PlanGoal => &self.assistant.goal,
            FieldId::AiQuestion => &self.assistant.question,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut String {
        match id {
            FieldId::LabelDate => &mut self.label_form.date,
            FieldId::LabelText => &mut self.label_form.text,
            FieldId::LabelColor => &mut self.label_form.color,
            FieldId::BulkSingleDate => &mut self.bulk.single_date,
            FieldId::BulkRangeStart => &mut self.bulk.range_start,
            FieldId::BulkRangeEnd => &mut self.bulk.range_end,
            FieldId::BulkYear => &mut self.bulk.year,
            FieldId::BulkMultipleDates => &mut self.bulk.multiple_dates,
            FieldId::PlanGoal => &mut self.assistant.goal,
            FieldId::AiQuestion => &mut self.assistant.question,
        }
    }

    pub fn alert(&mut self, message: impl Into<String>) {
        self.error_popup = Some(ErrorPopup::alert(message));
    }

    pub fn confirm(&mut self, message: impl Into<String>, request: Request) {
        self.confirm = Some(ConfirmPrompt {
            message: message.into(),
            request,
        });
    }
}
