use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::api::types::{Label, LabelsMap, NotesMap};

use super::selection::render_grid;
use super::state::{AppState, Tab};

pub const TODAY: &str = "2024-01-15";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

pub fn test_state() -> AppState {
    let mut state = AppState::for_date(today(), vec![]);
    state.status_message = None;
    state
}

pub fn sample_notes() -> NotesMap {
    let mut notes = NotesMap::new();
    notes.insert(
        "2024-01-15".into(),
        vec![
            "Study chapter 4".into(),
            "Gym session at 6pm".into(),
            "Call mom".into(),
        ],
    );
    notes.insert("2024-01-16".into(), vec!["Dentist".into()]);
    notes
}

pub fn sample_labels() -> LabelsMap {
    let mut labels = LabelsMap::new();
    labels.insert(
        "2024-01-20".into(),
        Label {
            label: "Exam".into(),
            color: "#dc3545".into(),
        },
    );
    labels
}

pub fn test_state_with_notes() -> AppState {
    let mut state = test_state();
    state.notes.replace(sample_notes());
    state.labels.replace(sample_labels());
    render_grid(&mut state);
    state
}

pub fn state_on_tab(tab: Tab) -> AppState {
    let mut state = test_state_with_notes();
    state.tab = tab;
    state
}

pub fn key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

pub fn type_text(state: &mut AppState, text: &str) {
    for ch in text.chars() {
        super::input::handle_insert_key(state, &key_event(KeyCode::Char(ch)));
    }
}
