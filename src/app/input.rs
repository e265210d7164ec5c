use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::edit_buffer::EditBuffer;

use super::actions::{submit_note_draft, submit_note_modal};
use super::state::{AppState, InputMode, InputTarget, Request};

/// Shared line-editing keys. Returns false when the key was not an edit.
fn edit_key(buffer: &mut EditBuffer, key: &KeyEvent) -> bool {
    match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('w')) | (KeyModifiers::ALT, KeyCode::Backspace) => {
            buffer.delete_word_back()
        }
        (KeyModifiers::CONTROL, KeyCode::Char('u')) => buffer.clear(),
        (KeyModifiers::CONTROL, KeyCode::Char('a')) => buffer.move_home(),
        (KeyModifiers::CONTROL, KeyCode::Char('e')) => buffer.move_end(),
        (KeyModifiers::ALT, KeyCode::Left) | (KeyModifiers::CONTROL, KeyCode::Left) => {
            buffer.move_word_left()
        }
        (KeyModifiers::ALT, KeyCode::Right) | (KeyModifiers::CONTROL, KeyCode::Right) => {
            buffer.move_word_right()
        }
        (_, KeyCode::Backspace) => buffer.delete_back(),
        (_, KeyCode::Delete) => buffer.delete_forward(),
        (_, KeyCode::Left) => buffer.move_left(),
        (_, KeyCode::Right) => buffer.move_right(),
        (_, KeyCode::Home) => buffer.move_home(),
        (_, KeyCode::End) => buffer.move_end(),
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => buffer.insert_char(c),
        _ => return false,
    }
    true
}

/// Insert mode: Enter commits, Esc leaves. For the note draft Esc keeps the
/// typed text as the draft; for form fields Esc discards it.
pub fn handle_insert_key(state: &mut AppState, key: &KeyEvent) -> Option<Request> {
    let InputMode::Insert { buffer, target } = &mut state.input_mode else {
        return None;
    };
    match key.code {
        KeyCode::Enter => {
            let text = buffer.text();
            let target = target.clone();
            state.input_mode = InputMode::Normal;
            match target {
                InputTarget::NoteDraft => {
                    state.note_draft = text;
                    submit_note_draft(state)
                }
                InputTarget::Field(id) => {
                    *state.field_mut(id) = text;
                    None
                }
            }
        }
        KeyCode::Esc => {
            if *target == InputTarget::NoteDraft {
                state.note_draft = buffer.text();
            }
            state.input_mode = InputMode::Normal;
            None
        }
        _ => {
            edit_key(buffer, key);
            None
        }
    }
}

/// Note edit modal: Enter saves, Esc closes and clears the editing index.
pub fn handle_modal_key(state: &mut AppState, key: &KeyEvent) -> Option<Request> {
    let modal = state.note_modal.as_mut()?;
    match key.code {
        KeyCode::Enter => submit_note_modal(state),
        KeyCode::Esc => {
            state.note_modal = None;
            None
        }
        _ => {
            if !modal.saving {
                edit_key(&mut modal.buffer, key);
            }
            None
        }
    }
}

pub fn handle_confirm_key(state: &mut AppState, key: &KeyEvent) -> Option<Request> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            let prompt = state.confirm.take()?;
            if matches!(prompt.request, Request::BulkDelete(_)) {
                state.bulk.result.clear();
            }
            Some(prompt.request)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.confirm = None;
            None
        }
        _ => None,
    }
}
