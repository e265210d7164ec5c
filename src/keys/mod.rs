pub mod parser;
pub mod preset;

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{PlannerError, Result};
use preset::{get_preset, Action};

/// Shown in the status bar, in this order, when bound.
const STATUS_HINTS: [Action; 6] = [
    Action::Quit,
    Action::Help,
    Action::NextTab,
    Action::Select,
    Action::AddNote,
    Action::Refresh,
];

pub struct Keymap {
    bindings: HashMap<KeyEvent, Action>,
}

impl Keymap {
    /// Builds the named preset, then applies `[keybindings.bindings]`
    /// overrides. An override replaces every preset key for its action.
    pub fn from_preset(name: &str, overrides: &HashMap<String, String>) -> Result<Self> {
        let mut bindings = get_preset(name)
            .ok_or_else(|| PlannerError::Config(format!("Unknown keybinding preset: {}", name)))?;

        for (action_name, key) in overrides {
            let action: Action = action_name.parse()?;
            let key = parser::parse_key(key)?;
            bindings.retain(|_, bound| *bound != action);
            bindings.insert(key, action);
        }

        tracing::debug!(preset = name, overrides = overrides.len(), "keymap built");
        Ok(Self { bindings })
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<&Action> {
        let exact = KeyEvent::new(key.code, key.modifiers);
        self.bindings.get(&exact).or_else(|| {
            // only some terminals report SHIFT with these keys
            let shiftable = match key.code {
                KeyCode::BackTab => true,
                KeyCode::Char(c) => c.is_ascii_uppercase() || c.is_ascii_punctuation(),
                _ => false,
            };
            shiftable
                .then(|| KeyEvent::new(key.code, key.modifiers ^ KeyModifiers::SHIFT))
                .and_then(|toggled| self.bindings.get(&toggled))
        })
    }

    /// Shortest display form among the keys bound to `action`.
    pub fn key_for(&self, action: &Action) -> Option<String> {
        self.bindings
            .iter()
            .filter(|(_, bound)| *bound == action)
            .map(|(key, _)| parser::format_key(key))
            .min_by_key(|label| (label.chars().count(), label.clone()))
    }

    fn labelled(&self, actions: impl IntoIterator<Item = Action>) -> Vec<(String, &'static str)> {
        actions
            .into_iter()
            .filter_map(|action| Some((self.key_for(&action)?, action.hint_text())))
            .collect()
    }

    pub fn hints(&self) -> Vec<(String, &'static str)> {
        self.labelled(STATUS_HINTS)
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.labelled(Action::all())
    }
}
