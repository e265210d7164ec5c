use std::collections::HashMap;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    PrevMonth,
    NextMonth,
    GoToday,
    Select,
    Exit,
    AddNote,
    Edit,
    Delete,
    PanelUp,
    PanelDown,
    NextTab,
    PrevTab,
    Refresh,
    ToggleDeadlines,
    RefreshDeadlines,
    Export,
    Help,
    Quit,
}

/// Action, its name in `[keybindings.bindings]`, and its help text.
/// Help popup order follows this table.
static ACTIONS: [(Action, &str, &str); 22] = [
    (Action::MoveUp, "move_up", "up"),
    (Action::MoveDown, "move_down", "down"),
    (Action::MoveLeft, "move_left", "left"),
    (Action::MoveRight, "move_right", "right"),
    (Action::PrevMonth, "prev_month", "prev month"),
    (Action::NextMonth, "next_month", "next month"),
    (Action::GoToday, "go_today", "today"),
    (Action::Select, "select", "select"),
    (Action::Exit, "exit", "back"),
    (Action::AddNote, "add_note", "add note"),
    (Action::Edit, "edit", "edit"),
    (Action::Delete, "delete", "delete"),
    (Action::PanelUp, "panel_up", "panel ↑"),
    (Action::PanelDown, "panel_down", "panel ↓"),
    (Action::NextTab, "next_tab", "next tab"),
    (Action::PrevTab, "prev_tab", "prev tab"),
    (Action::Refresh, "refresh", "refresh"),
    (Action::ToggleDeadlines, "toggle_deadlines", "deadlines"),
    (Action::RefreshDeadlines, "refresh_deadlines", "reload deadlines"),
    (Action::Export, "export", "export"),
    (Action::Help, "help", "help"),
    (Action::Quit, "quit", "quit"),
];

impl Action {
    pub fn all() -> impl Iterator<Item = Action> {
        ACTIONS.iter().map(|(action, _, _)| *action)
    }

    pub fn hint_text(&self) -> &'static str {
        ACTIONS
            .iter()
            .find(|(action, _, _)| action == self)
            .map_or("", |(_, _, hint)| *hint)
    }
}

impl FromStr for Action {
    type Err = PlannerError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ACTIONS
            .iter()
            .find(|(_, config_name, _)| config_name.eq_ignore_ascii_case(name))
            .map(|(action, _, _)| *action)
            .ok_or_else(|| PlannerError::Config(format!("Unknown action in keybindings: {}", name)))
    }
}

type Binding = (KeyModifiers, KeyCode, Action);

const PLAIN: KeyModifiers = KeyModifiers::NONE;
const CTRL: KeyModifiers = KeyModifiers::CONTROL;
const ALT: KeyModifiers = KeyModifiers::ALT;
const SHIFT: KeyModifiers = KeyModifiers::SHIFT;

const VIM: &[Binding] = &[
    (PLAIN, KeyCode::Char('k'), Action::MoveUp),
    (PLAIN, KeyCode::Up, Action::MoveUp),
    (PLAIN, KeyCode::Char('j'), Action::MoveDown),
    (PLAIN, KeyCode::Down, Action::MoveDown),
    (PLAIN, KeyCode::Char('h'), Action::MoveLeft),
    (PLAIN, KeyCode::Left, Action::MoveLeft),
    (PLAIN, KeyCode::Char('l'), Action::MoveRight),
    (PLAIN, KeyCode::Right, Action::MoveRight),
    (SHIFT, KeyCode::Char('H'), Action::PrevMonth),
    (SHIFT, KeyCode::Char('L'), Action::NextMonth),
    (PLAIN, KeyCode::PageUp, Action::PrevMonth),
    (PLAIN, KeyCode::PageDown, Action::NextMonth),
    (PLAIN, KeyCode::Char('t'), Action::GoToday),
    (PLAIN, KeyCode::Enter, Action::Select),
    (PLAIN, KeyCode::Esc, Action::Exit),
    (PLAIN, KeyCode::Char('a'), Action::AddNote),
    (PLAIN, KeyCode::Char('e'), Action::Edit),
    (PLAIN, KeyCode::Char('d'), Action::Delete),
    (SHIFT, KeyCode::Char('K'), Action::PanelUp),
    (SHIFT, KeyCode::Char('J'), Action::PanelDown),
    (PLAIN, KeyCode::Tab, Action::NextTab),
    (SHIFT, KeyCode::BackTab, Action::PrevTab),
    (PLAIN, KeyCode::Char('r'), Action::Refresh),
    (SHIFT, KeyCode::Char('D'), Action::ToggleDeadlines),
    (SHIFT, KeyCode::Char('R'), Action::RefreshDeadlines),
    (PLAIN, KeyCode::Char('x'), Action::Export),
    (PLAIN, KeyCode::Char('?'), Action::Help),
    (PLAIN, KeyCode::Char('q'), Action::Quit),
];

const EMACS: &[Binding] = &[
    (CTRL, KeyCode::Char('p'), Action::MoveUp),
    (PLAIN, KeyCode::Up, Action::MoveUp),
    (CTRL, KeyCode::Char('n'), Action::MoveDown),
    (PLAIN, KeyCode::Down, Action::MoveDown),
    (CTRL, KeyCode::Char('b'), Action::MoveLeft),
    (PLAIN, KeyCode::Left, Action::MoveLeft),
    (CTRL, KeyCode::Char('f'), Action::MoveRight),
    (PLAIN, KeyCode::Right, Action::MoveRight),
    (ALT, KeyCode::Char('p'), Action::PrevMonth),
    (ALT, KeyCode::Char('n'), Action::NextMonth),
    (PLAIN, KeyCode::PageUp, Action::PrevMonth),
    (PLAIN, KeyCode::PageDown, Action::NextMonth),
    (CTRL, KeyCode::Char('t'), Action::GoToday),
    (PLAIN, KeyCode::Enter, Action::Select),
    (CTRL, KeyCode::Char('g'), Action::Exit),
    (PLAIN, KeyCode::Esc, Action::Exit),
    (CTRL, KeyCode::Char('o'), Action::AddNote),
    (CTRL, KeyCode::Char('e'), Action::Edit),
    (CTRL, KeyCode::Char('d'), Action::Delete),
    (ALT, KeyCode::Up, Action::PanelUp),
    (ALT, KeyCode::Down, Action::PanelDown),
    (PLAIN, KeyCode::Tab, Action::NextTab),
    (SHIFT, KeyCode::BackTab, Action::PrevTab),
    (CTRL, KeyCode::Char('l'), Action::Refresh),
    (ALT, KeyCode::Char('d'), Action::ToggleDeadlines),
    (ALT, KeyCode::Char('r'), Action::RefreshDeadlines),
    (CTRL, KeyCode::Char('s'), Action::Export),
    (CTRL, KeyCode::Char('h'), Action::Help),
    (CTRL, KeyCode::Char('q'), Action::Quit),
];

const ARROWS: &[Binding] = &[
    (PLAIN, KeyCode::Up, Action::MoveUp),
    (PLAIN, KeyCode::Down, Action::MoveDown),
    (PLAIN, KeyCode::Left, Action::MoveLeft),
    (PLAIN, KeyCode::Right, Action::MoveRight),
    (PLAIN, KeyCode::PageUp, Action::PrevMonth),
    (PLAIN, KeyCode::PageDown, Action::NextMonth),
    (PLAIN, KeyCode::Home, Action::GoToday),
    (PLAIN, KeyCode::Enter, Action::Select),
    (PLAIN, KeyCode::Esc, Action::Exit),
    (PLAIN, KeyCode::Insert, Action::AddNote),
    (PLAIN, KeyCode::F(2), Action::Edit),
    (PLAIN, KeyCode::Delete, Action::Delete),
    (CTRL, KeyCode::Up, Action::PanelUp),
    (CTRL, KeyCode::Down, Action::PanelDown),
    (PLAIN, KeyCode::Tab, Action::NextTab),
    (SHIFT, KeyCode::BackTab, Action::PrevTab),
    (PLAIN, KeyCode::F(5), Action::Refresh),
    (PLAIN, KeyCode::F(8), Action::ToggleDeadlines),
    (PLAIN, KeyCode::F(6), Action::RefreshDeadlines),
    (CTRL, KeyCode::Char('e'), Action::Export),
    (PLAIN, KeyCode::F(1), Action::Help),
    (CTRL, KeyCode::Char('q'), Action::Quit),
];

/// Bindings for `vim`, `emacs` or `arrows`, case-insensitive.
pub fn get_preset(name: &str) -> Option<HashMap<KeyEvent, Action>> {
    let table = match name.to_lowercase().as_str() {
        "vim" => VIM,
        "emacs" => EMACS,
        "arrows" => ARROWS,
        _ => return None,
    };
    Some(
        table
            .iter()
            .map(|&(mods, code, action)| (KeyEvent::new(code, mods), action))
            .collect(),
    )
}
