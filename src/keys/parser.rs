//! Key strings as written in `[keybindings.bindings]`, e.g. `"Ctrl+r"`,
//! `"Shift+Tab"`, `"]"` or `"F5"`, and back again for the help popup.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::error::{PlannerError, Result};

/// Named keys. The first name of each entry is the one shown to the user.
const NAMED_KEYS: &[(&[&str], KeyCode)] = &[
    (&["Enter", "return"], KeyCode::Enter),
    (&["Esc", "escape"], KeyCode::Esc),
    (&["Tab"], KeyCode::Tab),
    (&["BackTab"], KeyCode::BackTab),
    (&["Backspace", "bs"], KeyCode::Backspace),
    (&["Delete", "del"], KeyCode::Delete),
    (&["Insert", "ins"], KeyCode::Insert),
    (&["Home"], KeyCode::Home),
    (&["End"], KeyCode::End),
    (&["PageUp", "pgup"], KeyCode::PageUp),
    (&["PageDown", "pgdn"], KeyCode::PageDown),
    (&["↑", "up"], KeyCode::Up),
    (&["↓", "down"], KeyCode::Down),
    (&["←", "left"], KeyCode::Left),
    (&["→", "right"], KeyCode::Right),
    (&["Space"], KeyCode::Char(' ')),
];

fn config_error(msg: String) -> PlannerError {
    PlannerError::Config(msg)
}

pub fn parse_key(input: &str) -> Result<KeyEvent> {
    let (mods, last) = match input.rsplit_once('+') {
        // "+" alone, or a trailing "++" binding the plus key
        Some((head, "")) if !head.is_empty() || input == "+" => (head.trim_end_matches('+'), "+"),
        Some((head, last)) => (head, last),
        None => ("", input),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in mods.split('+').map(str::trim).filter(|p| !p.is_empty()) {
        modifiers |= match part.to_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => {
                return Err(config_error(format!(
                    "Unknown modifier '{}' in key '{}'",
                    part, input
                )))
            }
        };
    }

    let code = parse_code(last.trim())
        .ok_or_else(|| config_error(format!("Unknown key '{}' in '{}'", last.trim(), input)))?;
    if matches!(code, KeyCode::Char(c) if c.is_ascii_uppercase()) || code == KeyCode::BackTab {
        modifiers |= KeyModifiers::SHIFT;
    }
    Ok(KeyEvent::new(code, modifiers))
}

fn parse_code(s: &str) -> Option<KeyCode> {
    let mut chars = s.chars();
    if let (Some(ch), None) = (chars.next(), chars.next()) {
        let named = NAMED_KEYS
            .iter()
            .find(|(names, _)| names[0].chars().count() == 1 && names[0].starts_with(ch));
        return Some(named.map_or(KeyCode::Char(ch), |(_, code)| *code));
    }
    if let Some((_, code)) = NAMED_KEYS
        .iter()
        .find(|(names, _)| names.iter().any(|n| n.eq_ignore_ascii_case(s)))
    {
        return Some(*code);
    }
    let n: u8 = s.strip_prefix(['f', 'F'])?.parse().ok()?;
    (1..=12).contains(&n).then_some(KeyCode::F(n))
}

/// Display form. Shift is left implicit for uppercase letters and BackTab.
pub fn format_key(key: &KeyEvent) -> String {
    let implied_shift = key.code == KeyCode::BackTab
        || matches!(key.code, KeyCode::Char(c) if c.is_ascii_uppercase());

    let mut out = String::new();
    for (flag, name) in [
        (KeyModifiers::CONTROL, "Ctrl+"),
        (KeyModifiers::ALT, "Alt+"),
        (KeyModifiers::SHIFT, "Shift+"),
    ] {
        if key.modifiers.contains(flag) && !(flag == KeyModifiers::SHIFT && implied_shift) {
            out.push_str(name);
        }
    }

    match NAMED_KEYS.iter().find(|(_, code)| *code == key.code) {
        Some((names, _)) => out.push_str(names[0]),
        None => match key.code {
            KeyCode::Char(c) => out.push(c),
            KeyCode::F(n) => out.push_str(&format!("F{}", n)),
            _ => out.push('?'),
        },
    }
    out
}
