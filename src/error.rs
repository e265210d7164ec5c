use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Request rejected: {0}")]
    Rejected(String),
    #[error("{0}")]
    Validation(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Structured error data for the message channel
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorInfo {
    Validation(String),
    Api { status: u16, body: String },
    Rejected(String),
    Network(String),
}

impl ErrorInfo {
    pub fn from_planner_error(e: &PlannerError) -> Self {
        match e {
            PlannerError::Validation(msg) => ErrorInfo::Validation(msg.clone()),
            PlannerError::Api { status, message } => ErrorInfo::Api {
                status: *status,
                body: message.clone(),
            },
            PlannerError::Rejected(msg) => ErrorInfo::Rejected(msg.clone()),
            _ => ErrorInfo::Network(e.to_string()),
        }
    }

    /// Non-empty text reported by the backend, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ErrorInfo::Api { body, .. } | ErrorInfo::Rejected(body) if !body.trim().is_empty() => {
                Some(body.as_str())
            }
            _ => None,
        }
    }
}

/// Ready-to-render error popup data
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPopup {
    pub title: String,
    pub message: String,
    pub hint: String,
}

impl ErrorPopup {
    /// Blocking alert for input the client refuses to send.
    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            title: "Notice".into(),
            message: message.into(),
            hint: String::new(),
        }
    }

    /// Alert for a failed user action. `failed` titles backend-reported
    /// failures, `errored` titles transport failures.
    pub fn for_action(failed: &str, errored: &str, info: &ErrorInfo) -> Self {
        match info {
            ErrorInfo::Validation(msg) => Self::alert(msg.clone()),
            ErrorInfo::Api { body, .. } | ErrorInfo::Rejected(body) => Self {
                title: failed.to_string(),
                message: if body.trim().is_empty() {
                    failed.to_string()
                } else {
                    truncate(body, 200)
                },
                hint: "Nothing was changed".into(),
            },
            ErrorInfo::Network(msg) => Self {
                title: errored.to_string(),
                message: truncate(msg, 80),
                hint: "Check that the planner server is running".into(),
            },
        }
    }

}

/// Pulls `error` (or `message`) out of a JSON error body.
pub fn extract_json_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body).ok()?;
    value
        .get("error")
        .or_else(|| value.get("message"))?
        .as_str()
        .map(String::from)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}
