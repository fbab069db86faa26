use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::theme::ThemeLabel;

/// Outbound payload: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Inbound payload: `{"reply": "..."}`. Other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// What the user sees after one exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatOutcome {
    pub reply: String,
    pub theme: ThemeLabel,
    pub received_at: DateTime<Utc>,
    /// Set when the reply is the fixed fallback rather than the service's answer.
    pub fallback: bool,
}
