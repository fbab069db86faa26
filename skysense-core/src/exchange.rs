use chrono::Utc;

use crate::{
    backend::ChatBackend,
    model::ChatOutcome,
    theme::{ThemeLabel, classify},
};

/// Reply shown whenever the service cannot be reached or answers with garbage.
pub const FALLBACK_REPLY: &str = "Unable to connect to backend.";

/// Send one message and classify the reply.
///
/// Blank input sends nothing and yields `None`. Every failure collapses into
/// [`FALLBACK_REPLY`] with the default theme.
pub async fn exchange(backend: &dyn ChatBackend, input: &str) -> Option<ChatOutcome> {
    if input.trim().is_empty() {
        return None;
    }

    let outcome = match backend.send(input).await {
        Ok(reply) => {
            let theme = classify(&reply);
            tracing::info!(%theme, "reply classified");
            ChatOutcome {
                reply,
                theme,
                received_at: Utc::now(),
                fallback: false,
            }
        }
        Err(err) => {
            tracing::warn!("chat request failed, using fallback reply: {err:#}");
            ChatOutcome {
                reply: FALLBACK_REPLY.to_string(),
                theme: ThemeLabel::Default,
                received_at: Utc::now(),
                fallback: true,
            }
        }
    };

    Some(outcome)
}
