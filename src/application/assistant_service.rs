// Assistant service - Voice widget chat round trip
use crate::application::energy_repository::EnergyRepository;
use serde::Serialize;
use std::sync::Arc;

pub const EMPTY_PROMPT_MESSAGE: &str = "Please say or type something first.";
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't reach the energy assistant. Please try again.";

/// Reply shown inline in the widget; failures are transient messages, not errors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssistantReply {
    pub ok: bool,
    pub message: String,
}

impl AssistantReply {
    fn answer(message: String) -> Self {
        Self { ok: true, message }
    }

    fn transient(message: &str) -> Self {
        Self {
            ok: false,
            message: message.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct AssistantService {
    repository: Arc<dyn EnergyRepository>,
}

impl AssistantService {
    pub fn new(repository: Arc<dyn EnergyRepository>) -> Self {
        Self { repository }
    }

    pub async fn ask(&self, prompt: &str) -> AssistantReply {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return AssistantReply::transient(EMPTY_PROMPT_MESSAGE);
        }

        match self.repository.send_chat(prompt).await {
            Ok(reply) if !reply.trim().is_empty() => AssistantReply::answer(reply),
            Ok(_) => {
                tracing::warn!("Assistant returned an empty reply");
                AssistantReply::transient(UNAVAILABLE_MESSAGE)
            }
            Err(e) => {
                tracing::warn!("Assistant request failed: {}", e);
                AssistantReply::transient(UNAVAILABLE_MESSAGE)
            }
        }
    }
}
