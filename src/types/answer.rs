use serde::Serialize;
use serde_json::Value;

/// The answer text together with the provider's unmodified response.
///
/// `raw` is carried opaquely for display and debugging; nothing downstream
/// interprets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerResult {
    pub answer: String,
    pub raw: Value,
}

impl AnswerResult {
    pub fn new(answer: impl Into<String>, raw: Value) -> Self {
        Self {
            answer: answer.into(),
            raw,
        }
    }

    /// Raw payload as indented JSON, the form both front ends display.
    pub fn raw_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_else(|_| self.raw.to_string())
    }
}
