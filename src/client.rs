//! Shared question/answer client used by both front ends.
//!
//! One call to [`TutorClient::ask`] runs the whole chain: normalize the
//! question, build the prompt, dispatch it, and hand back everything a front
//! end needs to render.

use serde::Serialize;
use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::preprocess::{preprocess_question, NormalizedQuestion};
use crate::prompt::build_prompt;
use crate::types::AnswerResult;
use crate::Result;

/// Result of one question/answer exchange.
#[derive(Debug, Clone, Serialize)]
pub struct Exchange {
    pub question: NormalizedQuestion,
    pub prompt: String,
    pub answer: AnswerResult,
}

#[derive(Debug, Clone)]
pub struct TutorClient {
    dispatcher: Dispatcher,
}

impl TutorClient {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }

    /// Client over the process environment with the built-in providers.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Dispatcher::from_env()?))
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub async fn ask(&self, question: &str) -> Result<Exchange> {
        let question = preprocess_question(question)?;
        debug!(tokens = question.tokens().len(), processed = %question.processed(), "question normalized");

        let prompt = build_prompt(question.processed());
        let answer = self.dispatcher.query(&prompt).await?;
        info!("exchange complete");

        Ok(Exchange {
            question,
            prompt,
            answer,
        })
    }
}
