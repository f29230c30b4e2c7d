//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tutor_qa::{
    AnswerResult, ApiStyle, Dispatcher, MapSource, ProviderDefaults, ProviderDriver,
    ProviderRegistry, TutorClient,
};

/// Driver that answers every prompt with a fixed reply and records prompts.
#[derive(Debug)]
pub struct StubDriver {
    provider: String,
    answer: String,
    prompts: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl ProviderDriver for StubDriver {
    fn provider_id(&self) -> &str {
        &self.provider
    }

    fn api_style(&self) -> ApiStyle {
        ApiStyle::OpenAiCompatible
    }

    async fn send_prompt(&self, prompt: &str) -> tutor_qa::Result<AnswerResult> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(AnswerResult::new(
            self.answer.clone(),
            json!({ "stub": true, "choices": [{ "message": { "content": self.answer } }] }),
        ))
    }
}

/// Client whose only provider is a stub answering `answer`.
pub fn stub_client(answer: &str) -> (TutorClient, Arc<Mutex<Vec<String>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let recorded = prompts.clone();
    let answer = answer.to_string();

    let mut registry = ProviderRegistry::empty("stub");
    registry.register(
        ProviderDefaults::new("stub", "STUB", "http://stub.invalid", "stub-model"),
        move |ctx| {
            Box::new(StubDriver {
                provider: ctx.config.name,
                answer: answer.clone(),
                prompts: recorded.clone(),
            })
        },
    );

    let dispatcher = Dispatcher::new(Arc::new(MapSource::new()))
        .unwrap()
        .with_registry(registry);
    (TutorClient::new(dispatcher), prompts)
}

/// Client over the built-in providers with the given settings.
pub fn configured_client(source: MapSource) -> TutorClient {
    TutorClient::new(Dispatcher::new(Arc::new(source)).unwrap())
}
