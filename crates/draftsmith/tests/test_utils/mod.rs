//! Test utilities: scripted gateway and app builders.

#![allow(dead_code)]

use async_trait::async_trait;
use draftsmith::{
    BuiltinPromptStore, ChatMessage, Draftsmith, DraftsmithConfig, DraftsmithResult, GatewayError, GatewayErrorKind,
    LlmGateway,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Gateway returning scripted replies in order; an exhausted script fails upstream.
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<VecDeque<Result<String, GatewayErrorKind>>>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl MockGateway {
    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(texts.iter().map(|t| Ok(t.to_string())).collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(kind: GatewayErrorKind) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(VecDeque::from([Err(kind)])),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, Vec<ChatMessage>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    async fn call(&self, model: &str, messages: &[ChatMessage]) -> DraftsmithResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(GatewayErrorKind::Unavailable("script exhausted".to_string())));
        reply.map_err(|kind| GatewayError::new(kind).into())
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Defaults with zero animation delays.
pub fn test_config() -> DraftsmithConfig {
    DraftsmithConfig::from_toml_str(
        r#"
        [animation]
        step_delay_ms = 0
        segment_delay_ms = 0
        "#,
    )
    .unwrap()
}

/// App over `gateway` with built-in prompts.
pub fn app(gateway: Arc<MockGateway>) -> Draftsmith {
    Draftsmith::with_services(test_config(), gateway, Arc::new(BuiltinPromptStore))
}

/// A post comfortably over the 50-character minimum.
pub fn long_post(tag: &str) -> String {
    format!("{tag}: a valid post about AI that is well over sixty characters long.")
}
