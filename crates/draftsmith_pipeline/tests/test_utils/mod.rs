//! Test utilities: scripted gateway and in-memory prompt store.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use draftsmith_cache::{PromptCache, PromptCacheConfig};
use draftsmith_core::{ChatMessage, PromptRole, PromptSet, PromptTemplate};
use draftsmith_error::{DraftsmithResult, GatewayError, GatewayErrorKind, PromptStoreError, PromptStoreErrorKind};
use draftsmith_interface::{LlmGateway, PromptStore};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted reply of the mock gateway.
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Fail(GatewayErrorKind),
}

/// Gateway returning scripted replies in order and recording every call.
#[derive(Default)]
pub struct MockGateway {
    replies: Mutex<VecDeque<MockReply>>,
    calls: Mutex<Vec<(String, Vec<ChatMessage>)>>,
}

impl MockGateway {
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn replying(texts: &[&str]) -> Arc<Self> {
        Self::new(texts.iter().map(|t| MockReply::Text(t.to_string())))
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
            .unwrap_or(MockReply::Fail(GatewayErrorKind::EmptyResponse));
        match reply {
            MockReply::Text(text) => Ok(text),
            MockReply::Fail(kind) => Err(GatewayError::new(kind).into()),
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Store serving fixed bodies, or failing.
pub struct StaticPromptStore {
    bodies: Option<Vec<(PromptRole, String)>>,
}

impl StaticPromptStore {
    pub fn with(bodies: &[(PromptRole, &str)]) -> Arc<Self> {
        Arc::new(Self {
            bodies: Some(bodies.iter().map(|(r, b)| (*r, b.to_string())).collect()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { bodies: None })
    }
}

#[async_trait]
impl PromptStore for StaticPromptStore {
    async fn fetch_all(&self) -> DraftsmithResult<PromptSet> {
        let bodies = self.bodies.as_ref().ok_or_else(|| {
            PromptStoreError::new(PromptStoreErrorKind::Request("unreachable".to_string()))
        })?;
        let now = Utc::now();
        Ok(PromptSet::complete(bodies.iter().map(|(role, body)| {
            (*role, PromptTemplate::new(role.key(), body.clone(), now))
        }))?)
    }
}

/// Cache over a store that is never reachable, so built-in defaults are used.
pub fn default_prompts() -> Arc<PromptCache> {
    Arc::new(PromptCache::new(
        PromptCacheConfig::default(),
        StaticPromptStore::unreachable(),
    ))
}

/// A post comfortably over the 50-character minimum.
pub fn long_post(tag: &str) -> String {
    format!("{tag}: AI is reshaping how teams plan, build and ship products in 2026.")
}
