#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shortlink::application::services::AllocationSettings;
use shortlink::domain::completion::CompletionClient;
use shortlink::domain::errors::CompletionError;
use shortlink::infrastructure::persistence::InMemoryShortUrlRepository;
use shortlink::state::AppState;
use shortlink::utils::code_generator::CodeGenerator;
use std::collections::VecDeque;
use std::sync::Arc;

pub const BASE_URL: &str = "http://sho.rt";

pub fn settings() -> AllocationSettings {
    AllocationSettings {
        code_length: 6,
        max_attempts: 50,
        base_url: BASE_URL.to_string(),
    }
}

/// State over a fresh in-memory repository, without a completion provider.
pub fn create_test_state() -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let state = AppState::new(repo.clone(), settings(), None);
    (state, repo)
}

/// State whose triage service talks to `completion`.
pub fn create_triage_state(completion: StubCompletion) -> AppState {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    AppState::new(repo, settings(), Some(Arc::new(completion)))
}

/// State with a scripted code generator.
pub fn create_scripted_state(
    codes: &[&str],
) -> (AppState, Arc<InMemoryShortUrlRepository>) {
    let repo = Arc::new(InMemoryShortUrlRepository::new());
    let state = AppState::with_generator(
        repo.clone(),
        Arc::new(ScriptedGenerator::new(codes)),
        settings(),
        None,
    );
    (state, repo)
}

/// Returns the given codes in order, then repeats the last one.
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&str]) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            last: Mutex::new(String::new()),
        }
    }
}

impl CodeGenerator for ScriptedGenerator {
    fn generate(&self, _length: usize) -> String {
        match self.codes.lock().pop_front() {
            Some(code) => {
                *self.last.lock() = code.clone();
                code
            }
            None => self.last.lock().clone(),
        }
    }
}

/// Completion client returning a canned reply.
pub enum StubCompletion {
    Reply(Value),
    Fail(u16),
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete_json(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<Value, CompletionError> {
        match self {
            StubCompletion::Reply(value) => Ok(value.clone()),
            StubCompletion::Fail(status) => Err(CompletionError::Status {
                status: *status,
                body: "upstream error".to_string(),
            }),
        }
    }
}
