//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AllocationSettings, ShortenerService, TriageService};
use crate::domain::completion::CompletionClient;
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<ShortenerService>,
    pub triage: Arc<TriageService>,
}

impl AppState {
    /// Wires services over a repository with the random code generator.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        settings: AllocationSettings,
        completion: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self::with_generator(
            repository,
            Arc::new(RandomCodeGenerator::new()),
            settings,
            completion,
        )
    }

    /// Like [`AppState::new`] with an explicit code generator.
    pub fn with_generator(
        repository: Arc<dyn ShortUrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        settings: AllocationSettings,
        completion: Option<Arc<dyn CompletionClient>>,
    ) -> Self {
        Self {
            shortener: Arc::new(ShortenerService::new(repository, generator, settings)),
            triage: Arc::new(TriageService::new(completion)),
        }
    }
}
