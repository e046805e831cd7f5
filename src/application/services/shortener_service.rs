//! Short code allocation and redirection lookup.

use std::sync::Arc;

use crate::application::services::availability::{AvailabilityChecker, IdentifierKind};
use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::errors::{RepositoryError, ShortenError};
use crate::domain::repositories::ShortUrlRepository;
use crate::utils::code_generator::{
    CodeGenerator, DEFAULT_CODE_LENGTH, is_valid_code_length, validate_custom_code,
};

/// Default bound on code generation plus insert retries per allocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 50;

/// Tunables for code allocation.
#[derive(Debug, Clone)]
pub struct AllocationSettings {
    /// Length of generated codes; clamped into `4..=16` by [`ShortenerService::new`].
    pub code_length: usize,
    /// Maximum number of random candidates and insert conflicts tolerated
    /// before giving up with [`ShortenError::AllocationExhausted`].
    pub max_attempts: u32,
    /// Public base URL that short links are served from.
    pub base_url: String,
}

impl Default for AllocationSettings {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Service allocating unique short codes and resolving them back.
///
/// # Allocation
///
/// 1. A target that already has a record gets that record back, even when
///    the caller asked for a custom code.
/// 2. A custom code is used as-is or rejected with [`ShortenError::CodeInUse`].
/// 3. Otherwise random codes are drawn until a free one is found.
/// 4. The insert is the only write. A uniqueness conflict from the store
///    restarts at step 1, so a lost race on the target returns the winner's
///    record and a lost race on a custom code surfaces as `CodeInUse`.
///
/// Candidates and conflicts share one attempt budget, so allocation always
/// terminates.
pub struct ShortenerService {
    repository: Arc<dyn ShortUrlRepository>,
    checker: AvailabilityChecker,
    generator: Arc<dyn CodeGenerator>,
    settings: AllocationSettings,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        generator: Arc<dyn CodeGenerator>,
        mut settings: AllocationSettings,
    ) -> Self {
        if !is_valid_code_length(settings.code_length) {
            settings.code_length = DEFAULT_CODE_LENGTH;
        }
        settings.max_attempts = settings.max_attempts.max(1);

        Self {
            checker: AvailabilityChecker::new(repository.clone()),
            repository,
            generator,
            settings,
        }
    }

    /// Length of randomly generated codes.
    pub fn code_length(&self) -> usize {
        self.settings.code_length
    }

    /// Allocates a short code for `target_url`.
    ///
    /// `target_url` must already be validated as an absolute HTTP(S) URL.
    /// `custom_code` must not be blank; callers map blank input to `None`.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidCustomCode`] if `custom_code` breaks the format rules
    /// - [`ShortenError::CodeInUse`] if `custom_code` belongs to another target
    /// - [`ShortenError::AllocationExhausted`] if the attempt budget runs out
    /// - [`ShortenError::Repository`] on storage failures
    pub async fn allocate(
        &self,
        target_url: &str,
        custom_code: Option<&str>,
    ) -> Result<ShortUrl, ShortenError> {
        if let Some(code) = custom_code {
            validate_custom_code(code)?;
        }

        let mut attempts = 0;

        loop {
            if let Some(existing) = self
                .checker
                .find_existing(target_url, IdentifierKind::Target)
                .await?
            {
                return Ok(existing);
            }

            let code = match custom_code {
                Some(code) => {
                    if !self.checker.is_available(code, IdentifierKind::Code).await? {
                        return Err(ShortenError::CodeInUse(code.to_string()));
                    }
                    code.to_string()
                }
                None => self.next_available_code(&mut attempts).await?,
            };

            match self
                .repository
                .insert(NewShortUrl::new(code, target_url))
                .await
            {
                Ok(created) => return Ok(created),
                Err(RepositoryError::UniquenessConflict(_)) => {
                    // A custom code ends on the next pass: either dedup finds
                    // the racer's target or the code re-check reports it taken.
                    if custom_code.is_none() {
                        attempts += 1;
                        if attempts >= self.settings.max_attempts {
                            return Err(ShortenError::AllocationExhausted { attempts });
                        }
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Resolves a code to its target URL.
    ///
    /// The code is matched verbatim and case-sensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::NotFound`] if no record has this code, including
    /// codes that could never have been allocated.
    pub async fn resolve(&self, code: &str) -> Result<String, ShortenError> {
        self.repository
            .find_by_code(code)
            .await?
            .map(|short_url| short_url.target_url)
            .ok_or_else(|| ShortenError::NotFound(code.to_string()))
    }

    /// Builds the public short link for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), code)
    }

    /// Draws random candidates until one is free.
    async fn next_available_code(&self, attempts: &mut u32) -> Result<String, ShortenError> {
        while *attempts < self.settings.max_attempts {
            *attempts += 1;
            let code = self.generator.generate(self.settings.code_length);

            if self.checker.is_available(&code, IdentifierKind::Code).await? {
                return Ok(code);
            }
        }

        Err(ShortenError::AllocationExhausted {
            attempts: *attempts,
        })
    }
}
