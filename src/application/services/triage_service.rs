//! CI log triage through an external completion model.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::completion::CompletionClient;
use crate::domain::entities::{FailureClassification, TriageReport, TriageRequest};
use crate::domain::errors::TriageError;

/// Instructions sent as the system prompt on every analysis.
pub const SYSTEM_PROMPT: &str = "You are a CI failure triage assistant. You analyze raw CI logs (from GitHub Actions or Jenkins) and extract structured information.

Your task is to:
1. Classify the failure as exactly one of: test_failure, lint_failure, infra_failure, config_failure, unknown.
2. Identify the step or job name where the failure likely occurred.
3. Pick the single most important error line from the log (the line that best explains the failure).
4. Write a clear, detailed explanation of why the failure happened.
5. Suggest a concrete next action for the developer.

Be concise but precise. Use the log content as the source of truth. If the log is empty or you cannot determine the failure, use classification \"unknown\" and explain that in the explanation.";

const DEFAULT_FAILING_STEP: &str = "Unknown";
const DEFAULT_EXPLANATION: &str = "No explanation could be extracted.";
const DEFAULT_SUGGESTED_ACTION: &str = "Review the full log and retry.";

/// Forwards pasted CI logs to a completion model and reshapes the reply.
///
/// The model's reply is untrusted: every field is read defensively and
/// replaced with a placeholder when missing, blank or not a string.
pub struct TriageService {
    client: Option<Arc<dyn CompletionClient>>,
}

impl TriageService {
    /// Creates a triage service. `None` means no provider is configured and
    /// every analysis fails with [`TriageError::NotConfigured`].
    pub fn new(client: Option<Arc<dyn CompletionClient>>) -> Self {
        Self { client }
    }

    /// Returns true if a completion provider is configured.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Analyzes a CI log.
    ///
    /// # Errors
    ///
    /// - [`TriageError::EmptyLog`] if the log is blank
    /// - [`TriageError::NotConfigured`] if no provider is configured
    /// - [`TriageError::Completion`] if the provider call fails
    pub async fn analyze(&self, request: &TriageRequest) -> Result<TriageReport, TriageError> {
        if request.log_content.trim().is_empty() {
            return Err(TriageError::EmptyLog);
        }

        let client = self.client.as_ref().ok_or(TriageError::NotConfigured)?;

        let reply = client
            .complete_json(SYSTEM_PROMPT, &build_user_message(request))
            .await?;

        Ok(normalize_reply(&reply))
    }
}

/// Renders the user message: optional context lines followed by the log.
pub fn build_user_message(request: &TriageRequest) -> String {
    let mut message = String::from(
        "Analyze this CI log and return a JSON object with: classification, failing_step, key_error_line, explanation, suggested_action.\n\n",
    );

    if let Some(provider) = request.ci_provider {
        message.push_str(&format!("CI provider: {provider}\n"));
    }
    if let Some(step) = request.step_name.as_deref().filter(|s| !s.is_empty()) {
        message.push_str(&format!("Step name: {step}\n"));
    }
    if let Some(exit_code) = request.exit_code {
        message.push_str(&format!("Exit code: {exit_code}\n"));
    }

    message.push_str("\n--- Log ---\n");
    if request.log_content.is_empty() {
        message.push_str("(empty log)");
    } else {
        message.push_str(&request.log_content);
    }
    message.push_str("\n--- End log ---");

    message
}

/// Maps a raw model reply onto a fully populated [`TriageReport`].
pub fn normalize_reply(reply: &Value) -> TriageReport {
    let classification = text_field(reply, "classification")
        .map(FailureClassification::from_label)
        .unwrap_or(FailureClassification::Unknown);

    TriageReport {
        classification,
        failing_step: text_field(reply, "failing_step")
            .unwrap_or(DEFAULT_FAILING_STEP)
            .to_string(),
        key_error_line: text_field(reply, "key_error_line")
            .unwrap_or_default()
            .to_string(),
        explanation: text_field(reply, "explanation")
            .unwrap_or(DEFAULT_EXPLANATION)
            .to_string(),
        suggested_action: text_field(reply, "suggested_action")
            .unwrap_or(DEFAULT_SUGGESTED_ACTION)
            .to_string(),
    }
}

/// Trimmed string value of `key`, or `None` if absent, blank or not a string.
fn text_field<'a>(reply: &'a Value, key: &str) -> Option<&'a str> {
    reply
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
