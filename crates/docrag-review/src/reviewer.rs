//! The review flow: prompt assembly, LLM call, and the CI fallback report.

use docrag_llm::{LlmError, LlmProvider, Message};

use crate::config::ReviewConfig;
use crate::error::Result;
use crate::prompt::build_review_prompt;

/// Runs AI code review through any [`LlmProvider`].
pub struct ReviewAssistant<P> {
    provider: P,
    config: ReviewConfig,
}

impl<P: LlmProvider> ReviewAssistant<P> {
    #[must_use]
    pub fn new(provider: P, config: ReviewConfig) -> Self {
        Self { provider, config }
    }

    #[must_use]
    pub fn config(&self) -> &ReviewConfig {
        &self.config
    }

    /// Build the review prompt and return the model's review markdown.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider call fails; callers can render
    /// [`render_error_report`] instead of a review.
    pub async fn review(
        &self,
        diff: &str,
        file_contents: &str,
        pr_info: &str,
        project_context: &str,
    ) -> Result<String> {
        let prompt = build_review_prompt(diff, file_contents, pr_info, project_context);
        tracing::info!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "requesting code review"
        );
        let review = self.provider.chat(&[Message::user(prompt)]).await?;
        Ok(review)
    }
}

/// Fallback markdown the CI job posts when the review call fails.
#[must_use]
pub fn render_error_report(err: &LlmError) -> String {
    format!(
        "# AI Review Failed\n\n\
         The code review could not be completed:\n\n\
         ```\n{err}\n```\n\n\
         Please check:\n\
         1. `ANTHROPIC_API_KEY` in the repository secrets\n\
         2. API quota\n\
         3. CI logs for details\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_llm::Role;
    use std::sync::Mutex;

    struct RecordingProvider {
        reply: &'static str,
        seen: Mutex<Vec<Message>>,
    }

    impl LlmProvider for RecordingProvider {
        async fn chat(&self, messages: &[Message]) -> docrag_llm::Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(self.reply.to_string())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct FailingProvider;

    impl LlmProvider for FailingProvider {
        async fn chat(&self, _messages: &[Message]) -> docrag_llm::Result<String> {
            Err(LlmError::RateLimited)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[tokio::test]
    async fn review_sends_single_user_message() {
        let provider = RecordingProvider {
            reply: "looks good",
            seen: Mutex::new(Vec::new()),
        };
        let assistant = ReviewAssistant::new(provider, ReviewConfig::default());

        let review = assistant
            .review("diff body", "file body", "PR #7", "docs body")
            .await
            .unwrap();
        assert_eq!(review, "looks good");

        let seen = assistant.provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].role, Role::User);
        assert!(seen[0].content.contains("diff body"));
        assert!(seen[0].content.contains("PR #7"));
    }

    #[tokio::test]
    async fn review_propagates_provider_error() {
        let assistant = ReviewAssistant::new(FailingProvider, ReviewConfig::default());
        let err = assistant.review("", "", "", "").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::ReviewError::Llm(LlmError::RateLimited)
        ));
    }

    #[test]
    fn error_report_names_usual_causes() {
        let report = render_error_report(&LlmError::RateLimited);
        assert!(report.contains("# AI Review Failed"));
        assert!(report.contains("rate limited"));
        assert!(report.contains("ANTHROPIC_API_KEY"));
        assert!(report.contains("CI logs"));
    }
}
