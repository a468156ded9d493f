//! Text-generation capability and the requesters built on it.
//!
//! The model behind [`TextGenerator`] is opaque: a prompt goes in, text or a
//! failure comes out. Callers bound every call with [`generate_within`] so a
//! slow upstream surfaces as [`GenerationError::Timeout`] instead of hanging.

mod format;
mod openai;
mod prompts;
mod tutor;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use format::{GuideLine, format_study_guide};
pub use openai::{DEFAULT_API_BASE, DEFAULT_MODEL, DisabledGenerator, OpenAiGenerator};
pub use prompts::{
    EXPLANATION_MAX_TOKENS, EXPLANATION_SYSTEM_PROMPT, STUDY_GUIDE_MAX_TOKENS,
    STUDY_GUIDE_SYSTEM_PROMPT, explanation_prompt, study_guide_prompt,
};
pub use tutor::{MAX_STUDY_GUIDE_QUESTIONS, StudyGuide, Tutor, TutorTimeouts};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The call did not finish within its bound. Callers may retry.
    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),
    /// Network failure, upstream error, or an unusable response.
    #[error("text generation failed: {0}")]
    Failed(String),
}

impl GenerationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, GenerationError::Timeout(_))
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        max_tokens: u32,
    ) -> Result<String, GenerationError>;
}

/// Run one generation call, giving up after `limit`.
///
/// On timeout the in-flight call is dropped, which cancels the underlying
/// request. Dropping the returned future does the same.
pub async fn generate_within(
    generator: &dyn TextGenerator,
    prompt: &str,
    system_prompt: &str,
    max_tokens: u32,
    limit: Duration,
) -> Result<String, GenerationError> {
    match tokio::time::timeout(limit, generator.generate(prompt, system_prompt, max_tokens)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(limit_ms = limit.as_millis() as u64, "text generation timed out");
            Err(GenerationError::Timeout(limit))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Generator with a scripted outcome that records the prompts it receives.
    pub struct StubGenerator {
        pub reply: Result<String, GenerationError>,
        pub delay: Duration,
        pub prompts: Mutex<Vec<(String, String, u32)>>,
    }

    impl StubGenerator {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                reply: Err(GenerationError::Failed(message.to_string())),
                delay: Duration::ZERO,
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::replying("too late")
            }
        }

        pub fn last_prompt(&self) -> Option<(String, String, u32)> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(
            &self,
            prompt: &str,
            system_prompt: &str,
            max_tokens: u32,
        ) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push((
                prompt.to_string(),
                system_prompt.to_string(),
                max_tokens,
            ));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.reply.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::testing::StubGenerator;
    use super::*;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let generator = StubGenerator::replying("hello");
        let text = generate_within(&generator, "p", "s", 10, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(text, "hello");
        assert_eq!(generator.last_prompt(), Some(("p".into(), "s".into(), 10)));
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let generator = StubGenerator::slow(Duration::from_secs(5));
        let err = generate_within(&generator, "p", "s", 10, Duration::from_millis(20))
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::Timeout(Duration::from_millis(20)));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn test_failure_is_not_a_timeout() {
        let generator = StubGenerator::failing("boom");
        let err = generate_within(&generator, "p", "s", 10, Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(!err.is_timeout());
        assert_eq!(err, GenerationError::Failed("boom".to_string()));
    }
}
