use std::sync::Arc;
use std::time::Duration;

use super::prompts::{
    EXPLANATION_MAX_TOKENS, EXPLANATION_SYSTEM_PROMPT, STUDY_GUIDE_MAX_TOKENS,
    STUDY_GUIDE_SYSTEM_PROMPT, explanation_prompt, study_guide_prompt,
};
use super::{TextGenerator, generate_within};
use crate::QuizError;
use crate::models::WrongAnswer;

/// Upper bound on missed questions sent in one study-guide prompt.
pub const MAX_STUDY_GUIDE_QUESTIONS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorTimeouts {
    pub explanation: Duration,
    pub study_guide: Duration,
}

impl Default for TutorTimeouts {
    fn default() -> Self {
        Self {
            explanation: Duration::from_secs(25),
            study_guide: Duration::from_secs(45),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyGuide {
    pub text: String,
    pub questions_processed: usize,
    pub total_wrong_questions: usize,
}

impl StudyGuide {
    /// Whether some missed questions were left out of the guide.
    pub fn is_truncated(&self) -> bool {
        self.questions_processed < self.total_wrong_questions
    }
}

/// Turns quiz state into prompts and forwards them to a [`TextGenerator`].
#[derive(Clone)]
pub struct Tutor {
    generator: Arc<dyn TextGenerator>,
    timeouts: TutorTimeouts,
}

impl Tutor {
    pub fn new(generator: Arc<dyn TextGenerator>, timeouts: TutorTimeouts) -> Self {
        Self {
            generator,
            timeouts,
        }
    }

    pub fn timeouts(&self) -> TutorTimeouts {
        self.timeouts
    }

    /// Explain why `correct_answer` is the right choice for `question`.
    pub async fn explain(
        &self,
        question: &str,
        options: &[String],
        correct_answer: &str,
    ) -> Result<String, QuizError> {
        if question.trim().is_empty() {
            return Err(QuizError::Validation("question text is required".to_string()));
        }
        if options.is_empty() {
            return Err(QuizError::Validation("options are required".to_string()));
        }

        let prompt = explanation_prompt(question, options, correct_answer);
        let explanation = generate_within(
            self.generator.as_ref(),
            &prompt,
            EXPLANATION_SYSTEM_PROMPT,
            EXPLANATION_MAX_TOKENS,
            self.timeouts.explanation,
        )
        .await?;

        Ok(explanation)
    }

    /// Build a study guide for the missed questions of a finished quiz.
    ///
    /// Only the first [`MAX_STUDY_GUIDE_QUESTIONS`] entries are sent; the
    /// returned guide reports how many were used out of how many supplied.
    pub async fn study_guide(
        &self,
        wrong_questions: &[WrongAnswer],
        score: u32,
        total_questions: usize,
    ) -> Result<StudyGuide, QuizError> {
        if wrong_questions.is_empty() {
            return Err(QuizError::Validation("No wrong questions provided".to_string()));
        }

        let shown = &wrong_questions[..wrong_questions.len().min(MAX_STUDY_GUIDE_QUESTIONS)];
        if shown.len() < wrong_questions.len() {
            tracing::info!(
                supplied = wrong_questions.len(),
                processed = shown.len(),
                "truncating study guide input"
            );
        }

        let prompt = study_guide_prompt(shown, wrong_questions.len(), score, total_questions);
        let text = generate_within(
            self.generator.as_ref(),
            &prompt,
            STUDY_GUIDE_SYSTEM_PROMPT,
            STUDY_GUIDE_MAX_TOKENS,
            self.timeouts.study_guide,
        )
        .await?;

        Ok(StudyGuide {
            text,
            questions_processed: shown.len(),
            total_wrong_questions: wrong_questions.len(),
        })
    }
}
