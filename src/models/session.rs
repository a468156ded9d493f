//! Client-held quiz session.
//!
//! A session is created from a sampled question set and owned by whoever
//! drives the quiz. Nothing here is shared or persisted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::Question;

/// Reasons a session rejects an update.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no question with id {0} in this quiz")]
    UnknownQuestion(String),
    #[error("\"{option}\" is not an option of question {question_id}")]
    UnknownOption { question_id: String, option: String },
    #[error("quiz has already been submitted")]
    AlreadySubmitted,
    #[error("{remaining} question(s) still unanswered")]
    Incomplete { remaining: usize },
}

/// A missed question paired with what the user picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub question: Question,
    #[serde(default)]
    pub user_answer: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Unique session ID.
    pub id: Uuid,
    questions: Vec<Question>,
    answers: HashMap<String, String>,
    submitted: bool,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            questions,
            answers: HashMap::new(),
            submitted: false,
        }
    }

    /// First eight hex digits of the session id, for display.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Record (or change) the answer for a question.
    pub fn select_answer(&mut self, question_id: &str, option: &str) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }

        let question = self
            .questions
            .iter()
            .find(|q| q.id == question_id)
            .ok_or_else(|| SessionError::UnknownQuestion(question_id.to_string()))?;

        if !question.has_option(option) {
            return Err(SessionError::UnknownOption {
                question_id: question_id.to_string(),
                option: option.to_string(),
            });
        }

        self.answers
            .insert(question_id.to_string(), option.to_string());
        Ok(())
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.questions.len()
    }

    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (100.0 * self.answered_count() as f64 / self.questions.len() as f64).round() as u32
    }

    /// Lock the session. Every question must have an answer.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        if self.submitted {
            return Err(SessionError::AlreadySubmitted);
        }
        let remaining = self.questions.len() - self.answered_count();
        if remaining > 0 {
            return Err(SessionError::Incomplete { remaining });
        }
        self.submitted = true;
        Ok(())
    }

    /// Whether the recorded answer for `question` matches its correct answer.
    pub fn is_correct(&self, question: &Question) -> bool {
        self.answer_for(&question.id)
            .is_some_and(|answer| question.is_correct(answer))
    }

    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| self.is_correct(q)).count()
    }

    /// Missed or unanswered questions, in quiz order.
    pub fn wrong_answers(&self) -> Vec<WrongAnswer> {
        self.questions
            .iter()
            .filter(|q| !self.is_correct(q))
            .map(|q| WrongAnswer {
                question: q.clone(),
                user_answer: self.answer_for(&q.id).map(str::to_string),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Jurisdiction;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: vec!["right".to_string(), "wrong".to_string()],
            correct_answer: "right".to_string(),
            jurisdiction: Jurisdiction::General,
            category: "Basics".to_string(),
        }
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let first = QuizSession::new(vec![question("a")]);
        let second = QuizSession::new(vec![question("a")]);

        assert_ne!(first.id, second.id);
        assert_eq!(first.short_id().len(), 8);
        assert!(first.id.simple().to_string().starts_with(&first.short_id()));
    }

    #[test]
    fn test_select_and_change_answer() {
        let mut session = QuizSession::new(vec![question("a"), question("b")]);

        session.select_answer("a", "wrong").unwrap();
        session.select_answer("a", "right").unwrap();

        assert_eq!(session.answer_for("a"), Some("right"));
        assert_eq!(session.answered_count(), 1);
        assert_eq!(session.progress_percent(), 50);
    }

    #[test]
    fn test_rejects_foreign_question_and_option() {
        let mut session = QuizSession::new(vec![question("a")]);

        assert_eq!(
            session.select_answer("zzz", "right"),
            Err(SessionError::UnknownQuestion("zzz".to_string()))
        );
        assert!(matches!(
            session.select_answer("a", "maybe"),
            Err(SessionError::UnknownOption { .. })
        ));
    }

    #[test]
    fn test_submit_requires_all_answers() {
        let mut session = QuizSession::new(vec![question("a"), question("b")]);
        session.select_answer("a", "right").unwrap();

        assert_eq!(session.submit(), Err(SessionError::Incomplete { remaining: 1 }));

        session.select_answer("b", "wrong").unwrap();
        session.submit().unwrap();

        assert!(session.is_submitted());
        assert_eq!(
            session.select_answer("b", "right"),
            Err(SessionError::AlreadySubmitted)
        );
    }

    #[test]
    fn test_wrong_answers_include_unanswered() {
        let mut session = QuizSession::new(vec![question("a"), question("b"), question("c")]);
        session.select_answer("a", "right").unwrap();
        session.select_answer("b", "wrong").unwrap();

        let wrong = session.wrong_answers();
        assert_eq!(wrong.len(), 2);
        assert_eq!(wrong[0].question.id, "b");
        assert_eq!(wrong[0].user_answer.as_deref(), Some("wrong"));
        assert_eq!(wrong[1].question.id, "c");
        assert_eq!(wrong[1].user_answer, None);
        assert_eq!(session.correct_count(), 1);
    }
}
