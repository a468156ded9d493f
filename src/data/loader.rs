use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::models::Question;

pub const DEFAULT_QUESTIONS_PATH: &str = "data/questions.json";

/// Errors raised while loading the question file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("question {id} is invalid: {reason}")]
    InvalidQuestion { id: String, reason: String },
    #[error("question id {0} appears more than once")]
    DuplicateId(String),
}

/// Read-only collection of every question the quiz can draw from.
///
/// Cloning is cheap; clones share the same backing slice.
#[derive(Debug, Clone, Default)]
pub struct QuestionStore {
    questions: Arc<[Question]>,
}

impl QuestionStore {
    /// Build a store from already-parsed questions, validating each record.
    pub fn new(questions: Vec<Question>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            validate_question(question)?;
            if !seen.insert(question.id.as_str()) {
                return Err(LoadError::DuplicateId(question.id.clone()));
            }
        }

        Ok(Self {
            questions: questions.into(),
        })
    }

    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();

        let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let questions: Vec<Question> =
            serde_json::from_str(&json_content).map_err(|source| LoadError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        if questions.is_empty() {
            tracing::warn!(path = %path.display(), "question file is empty");
        }

        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

fn validate_question(question: &Question) -> Result<(), LoadError> {
    let invalid = |reason: &str| LoadError::InvalidQuestion {
        id: question.id.clone(),
        reason: reason.to_string(),
    };

    if question.id.trim().is_empty() {
        return Err(invalid("id is empty"));
    }
    if question.text.trim().is_empty() {
        return Err(invalid("text is empty"));
    }
    if question.options.len() < 2 {
        return Err(invalid("needs at least two options"));
    }

    let distinct: HashSet<&str> = question.options.iter().map(String::as_str).collect();
    if distinct.len() != question.options.len() {
        return Err(invalid("options must be distinct"));
    }
    if !distinct.contains(question.correct_answer.as_str()) {
        return Err(invalid("correct answer is not one of the options"));
    }

    Ok(())
}
