//! Request and response bodies shared by the HTTP server and client.
//!
//! All bodies are JSON with camelCase field names.

use serde::{Deserialize, Serialize};

use crate::models::{Jurisdiction, Question, WrongAnswer};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Questions served when `count` is omitted.
pub const DEFAULT_QUESTION_COUNT: i64 = 15;

/// Quiz sizes offered by the client.
pub const QUESTION_COUNT_CHOICES: [usize; 7] = [5, 10, 20, 50, 80, 100, 150];

/// Query string of `GET /questions`.
///
/// Fields stay as raw strings so malformed values produce a JSON error
/// body rather than the extractor's plain-text rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsQuery {
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub total_count: Option<String>,
}

impl QuestionsQuery {
    pub fn wants_total_count(&self) -> bool {
        self.total_count
            .as_deref()
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
    }

    /// Requested count; absent means [`DEFAULT_QUESTION_COUNT`].
    pub fn parse_count(&self) -> Result<i64, String> {
        match self.count.as_deref().map(str::trim) {
            None | Some("") => Ok(DEFAULT_QUESTION_COUNT),
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| format!("count must be an integer, got \"{}\"", raw)),
        }
    }

    /// Requested state filter. `Gen` is accepted and means no filter.
    pub fn parse_state(&self) -> Result<Option<Jurisdiction>, String> {
        match self.state.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => match raw.parse::<Jurisdiction>()? {
                Jurisdiction::General => Ok(None),
                state => Ok(Some(state)),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalCountResponse {
    pub total_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl From<&Question> for ExplainRequest {
    fn from(question: &Question) -> Self {
        Self {
            question: question.text.clone(),
            options: question.options.clone(),
            correct_answer: question.correct_answer.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGuideRequest {
    #[serde(default)]
    pub wrong_questions: Vec<WrongAnswer>,
    pub score: u32,
    pub total_questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyGuideResponse {
    pub study_guide: String,
    pub questions_processed: usize,
    pub total_wrong_questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub questions: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
