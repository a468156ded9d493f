//! # insurance-quiz
//!
//! Randomized insurance-exam practice quizzes with AI explanations.
//!
//! The library is split the same way the binary is:
//!
//! - [`sampler`] draws category-balanced question sets from a
//!   [`QuestionStore`], optionally reserving a share for one state's exam.
//! - [`QuizSession`] and [`scoring`] hold and grade a user's answers.
//! - [`generation`] turns quiz state into prompts for a [`TextGenerator`].
//! - [`server`] exposes all of that over HTTP; [`client`] is a terminal
//!   front end for the HTTP API.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use insurance_quiz::{QuestionStore, QuizError, sampler};
//!
//! fn main() -> Result<(), QuizError> {
//!     let store = QuestionStore::from_json("data/questions.json")?;
//!     let quiz = sampler::sample(&store, 20, "CA".parse().ok());
//!     println!("{} questions", quiz.len());
//!     Ok(())
//! }
//! ```

pub mod client;
mod data;
pub mod generation;
mod models;
pub mod protocol;
pub mod sampler;
pub mod scoring;
pub mod server;
pub mod terminal;

use std::io;
use std::time::Duration;

use thiserror::Error;

pub use data::{DEFAULT_QUESTIONS_PATH, LoadError, QuestionStore};
pub use generation::{GenerationError, TextGenerator};
pub use models::{Jurisdiction, Question, QuizSession, SessionError, WrongAnswer};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Error loading questions from file.
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),
    /// IO error while running the server or terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Missing or malformed caller input.
    #[error("{0}")]
    Validation(String),
    /// Text generation exceeded its time bound.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    /// Any other text-generation fault.
    #[error("generation failed: {0}")]
    GenerationFailed(String),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl From<GenerationError> for QuizError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::Timeout(limit) => QuizError::Timeout(limit),
            GenerationError::Failed(reason) => QuizError::GenerationFailed(reason),
        }
    }
}
