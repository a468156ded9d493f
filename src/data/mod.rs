mod loader;

pub use loader::{DEFAULT_QUESTIONS_PATH, LoadError, QuestionStore};
