mod question;
mod session;

pub use question::{Jurisdiction, Question};
pub use session::{QuizSession, SessionError, WrongAnswer};
