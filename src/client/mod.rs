//! Terminal client for the quiz API.
//!
//! Runs a quiz fetched from a `serve` instance, keeps answers locally in a
//! [`QuizSession`](crate::QuizSession), and asks the server for explanations
//! and a study guide.

mod api;
mod client;
mod state;
mod ui;

pub use api::{ClientError, QuizApiClient};
pub use client::run;
