//! Score and per-category breakdown for a quiz session.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Question, QuizSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    NeedsImprovement,
}

impl Grade {
    pub fn from_percent(percent: u32) -> Self {
        match percent {
            90.. => Grade::Excellent,
            80..=89 => Grade::VeryGood,
            70..=79 => Grade::Good,
            60..=69 => Grade::Satisfactory,
            _ => Grade::NeedsImprovement,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "Excellent",
            Grade::VeryGood => "Very Good",
            Grade::Good => "Good",
            Grade::Satisfactory => "Satisfactory",
            Grade::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: String,
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
    pub percent: u32,
    /// Weakest category first.
    pub categories: Vec<CategoryScore>,
}

impl Score {
    pub fn grade(&self) -> Grade {
        Grade::from_percent(self.percent)
    }

    pub fn wrong(&self) -> usize {
        self.total - self.correct
    }
}

/// Rounded percentage, 0 when there is nothing to score.
pub fn percent(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

pub fn score_session(session: &QuizSession) -> Score {
    score_answers(session.questions(), |q| session.answer_for(&q.id))
}

/// Score `questions` given a lookup for the chosen option of each one.
pub fn score_answers<'a, F>(questions: &[Question], answer_for: F) -> Score
where
    F: Fn(&Question) -> Option<&'a str>,
{
    let mut by_category: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    let mut correct = 0;

    for question in questions {
        let is_correct = answer_for(question).is_some_and(|a| question.is_correct(a));
        let entry = by_category.entry(question.category.as_str()).or_insert((0, 0));
        entry.1 += 1;
        if is_correct {
            entry.0 += 1;
            correct += 1;
        }
    }

    let mut categories: Vec<CategoryScore> = by_category
        .into_iter()
        .map(|(category, (correct, total))| CategoryScore {
            category: category.to_string(),
            correct,
            total,
            percent: percent(correct, total),
        })
        .collect();
    // Stable sort keeps the alphabetical order from the BTreeMap for ties.
    categories.sort_by_key(|c| c.percent);

    Score {
        correct,
        total: questions.len(),
        percent: percent(correct, questions.len()),
        categories,
    }
}
