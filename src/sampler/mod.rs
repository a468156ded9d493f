//! Question selection.
//!
//! Two composable policies sit behind [`sample`]:
//!
//! - [`balanced_by_category`] spreads a target count evenly over the
//!   categories present in a pool.
//! - [`with_jurisdiction_quota`] reserves a fixed share of the quiz for one
//!   state's questions and fills the rest with general ones, balancing each
//!   part by category.
//!
//! Every returned question carries a freshly shuffled option order. All
//! shuffles are Fisher–Yates via [`SliceRandom`]. Nothing here fails: an
//! empty store or an oversized request simply yields fewer questions.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::QuestionStore;
use crate::models::{Jurisdiction, Question};

/// Fraction of a state-filtered quiz drawn from that state's questions.
pub const JURISDICTION_SHARE: f64 = 0.3;

/// Draw `count` questions from the store using fresh entropy.
///
/// With `Some(state)` the quiz follows [`with_jurisdiction_quota`];
/// `None` (or `Some(Jurisdiction::General)`) balances the whole store by
/// category. The result has exactly `min(count, store.len())` questions.
pub fn sample(store: &QuestionStore, count: usize, jurisdiction: Option<Jurisdiction>) -> Vec<Question> {
    sample_with_rng(store.questions(), count, jurisdiction, &mut rand::thread_rng())
}

pub fn sample_with_rng<R: Rng + ?Sized>(
    questions: &[Question],
    count: usize,
    jurisdiction: Option<Jurisdiction>,
    rng: &mut R,
) -> Vec<Question> {
    let count = count.min(questions.len());
    if count == 0 {
        return Vec::new();
    }

    let pool: Vec<&Question> = questions.iter().collect();

    let selected = match jurisdiction {
        Some(state) if state != Jurisdiction::General => {
            with_jurisdiction_quota(&pool, count, state, rng)
        }
        _ => {
            let mut selected = balanced_by_category(&pool, count, rng);
            top_up(&mut selected, &pool, count, rng);
            selected.shuffle(rng);
            selected
        }
    };

    tracing::debug!(
        requested = count,
        returned = selected.len(),
        jurisdiction = ?jurisdiction,
        "sampled questions"
    );

    selected
        .into_iter()
        .map(|question| shuffle_options(question, rng))
        .collect()
}

/// Pick up to `count` questions spread evenly over the pool's categories.
///
/// Each of the `C` categories gets `count / C` questions; the remaining
/// `count % C` go one apiece to the first categories of a shuffled category
/// order. A category holding fewer questions than its allocation contributes
/// all it has and the shortfall is not handed to other categories, so the
/// result may be shorter than `count` even when the pool is large enough.
pub fn balanced_by_category<'a, R: Rng + ?Sized>(
    pool: &[&'a Question],
    count: usize,
    rng: &mut R,
) -> Vec<&'a Question> {
    let mut by_category: BTreeMap<&str, Vec<&'a Question>> = BTreeMap::new();
    for question in pool {
        by_category
            .entry(question.category.as_str())
            .or_default()
            .push(question);
    }

    if by_category.is_empty() || count == 0 {
        return Vec::new();
    }

    let per_category = count / by_category.len();
    let remainder = count % by_category.len();

    let mut categories: Vec<Vec<&'a Question>> = by_category.into_values().collect();
    categories.shuffle(rng);

    let mut selected = Vec::with_capacity(count.min(pool.len()));
    for (index, mut candidates) in categories.into_iter().enumerate() {
        let take = per_category + usize::from(index < remainder);
        candidates.shuffle(rng);
        candidates.truncate(take);
        selected.extend(candidates);
    }

    selected
}

/// Build a quiz for one state: about 30% state questions, the rest general.
///
/// Both parts are balanced by category. If either part runs short the quiz
/// is topped up from any unused question in the pool, regardless of
/// jurisdiction, and the combined list is shuffled so state and general
/// questions interleave.
pub fn with_jurisdiction_quota<'a, R: Rng + ?Sized>(
    pool: &[&'a Question],
    count: usize,
    jurisdiction: Jurisdiction,
    rng: &mut R,
) -> Vec<&'a Question> {
    let state_count = jurisdiction_count(count);
    let general_count = count - state_count;

    let state_pool: Vec<&'a Question> = pool
        .iter()
        .copied()
        .filter(|q| q.jurisdiction == jurisdiction)
        .collect();
    let general_pool: Vec<&'a Question> = pool
        .iter()
        .copied()
        .filter(|q| q.jurisdiction == Jurisdiction::General)
        .collect();

    let mut selected = balanced_by_category(&state_pool, state_count, rng);
    selected.extend(balanced_by_category(&general_pool, general_count, rng));

    top_up(&mut selected, pool, count, rng);
    selected.shuffle(rng);
    selected.truncate(count);
    selected
}

/// Number of state-specific questions in a state-filtered quiz of `count`.
pub fn jurisdiction_count(count: usize) -> usize {
    (count as f64 * JURISDICTION_SHARE).round() as usize
}

/// Return a copy of `question` with its options in a uniformly random order.
pub fn shuffle_options<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> Question {
    let mut shuffled = question.clone();
    shuffled.options.shuffle(rng);
    shuffled
}

/// Fill `selected` up to `count` with random unused questions from `pool`.
fn top_up<'a, R: Rng + ?Sized>(
    selected: &mut Vec<&'a Question>,
    pool: &[&'a Question],
    count: usize,
    rng: &mut R,
) {
    if selected.len() >= count {
        return;
    }

    let used: HashSet<&str> = selected.iter().map(|q| q.id.as_str()).collect();
    let mut remaining: Vec<&'a Question> = pool
        .iter()
        .copied()
        .filter(|q| !used.contains(q.id.as_str()))
        .collect();
    remaining.shuffle(rng);

    let needed = count - selected.len();
    selected.extend(remaining.into_iter().take(needed));
}
