//! Pool filtering and session sampling.

use rand::Rng;
use rand::seq::SliceRandom;

use prep_core::model::{Difficulty, QuizQuestion};

/// Maximum number of questions drawn into one session.
pub const SESSION_SIZE: usize = 10;

/// Filter the composed pool by the quiz selectors (`None` = all).
#[must_use]
pub fn filter_pool<'a>(
    pool: &'a [QuizQuestion],
    topic: Option<&str>,
    difficulty: Option<Difficulty>,
) -> Vec<&'a QuizQuestion> {
    pool.iter()
        .filter(|question| {
            topic.is_none_or(|topic| question.topic == topic)
                && difficulty.is_none_or(|difficulty| question.difficulty == difficulty)
        })
        .collect()
}

/// Uniform Fisher–Yates shuffle, then take up to `SESSION_SIZE` questions
/// as the session's fixed-order list.
#[must_use]
pub fn sample_session<R: Rng + ?Sized>(
    rng: &mut R,
    candidates: Vec<&QuizQuestion>,
) -> Vec<QuizQuestion> {
    let mut shuffled = candidates;
    shuffled.shuffle(rng);
    shuffled
        .into_iter()
        .take(SESSION_SIZE)
        .cloned()
        .collect()
}

/// Distinct topics across the pool, sorted, for the quiz topic selector.
#[must_use]
pub fn pool_topics(pool: &[QuizQuestion]) -> Vec<String> {
    let mut topics: Vec<String> = pool.iter().map(|question| question.topic.clone()).collect();
    topics.sort();
    topics.dedup();
    topics
}
