//! The in-memory quiz session state machine and its persisted snapshot.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use prep_core::evaluate::{self, Evaluation};
use prep_core::model::{Difficulty, QuizQuestion, ScoreRating};

use crate::error::QuizError;

/// Outcome of one answer submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub submitted: f64,
    pub expected: f64,
    pub unit: String,
    /// Whether this submission earned the point (first correct answer for
    /// this question id in the session).
    pub first_credit: bool,
    pub score: u32,
}

/// Completion report computed when the session advances past its pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    pub score: u32,
    pub total: usize,
    pub percentage: u32,
    pub rating: ScoreRating,
}

/// A running quiz: the sampled fixed-order pool, the cursor, and the
/// idempotent score ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    selected_topic: Option<String>,
    selected_difficulty: Option<Difficulty>,
    pool: Vec<QuizQuestion>,
    current: usize,
    score: u32,
    scored_ids: HashSet<String>,
    answered: bool,
}

impl QuizSession {
    /// Build a fresh session over an already-sampled pool.
    ///
    /// The caller guarantees a non-empty pool (an empty selection aborts
    /// before a session exists).
    pub(crate) fn new(
        selected_topic: Option<String>,
        selected_difficulty: Option<Difficulty>,
        pool: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            selected_topic,
            selected_difficulty,
            pool,
            current: 0,
            score: 0,
            scored_ids: HashSet::new(),
            answered: false,
        }
    }

    #[must_use]
    pub fn selected_topic(&self) -> Option<&str> {
        self.selected_topic.as_deref()
    }

    #[must_use]
    pub fn selected_difficulty(&self) -> Option<Difficulty> {
        self.selected_difficulty
    }

    #[must_use]
    pub fn pool(&self) -> &[QuizQuestion] {
        &self.pool
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.pool.get(self.current)
    }

    /// The cursor has moved past the last question.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current >= self.pool.len()
    }

    /// Grade a raw submission against the current question.
    ///
    /// A correct answer earns the point only the first time that question
    /// id is marked correct in this session; retries never double count.
    ///
    /// # Errors
    ///
    /// `QuizError::Locked` if the question was already answered,
    /// `QuizError::Completed` past the end of the pool, and
    /// `QuizError::InvalidAnswer` for unparseable input. Invalid input
    /// leaves every piece of session state untouched.
    pub fn submit(&mut self, input: &str) -> Result<SubmitOutcome, QuizError> {
        if self.answered {
            return Err(QuizError::Locked);
        }
        let question = self.pool.get(self.current).ok_or(QuizError::Completed)?;

        let Evaluation { submitted, correct } = evaluate::evaluate(input, question)?;

        self.answered = true;
        let mut first_credit = false;
        if correct && self.scored_ids.insert(question.id.clone()) {
            self.score += 1;
            first_credit = true;
        }

        Ok(SubmitOutcome {
            correct,
            submitted,
            expected: question.answer,
            unit: question.unit.clone(),
            first_credit,
            score: self.score,
        })
    }

    /// Move to the next question, unlocking input.
    pub fn advance(&mut self) {
        if self.current < self.pool.len() {
            self.current += 1;
        }
        self.answered = false;
    }

    /// Unlock the current question for another attempt. Credit already
    /// earned is kept, so a second correct answer scores nothing new.
    pub fn retry_current(&mut self) {
        self.answered = false;
    }

    /// The completion report, once the cursor has passed the pool.
    #[must_use]
    pub fn report(&self) -> Option<QuizReport> {
        if !self.is_complete() || self.pool.is_empty() {
            return None;
        }
        let total = self.pool.len();
        let percentage = (f64::from(self.score) / total as f64 * 100.0).round() as u32;
        Some(QuizReport {
            score: self.score,
            total,
            percentage,
            rating: ScoreRating::from_percentage(percentage),
        })
    }

    /// Snapshot for the persistence slot.
    #[must_use]
    pub fn to_saved(&self, timestamp: DateTime<Utc>) -> SavedSession {
        SavedSession {
            selected_topic: self
                .selected_topic
                .clone()
                .unwrap_or_else(|| "all".to_string()),
            selected_difficulty: self
                .selected_difficulty
                .map_or("all", |difficulty| difficulty.as_str())
                .to_string(),
            current_index: self.current,
            score: self.score,
            question_ids: self.pool.iter().map(|q| q.id.clone()).collect(),
            questions: self.pool.clone(),
            scored_question_ids: self.scored_ids.iter().cloned().collect(),
            timestamp,
        }
    }

    /// Rebuild a session from a saved payload.
    ///
    /// Embedded question snapshots are preferred; when absent, ids are
    /// resolved against the freshly composed `pool` (this guards against
    /// question-bank edits between sessions). Returns `None` when neither
    /// resolves any questions, in which case the caller falls back to the
    /// start screen.
    #[must_use]
    pub fn restore(saved: SavedSession, pool: &[QuizQuestion]) -> Option<Self> {
        let mut questions = saved.questions;
        if questions.is_empty() {
            let by_id: HashMap<&str, &QuizQuestion> =
                pool.iter().map(|q| (q.id.as_str(), q)).collect();
            questions = saved
                .question_ids
                .iter()
                .filter_map(|id| by_id.get(id.as_str()).copied().cloned())
                .collect();
        }
        if questions.is_empty() {
            return None;
        }

        let current = saved.current_index.min(questions.len() - 1);
        Some(Self {
            selected_topic: parse_all_token(saved.selected_topic),
            selected_difficulty: saved.selected_difficulty.parse().ok(),
            pool: questions,
            current,
            score: saved.score,
            scored_ids: saved.scored_question_ids.into_iter().collect(),
            answered: false,
        })
    }
}

fn parse_all_token(raw: String) -> Option<String> {
    if raw == "all" { None } else { Some(raw) }
}

/// Persisted session payload for the quiz slot.
///
/// Field names match the browser export format of earlier releases, so
/// previously saved state remains readable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSession {
    pub selected_topic: String,
    pub selected_difficulty: String,
    pub current_index: usize,
    pub score: u32,
    pub question_ids: Vec<String>,
    #[serde(default)]
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub scored_question_ids: Vec<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prep_core::time::fixed_now;

    fn question(id: &str, answer: f64, tolerance: f64) -> QuizQuestion {
        QuizQuestion {
            id: id.to_string(),
            topic: "Pipe Flow".to_string(),
            difficulty: Difficulty::Medium,
            question: format!("Question {id}"),
            hint: String::new(),
            solution: String::new(),
            answer,
            tolerance,
            unit: "L/s".to_string(),
            key_formula: None,
            image: None,
            solution_image: None,
        }
    }

    fn session() -> QuizSession {
        QuizSession::new(
            None,
            None,
            vec![
                question("a", 10.0, 0.5),
                question("b", 20.0, 0.5),
                question("c", 30.0, 0.5),
            ],
        )
    }

    #[test]
    fn correct_answer_scores_once_and_locks() {
        let mut quiz = session();

        let outcome = quiz.submit("10.2").unwrap();
        assert!(outcome.correct);
        assert!(outcome.first_credit);
        assert_eq!(outcome.score, 1);

        // Locked until next or retry.
        assert!(matches!(quiz.submit("10.2"), Err(QuizError::Locked)));
    }

    #[test]
    fn retry_after_correct_never_double_counts() {
        let mut quiz = session();

        assert!(quiz.submit("10.0").unwrap().correct);
        quiz.retry_current();
        let again = quiz.submit("10.0").unwrap();
        assert!(again.correct);
        assert!(!again.first_credit);
        assert_eq!(quiz.score(), 1);
    }

    #[test]
    fn invalid_input_mutates_nothing() {
        let mut quiz = session();

        assert!(matches!(
            quiz.submit("not a number"),
            Err(QuizError::InvalidAnswer(_))
        ));
        assert!(!quiz.answered());
        assert_eq!(quiz.score(), 0);

        // Still answerable afterwards.
        assert!(quiz.submit("10.0").unwrap().correct);
    }

    #[test]
    fn tolerance_boundary_is_accepted() {
        let mut quiz = session();
        assert!(quiz.submit("10.5").unwrap().correct);

        let mut quiz = session();
        assert!(!quiz.submit("10.51").unwrap().correct);
    }

    #[test]
    fn fraction_submissions_grade_correctly() {
        let mut quiz = QuizSession::new(None, None, vec![question("f", 0.75, 0.0)]);
        assert!(quiz.submit("3/4").unwrap().correct);
    }

    #[test]
    fn completion_report_rounds_percentage_and_rates() {
        let mut quiz = session();
        quiz.submit("10.0").unwrap();
        quiz.advance();
        quiz.submit("999").unwrap();
        quiz.advance();
        quiz.submit("30.0").unwrap();
        quiz.advance();

        assert!(quiz.is_complete());
        let report = quiz.report().unwrap();
        assert_eq!(report.score, 2);
        assert_eq!(report.total, 3);
        // 2/3 rounds to 67.
        assert_eq!(report.percentage, 67);
        assert_eq!(report.rating, ScoreRating::Good);
    }

    #[test]
    fn saved_round_trip_preserves_cursor_score_and_order() {
        let mut quiz = session();
        quiz.submit("10.0").unwrap();
        quiz.advance();

        let saved = quiz.to_saved(fixed_now());
        let payload = serde_json::to_string(&saved).unwrap();
        let decoded: SavedSession = serde_json::from_str(&payload).unwrap();
        let restored = QuizSession::restore(decoded, &[]).unwrap();

        assert_eq!(restored.current_index(), quiz.current_index());
        assert_eq!(restored.score(), quiz.score());
        let restored_ids: Vec<&str> = restored.pool().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(restored_ids, vec!["a", "b", "c"]);
        // Resume lands on an unlocked question.
        assert!(!restored.answered());

        // The credit ledger survives: finishing the restored session with
        // every answer correct yields 3 points, not 4.
        let mut restored = restored;
        restored.submit("20.0").unwrap();
        restored.advance();
        restored.submit("30.0").unwrap();
        restored.advance();
        assert_eq!(restored.report().unwrap().score, 3);
    }

    #[test]
    fn restore_falls_back_to_id_lookup() {
        let pool = vec![question("a", 10.0, 0.5), question("b", 20.0, 0.5)];
        let saved = SavedSession {
            selected_topic: "all".to_string(),
            selected_difficulty: "medium".to_string(),
            current_index: 1,
            score: 1,
            question_ids: vec!["b".to_string(), "missing".to_string()],
            questions: Vec::new(),
            scored_question_ids: vec!["b".to_string()],
            timestamp: fixed_now(),
        };

        let restored = QuizSession::restore(saved, &pool).unwrap();
        assert_eq!(restored.pool().len(), 1);
        assert_eq!(restored.pool()[0].id, "b");
        // The cursor clamps into the shrunken pool.
        assert_eq!(restored.current_index(), 0);
        assert_eq!(restored.selected_difficulty(), Some(Difficulty::Medium));
        assert_eq!(restored.selected_topic(), None);
    }

    #[test]
    fn restore_fails_silently_when_nothing_resolves() {
        let saved = SavedSession {
            selected_topic: "all".to_string(),
            selected_difficulty: "all".to_string(),
            current_index: 0,
            score: 0,
            question_ids: vec!["gone".to_string()],
            questions: Vec::new(),
            scored_question_ids: Vec::new(),
            timestamp: fixed_now(),
        };
        assert!(QuizSession::restore(saved, &[]).is_none());
    }

    #[test]
    fn payload_keeps_the_exported_field_names() {
        let quiz = session();
        let payload = serde_json::to_string(&quiz.to_saved(fixed_now())).unwrap();
        for field in [
            "selectedTopic",
            "selectedDifficulty",
            "currentIndex",
            "questionIds",
            "scoredQuestionIds",
            "timestamp",
        ] {
            assert!(payload.contains(field), "missing field {field}");
        }
    }
}
