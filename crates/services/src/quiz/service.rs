//! Orchestrates the quiz: pool composition, the active session, and the
//! persistence slot that is rewritten after every state-affecting action.

use std::sync::Arc;

use prep_core::Clock;
use prep_core::model::{Difficulty, QuizQuestion};
use storage::repository::KeyValueStore;

use super::generator::generate_dynamic_questions;
use super::pool::{filter_pool, pool_topics, sample_session};
use super::session::{QuizReport, QuizSession, SavedSession, SubmitOutcome};
use crate::error::QuizError;

/// Storage slot for the persisted quiz session.
pub const QUIZ_SLOT_KEY: &str = "quizProgressV2";

/// Owns the composed question pool for the page lifetime, the active
/// session, and the progress slot.
pub struct QuizService {
    pool: Vec<QuizQuestion>,
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
    session: Option<QuizSession>,
}

impl QuizService {
    /// Compose the lifetime pool: the static feed questions plus one batch
    /// of freshly generated problems. Composition happens once; later
    /// sessions sample from this same pool.
    #[must_use]
    pub fn new(
        static_questions: Vec<QuizQuestion>,
        clock: Clock,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let mut pool = static_questions;
        let mut rng = rand::rng();
        pool.extend(generate_dynamic_questions(&mut rng));
        Self {
            pool,
            clock,
            store,
            session: None,
        }
    }

    /// Distinct topics across the pool, for the quiz topic selector.
    #[must_use]
    pub fn topics(&self) -> Vec<String> {
        pool_topics(&self.pool)
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    /// Start a fresh session for the given selectors (`None` = all),
    /// discarding any previously saved one.
    ///
    /// # Errors
    ///
    /// `QuizError::EmptySelection` when no pool question matches; the old
    /// saved session is left untouched in that case. Storage failures
    /// propagate.
    pub async fn start(
        &mut self,
        topic: Option<String>,
        difficulty: Option<Difficulty>,
    ) -> Result<(), QuizError> {
        let candidates = filter_pool(&self.pool, topic.as_deref(), difficulty);
        if candidates.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        let sampled = {
            let mut rng = rand::rng();
            sample_session(&mut rng, candidates)
        };

        self.store.remove(QUIZ_SLOT_KEY).await?;
        self.session = Some(QuizSession::new(topic, difficulty, sampled));
        self.persist().await
    }

    /// Grade a submission against the current question and persist.
    ///
    /// # Errors
    ///
    /// `QuizError::NoSession` without an active session; otherwise the
    /// session's own submit errors, plus storage failures.
    pub async fn submit(&mut self, input: &str) -> Result<SubmitOutcome, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoSession)?;
        let outcome = session.submit(input)?;
        self.persist().await?;
        Ok(outcome)
    }

    /// Advance to the next question.
    ///
    /// Past the last question this returns the completion report and clears
    /// the saved slot; otherwise the new position is persisted.
    ///
    /// # Errors
    ///
    /// `QuizError::NoSession` without an active session; storage failures
    /// propagate.
    pub async fn advance(&mut self) -> Result<Option<QuizReport>, QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoSession)?;
        session.advance();

        if let Some(report) = session.report() {
            self.session = None;
            self.store.remove(QUIZ_SLOT_KEY).await?;
            return Ok(Some(report));
        }

        self.persist().await?;
        Ok(None)
    }

    /// Unlock the current question for another attempt and persist.
    ///
    /// # Errors
    ///
    /// `QuizError::NoSession` without an active session; storage failures
    /// propagate.
    pub async fn retry_current(&mut self) -> Result<(), QuizError> {
        let session = self.session.as_mut().ok_or(QuizError::NoSession)?;
        session.retry_current();
        self.persist().await
    }

    /// Leave the quiz for the start screen, keeping the saved session
    /// resumable.
    ///
    /// # Errors
    ///
    /// Storage failures propagate.
    pub async fn exit_to_start(&mut self) -> Result<(), QuizError> {
        self.persist().await?;
        self.session = None;
        Ok(())
    }

    /// Attempt to resume the saved session.
    ///
    /// Returns `false` when no slot exists, the payload is corrupt, or none
    /// of the saved questions resolve any more; all of these degrade to the
    /// start screen rather than erroring.
    ///
    /// # Errors
    ///
    /// Storage failures propagate.
    pub async fn resume(&mut self) -> Result<bool, QuizError> {
        let Some(raw) = self.store.get(QUIZ_SLOT_KEY).await? else {
            return Ok(false);
        };
        let saved: SavedSession = match serde_json::from_str(&raw) {
            Ok(saved) => saved,
            Err(err) => {
                log::warn!("discarding corrupt quiz progress payload: {err}");
                return Ok(false);
            }
        };

        match QuizSession::restore(saved, &self.pool) {
            Some(session) => {
                self.session = Some(session);
                self.persist().await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether a saved session exists (controls the resume action).
    ///
    /// # Errors
    ///
    /// Storage failures propagate.
    pub async fn has_saved_session(&self) -> Result<bool, QuizError> {
        Ok(self.store.get(QUIZ_SLOT_KEY).await?.is_some())
    }

    /// Drop any saved session (the "pick a new topic" action).
    ///
    /// # Errors
    ///
    /// Storage failures propagate.
    pub async fn clear_saved(&self) -> Result<(), QuizError> {
        self.store.remove(QUIZ_SLOT_KEY).await?;
        Ok(())
    }

    async fn persist(&self) -> Result<(), QuizError> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let payload = serde_json::to_string(&session.to_saved(self.clock.now()))?;
        self.store.put(QUIZ_SLOT_KEY, &payload).await?;
        Ok(())
    }
}
