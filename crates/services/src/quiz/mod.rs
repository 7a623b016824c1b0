//! Quiz session management: pool composition, sampling, grading, and
//! resumable persistence.

pub mod generator;
pub mod pool;
mod service;
mod session;

pub use service::{QUIZ_SLOT_KEY, QuizService};
pub use session::{QuizReport, QuizSession, SavedSession, SubmitOutcome};
