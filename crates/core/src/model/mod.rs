mod formula;
mod question;
mod quiz;

pub use formula::Formula;
pub use question::{Batch, ParseBatchError, Question, YEAR_SPAN};
pub use quiz::{Difficulty, ParseDifficultyError, QuizQuestion, ScoreRating};
