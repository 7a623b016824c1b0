use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quiz question difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Display label used by the quiz header badge.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Moderate",
            Difficulty::Hard => "Board-level",
        }
    }

    /// Lowercase token used by the difficulty selector and the persisted payload.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error type for parsing a `Difficulty` from a widget or feed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDifficultyError {
    raw: String,
}

impl fmt::Display for ParseDifficultyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty: {}", self.raw)
    }
}

impl std::error::Error for ParseDifficultyError {}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            raw => Err(ParseDifficultyError {
                raw: raw.to_string(),
            }),
        }
    }
}

/// One numeric quiz problem, either loaded from the quiz feed or produced by
/// the dynamic generator (ids prefixed `dyn-` to avoid collision).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    pub topic: String,
    pub difficulty: Difficulty,
    pub question: String,
    pub hint: String,
    pub solution: String,
    pub answer: f64,
    /// Maximum absolute deviation still graded as correct. Never negative.
    pub tolerance: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub key_formula: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub solution_image: Option<String>,
}

impl QuizQuestion {
    /// The key formula shown with the solution, falling back to the
    /// per-topic default when the question carries none.
    #[must_use]
    pub fn key_formula(&self) -> Option<&str> {
        self.key_formula
            .as_deref()
            .or_else(|| fallback_key_formula(&self.topic))
    }
}

fn fallback_key_formula(topic: &str) -> Option<&'static str> {
    match topic {
        "Pipe Flow" => Some("Q = A × V"),
        "Open Channel Flow" => Some("Fr = V / √(g × y)"),
        "Pump Calculations" => Some("P = (ρ × g × Q × H) / η"),
        "Fluid Properties" => Some("γ = ρ × g"),
        "Hydrostatics" => Some("p = γ × h"),
        _ => None,
    }
}

/// Qualitative rating for a completed quiz, from fixed percentage thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreRating {
    Perfect,
    Excellent,
    Good,
    KeepPracticing,
    TryAgain,
}

impl ScoreRating {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            100.. => ScoreRating::Perfect,
            80.. => ScoreRating::Excellent,
            60.. => ScoreRating::Good,
            40.. => ScoreRating::KeepPracticing,
            _ => ScoreRating::TryAgain,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ScoreRating::Perfect => "Perfect Score!",
            ScoreRating::Excellent => "Excellent!",
            ScoreRating::Good => "Good Work!",
            ScoreRating::KeepPracticing => "Keep Practicing!",
            ScoreRating::TryAgain => "Try Again!",
        }
    }
}
