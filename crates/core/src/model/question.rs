use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Years covered by the question catalog.
///
/// Selector widgets derive their year options from this fixed span rather
/// than from the loaded data, so sparsely covered years remain selectable.
pub const YEAR_SPAN: RangeInclusive<u16> = 2011..=2025;

/// Exam administration within a year. April sections order before November.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Batch {
    April,
    November,
}

impl fmt::Display for Batch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Batch::April => write!(f, "April"),
            Batch::November => write!(f, "November"),
        }
    }
}

/// Error type for parsing a `Batch` from a widget or feed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBatchError {
    raw: String,
}

impl fmt::Display for ParseBatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown exam batch: {}", self.raw)
    }
}

impl std::error::Error for ParseBatchError {}

impl FromStr for Batch {
    type Err = ParseBatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "April" => Ok(Batch::April),
            "November" => Ok(Batch::November),
            raw => Err(ParseBatchError {
                raw: raw.to_string(),
            }),
        }
    }
}

/// One catalog entry from the questions feed.
///
/// Immutable once loaded. `number` repeats across years; `(year, batch,
/// number)` is the effective identity for display purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub number: u32,
    pub year: u16,
    pub batch: Batch,
    pub topic: String,
    pub question: String,
    pub solution: String,
    #[serde(default)]
    pub final_answer: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_caption: Option<String>,
    #[serde(default)]
    pub solution_image: Option<String>,
    #[serde(default)]
    pub solution_image_caption: Option<String>,
}

impl Question {
    /// The `"year batch"` composite the free-text search matches against.
    #[must_use]
    pub fn year_batch(&self) -> String {
        format!("{} {}", self.year, self.batch)
    }
}
