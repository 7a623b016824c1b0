use serde::{Deserialize, Serialize};

/// One entry from the formulas feed. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    pub topic: String,
    /// Markup string, typeset by the presentation layer.
    pub formula: String,
    pub description: String,
}
