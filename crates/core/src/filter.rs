//! Tri-state filter axes, the canonical selection model, and the pure
//! dataset filter that feeds the view selector.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::model::{Batch, Question};

/// Tri-state selection for one filter axis.
///
/// `Unset` (nothing chosen yet) and `All` filter identically but render very
/// differently: the view selector treats them as distinct states, which is
/// why this is a sum type rather than an optional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Choice<T> {
    /// No selection has been made on this axis yet.
    #[default]
    Unset,
    /// The explicit "all values" selection.
    All,
    /// One specific value.
    Only(T),
}

impl<T> Choice<T> {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        matches!(self, Choice::Unset)
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }

    #[must_use]
    pub fn only(&self) -> Option<&T> {
        match self {
            Choice::Only(value) => Some(value),
            _ => None,
        }
    }

    /// Whether an item with `value` on this axis passes the filter.
    ///
    /// Both `Unset` and `All` place no constraint; only a specific selection
    /// requires equality. The unset/all distinction matters to rendering,
    /// not to matching.
    #[must_use]
    pub fn admits(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        match self {
            Choice::Unset | Choice::All => true,
            Choice::Only(selected) => selected == value,
        }
    }
}

impl<T: FromStr> Choice<T> {
    /// Classify a raw widget value into the tri-state model.
    ///
    /// The sentinel tokens are a widget-boundary detail, not part of the
    /// model contract. A specific value that fails to parse for the axis is
    /// treated as unset.
    #[must_use]
    pub fn from_token(raw: &str) -> Self {
        match raw.trim() {
            "" | "choose" | "none" => Choice::Unset,
            "all" => Choice::All,
            value => value.parse().map_or(Choice::Unset, Choice::Only),
        }
    }
}

impl<T: fmt::Display> Choice<T> {
    /// The canonical widget value for this selection, read identically by
    /// every selector surface.
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Choice::Unset => "choose".to_string(),
            Choice::All => "all".to_string(),
            Choice::Only(value) => value.to_string(),
        }
    }
}

/// The canonical filter selection. Exactly one exists per page; every
/// selector widget is a view over it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterModel {
    pub topic: Choice<String>,
    pub year: Choice<u16>,
    /// `None` means all batches.
    pub batch: Option<Batch>,
    pub search: String,
}

impl FilterModel {
    /// True when the model applies no constraint at all: both axes `All`,
    /// every batch, blank search. This is the full-hierarchy identity case.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.topic.is_all()
            && self.year.is_all()
            && self.batch.is_none()
            && self.search.trim().is_empty()
    }

    /// The clear-all action: everything to the explicit "all" state.
    ///
    /// Distinct from `FilterModel::default()`, which is the first-load
    /// state with both axes unset.
    pub fn clear(&mut self) {
        self.topic = Choice::All;
        self.year = Choice::All;
        self.batch = None;
        self.search.clear();
    }
}

/// Apply the canonical filter rules to the full dataset.
///
/// With both axes unset nothing has been selected yet and the result is
/// empty; otherwise an unset axis behaves like "no constraint", so a topic
/// picked without a year shows that topic across all years.
#[must_use]
pub fn filter_questions<'a>(dataset: &'a [Question], model: &FilterModel) -> Vec<&'a Question> {
    if model.topic.is_unset() && model.year.is_unset() {
        return Vec::new();
    }

    let query = model.search.trim().to_lowercase();
    dataset
        .iter()
        .filter(|item| {
            model.year.admits(&item.year)
                && model.topic.admits(&item.topic)
                && model.batch.is_none_or(|batch| batch == item.batch)
                && matches_search(item, &query)
        })
        .collect()
}

fn matches_search(item: &Question, query: &str) -> bool {
    query.is_empty()
        || item.question.to_lowercase().contains(query)
        || item.topic.to_lowercase().contains(query)
        || item.year_batch().to_lowercase().contains(query)
}

/// Distinct topics across the entire dataset, sorted.
///
/// Availability is always dataset-derived, never filter-derived: narrowing
/// one axis must not hide valid pivots on the other.
#[must_use]
pub fn available_topics(dataset: &[Question]) -> Vec<String> {
    let topics: BTreeSet<&str> = dataset.iter().map(|item| item.topic.as_str()).collect();
    topics.into_iter().map(str::to_string).collect()
}

/// Distinct batches across the entire dataset, sorted April-first.
#[must_use]
pub fn available_batches(dataset: &[Question]) -> Vec<Batch> {
    let batches: BTreeSet<Batch> = dataset.iter().map(|item| item.batch).collect();
    batches.into_iter().collect()
}
