//! Formula catalog filtering and the capped cross-catalog search.

use std::collections::BTreeMap;

use crate::model::{Formula, Question};

/// Result cap for the global search dropdown.
pub const GLOBAL_SEARCH_LIMIT: usize = 8;

/// Filter formulas by topic (`None` = all) and a free-text query matching
/// description, formula markup, or topic, case-insensitively.
#[must_use]
pub fn filter_formulas<'a>(
    formulas: &'a [Formula],
    topic: Option<&str>,
    query: &str,
) -> Vec<&'a Formula> {
    let query = query.trim().to_lowercase();
    formulas
        .iter()
        .filter(|item| {
            topic.is_none_or(|topic| item.topic == topic)
                && (query.is_empty()
                    || item.description.to_lowercase().contains(&query)
                    || item.formula.to_lowercase().contains(&query)
                    || item.topic.to_lowercase().contains(&query))
        })
        .collect()
}

/// Formulas under one topic heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormulaGroup<'a> {
    pub topic: &'a str,
    pub formulas: Vec<&'a Formula>,
}

/// Group filtered formulas by topic, alphabetically.
#[must_use]
pub fn group_formulas<'a>(formulas: &[&'a Formula]) -> Vec<FormulaGroup<'a>> {
    let mut grouped: BTreeMap<&str, Vec<&Formula>> = BTreeMap::new();
    for item in formulas {
        grouped.entry(item.topic.as_str()).or_default().push(item);
    }
    grouped
        .into_iter()
        .map(|(topic, formulas)| FormulaGroup { topic, formulas })
        .collect()
}

/// Which page section a search hit scrolls to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Questions,
    Formulas,
}

/// One global search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub label: String,
    pub detail: String,
    pub target: SearchTarget,
}

/// Case-insensitive substring search across both catalogs, questions first,
/// capped at `GLOBAL_SEARCH_LIMIT` hits. A blank query yields nothing.
#[must_use]
pub fn search_catalog(questions: &[Question], formulas: &[Formula], query: &str) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let question_hits = questions.iter().filter_map(|item| {
        let haystack = format!(
            "{} {} {} {}",
            item.question, item.topic, item.year, item.batch
        );
        haystack.to_lowercase().contains(&query).then(|| SearchHit {
            label: format!("Q{} - {}", item.number, item.topic),
            detail: item.question.clone(),
            target: SearchTarget::Questions,
        })
    });

    let formula_hits = formulas.iter().filter_map(|item| {
        let haystack = format!("{} {} {}", item.description, item.topic, item.formula);
        haystack.to_lowercase().contains(&query).then(|| SearchHit {
            label: format!("{} Formula", item.topic),
            detail: item.description.clone(),
            target: SearchTarget::Formulas,
        })
    });

    question_hits
        .chain(formula_hits)
        .take(GLOBAL_SEARCH_LIMIT)
        .collect()
}
