//! The single-writer filter reducer and the render plan it produces.
//!
//! Every selector widget dispatches intents here; this service is the only
//! mutator of the canonical `FilterModel`. Both selector surfaces (the
//! compact filter bar and the start panel) are re-rendered from the
//! resulting state, which removes any chance of the surfaces drifting
//! apart.

use std::sync::Arc;

use prep_core::filter::{
    Choice, FilterModel, available_batches, available_topics, filter_questions,
};
use prep_core::model::{Batch, Question, YEAR_SPAN};
use prep_core::view::{GroupedQuestions, ViewStrategy, group_questions, select_view};

/// A single filter mutation dispatched from any widget surface.
///
/// Axis values travel as raw widget tokens; classification into the
/// tri-state model happens inside the reducer, the one place allowed to
/// interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterIntent {
    SetTopic(String),
    SetYear(String),
    /// `"all"` or a batch name; anything unrecognized falls back to all.
    SetBatch(String),
    SetSearch(String),
    ClearAll,
}

/// Option lists for the selector widgets.
///
/// Always derived from the entire dataset (years from the fixed catalog
/// span), never from the filtered subset, so a narrow selection can always
/// pivot to any other valid combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorOptions {
    pub topics: Vec<String>,
    pub years: Vec<u16>,
    pub batches: Vec<Batch>,
}

/// Canonical widget values after a reduction.
///
/// Both selector surfaces read the same token per axis; only the start
/// panel renders an option for the unset token, the bar shows its
/// placeholder for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetSync {
    pub topic_token: String,
    pub year_token: String,
    pub batch_token: String,
    pub search: String,
}

/// Everything a renderer needs after one reducer step.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan<'a> {
    pub sync: WidgetSync,
    pub options: SelectorOptions,
    /// Active-filter chip labels, in widget order.
    pub chips: Vec<String>,
    /// Results summary line.
    pub summary: String,
    pub strategy: ViewStrategy,
    pub questions: Vec<&'a Question>,
    pub grouped: GroupedQuestions<'a>,
}

/// Single-writer reducer owning the canonical filter selection.
#[derive(Default)]
pub struct FilterService {
    dataset: Option<Arc<Vec<Question>>>,
    model: FilterModel,
}

impl FilterService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the loaded question catalog. Until this happens every intent
    /// is a no-op and the widgets keep their placeholders.
    pub fn set_dataset(&mut self, dataset: Arc<Vec<Question>>) {
        self.dataset = Some(dataset);
    }

    #[must_use]
    pub fn model(&self) -> &FilterModel {
        &self.model
    }

    /// Apply one intent to the canonical model.
    ///
    /// Returns `false`, leaving the model untouched, when the dataset has
    /// not loaded yet.
    pub fn apply(&mut self, intent: &FilterIntent) -> bool {
        if self.dataset.is_none() {
            return false;
        }
        match intent {
            FilterIntent::SetTopic(raw) => self.model.topic = Choice::from_token(raw),
            FilterIntent::SetYear(raw) => self.model.year = Choice::from_token(raw),
            FilterIntent::SetBatch(raw) => self.model.batch = parse_batch_token(raw),
            FilterIntent::SetSearch(text) => self.model.search = text.clone(),
            FilterIntent::ClearAll => self.model.clear(),
        }
        true
    }

    /// Compute the render plan for the current canonical state, or `None`
    /// before the dataset has loaded.
    #[must_use]
    pub fn render(&self) -> Option<RenderPlan<'_>> {
        let dataset = self.dataset.as_deref()?;
        let questions = filter_questions(dataset, &self.model);
        let strategy = select_view(&self.model);
        let grouped = group_questions(&strategy, &questions);

        Some(RenderPlan {
            sync: self.widget_sync(),
            options: selector_options(dataset),
            chips: self.chips(),
            summary: summary_line(&self.model, questions.len()),
            strategy,
            questions,
            grouped,
        })
    }

    fn widget_sync(&self) -> WidgetSync {
        WidgetSync {
            topic_token: self.model.topic.token(),
            year_token: self.model.year.token(),
            batch_token: self
                .model
                .batch
                .map_or_else(|| "all".to_string(), |batch| batch.to_string()),
            search: self.model.search.clone(),
        }
    }

    fn chips(&self) -> Vec<String> {
        let mut chips = Vec::new();
        if let Some(year) = self.model.year.only() {
            chips.push(format!("Year: {year}"));
        }
        if let Some(batch) = self.model.batch {
            chips.push(format!("Batch: {batch}"));
        }
        if let Some(topic) = self.model.topic.only() {
            chips.push(format!("Topic: {topic}"));
        }
        let search = self.model.search.trim();
        if !search.is_empty() {
            chips.push(format!("Search: \"{search}\""));
        }
        chips
    }
}

fn parse_batch_token(raw: &str) -> Option<Batch> {
    match raw.trim() {
        "all" => None,
        value => value.parse().ok(),
    }
}

fn selector_options(dataset: &[Question]) -> SelectorOptions {
    SelectorOptions {
        topics: available_topics(dataset),
        years: YEAR_SPAN.collect(),
        batches: available_batches(dataset),
    }
}

fn summary_line(model: &FilterModel, count: usize) -> String {
    if model.is_identity() {
        format!("{count} questions grouped by year.")
    } else {
        let plural = if count == 1 { "" } else { "s" };
        format!("{count} question{plural} found.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(year: u16, batch: Batch, topic: &str, number: u32) -> Question {
        Question {
            number,
            year,
            batch,
            topic: topic.to_string(),
            question: format!("Question {number}"),
            solution: String::new(),
            final_answer: None,
            image: None,
            image_caption: None,
            solution_image: None,
            solution_image_caption: None,
        }
    }

    fn loaded_service() -> FilterService {
        let dataset = vec![
            question(2020, Batch::April, "Hydrostatics", 1),
            question(2020, Batch::November, "Pipe Flow", 2),
            question(2021, Batch::April, "Hydrostatics", 3),
        ];
        let mut service = FilterService::new();
        service.set_dataset(Arc::new(dataset));
        service
    }

    #[test]
    fn intents_are_no_ops_before_the_dataset_loads() {
        let mut service = FilterService::new();
        assert!(!service.apply(&FilterIntent::SetTopic("all".to_string())));
        assert_eq!(service.model(), &FilterModel::default());
        assert!(service.render().is_none());
    }

    #[test]
    fn reducer_classifies_raw_tokens() {
        let mut service = loaded_service();
        assert!(service.apply(&FilterIntent::SetTopic("Hydrostatics".to_string())));
        assert!(service.apply(&FilterIntent::SetYear("choose".to_string())));
        assert!(service.apply(&FilterIntent::SetBatch("April".to_string())));

        let model = service.model();
        assert_eq!(model.topic, Choice::Only("Hydrostatics".to_string()));
        assert_eq!(model.year, Choice::Unset);
        assert_eq!(model.batch, Some(Batch::April));
    }

    #[test]
    fn widget_sync_reads_identically_on_both_surfaces() {
        let mut service = loaded_service();
        service.apply(&FilterIntent::SetYear("2020".to_string()));
        service.apply(&FilterIntent::SetTopic("all".to_string()));

        let plan = service.render().unwrap();
        // One canonical token per axis; the bar and the start panel both
        // consume this same value.
        assert_eq!(plan.sync.year_token, "2020");
        assert_eq!(plan.sync.topic_token, "all");
        assert_eq!(plan.sync.batch_token, "all");
    }

    #[test]
    fn narrowing_one_axis_never_narrows_the_other_axis_options() {
        let mut service = loaded_service();
        let before = service.render().unwrap().options;

        service.apply(&FilterIntent::SetTopic("Pipe Flow".to_string()));
        let after = service.render().unwrap().options;

        assert_eq!(before, after);
        assert_eq!(after.topics, vec!["Hydrostatics", "Pipe Flow"]);
        assert_eq!(after.years.first(), Some(&2011));
        assert_eq!(after.years.last(), Some(&2025));
    }

    #[test]
    fn chips_reflect_only_active_constraints() {
        let mut service = loaded_service();
        service.apply(&FilterIntent::SetYear("2020".to_string()));
        service.apply(&FilterIntent::SetBatch("April".to_string()));
        service.apply(&FilterIntent::SetSearch(" gate ".to_string()));

        let plan = service.render().unwrap();
        assert_eq!(
            plan.chips,
            vec!["Year: 2020", "Batch: April", "Search: \"gate\""]
        );
    }

    #[test]
    fn summary_distinguishes_identity_from_filtered_results() {
        let mut service = loaded_service();
        service.apply(&FilterIntent::ClearAll);
        assert_eq!(
            service.render().unwrap().summary,
            "3 questions grouped by year."
        );

        service.apply(&FilterIntent::SetTopic("Pipe Flow".to_string()));
        assert_eq!(service.render().unwrap().summary, "1 question found.");
    }

    #[test]
    fn clear_all_restores_the_explicit_all_state() {
        let mut service = loaded_service();
        service.apply(&FilterIntent::SetTopic("Pipe Flow".to_string()));
        service.apply(&FilterIntent::SetSearch("gate".to_string()));
        service.apply(&FilterIntent::ClearAll);

        let plan = service.render().unwrap();
        assert_eq!(plan.strategy, ViewStrategy::FullHierarchy);
        assert_eq!(plan.questions.len(), 3);
        assert!(plan.chips.is_empty());
    }
}
