//! View selection: maps the shape of the filter model to exactly one
//! grouping strategy, then builds the section tree for rendering.

use std::collections::BTreeMap;

use crate::filter::{Choice, FilterModel};
use crate::model::Question;

/// Rendering strategy chosen from the reconciled filter model.
///
/// Precedence is the documented decision table; because each axis is a
/// three-variant sum type, the table is a single exhaustive match and the
/// compiler guarantees exactly one strategy per reachable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStrategy {
    /// Both axes "all": year sections containing topic subsections.
    FullHierarchy,
    /// All topics within one selected year.
    TopicsWithinYear(u16),
    /// Every year, each with a single subsection for the fixed topic.
    YearsWithTopic(String),
    /// One year section containing one topic subsection.
    YearAndTopic(u16, String),
    /// Flat list of topic sections, no year headers.
    TopicOnly,
    /// Year sections with a flat question grid, no topic subdivision.
    YearOnly,
    /// One topic section holding all matching questions.
    SingleTopic(String),
    /// One year section holding all matching questions.
    SingleYear(u16),
    /// Ungrouped fallback (e.g. search-driven results with no axis chosen).
    FlatGrid,
}

/// Choose the rendering strategy for the current model.
#[must_use]
pub fn select_view(model: &FilterModel) -> ViewStrategy {
    use Choice::{All, Only, Unset};

    match (&model.topic, &model.year) {
        (All, All) => ViewStrategy::FullHierarchy,
        (All, Only(year)) => ViewStrategy::TopicsWithinYear(*year),
        (All, Unset) => ViewStrategy::TopicOnly,
        (Only(topic), All) => ViewStrategy::YearsWithTopic(topic.clone()),
        (Only(topic), Only(year)) => ViewStrategy::YearAndTopic(*year, topic.clone()),
        (Only(topic), Unset) => ViewStrategy::SingleTopic(topic.clone()),
        (Unset, All) => ViewStrategy::YearOnly,
        (Unset, Only(year)) => ViewStrategy::SingleYear(*year),
        (Unset, Unset) => ViewStrategy::FlatGrid,
    }
}

/// A topic heading with its questions, ordered April-first, then by number.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSection<'a> {
    pub topic: &'a str,
    pub questions: Vec<&'a Question>,
}

/// A year heading containing topic subsections.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSection<'a> {
    pub year: u16,
    pub topics: Vec<TopicSection<'a>>,
}

/// A year heading with a flat question grid.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGrid<'a> {
    pub year: u16,
    pub questions: Vec<&'a Question>,
}

/// The section tree a renderer walks. Every variant tolerates an empty
/// result set by carrying empty containers.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupedQuestions<'a> {
    /// Year sections ascending, topic subsections alphabetical.
    YearHierarchy(Vec<YearSection<'a>>),
    /// Topic sections alphabetical, no year headers.
    TopicSections(Vec<TopicSection<'a>>),
    /// Year sections ascending, no topic subdivision.
    YearGrids(Vec<YearGrid<'a>>),
    /// Ungrouped, in filter order.
    Flat(Vec<&'a Question>),
}

/// Build the section tree for an already-filtered question list.
#[must_use]
pub fn group_questions<'a>(
    strategy: &ViewStrategy,
    questions: &[&'a Question],
) -> GroupedQuestions<'a> {
    match strategy {
        ViewStrategy::FullHierarchy
        | ViewStrategy::TopicsWithinYear(_)
        | ViewStrategy::YearsWithTopic(_)
        | ViewStrategy::YearAndTopic(..) => {
            GroupedQuestions::YearHierarchy(by_year_and_topic(questions))
        }
        ViewStrategy::TopicOnly | ViewStrategy::SingleTopic(_) => {
            GroupedQuestions::TopicSections(by_topic(questions))
        }
        ViewStrategy::YearOnly | ViewStrategy::SingleYear(_) => {
            GroupedQuestions::YearGrids(by_year(questions))
        }
        ViewStrategy::FlatGrid => GroupedQuestions::Flat(questions.to_vec()),
    }
}

fn section_order(a: &Question, b: &Question) -> std::cmp::Ordering {
    (a.batch, a.number).cmp(&(b.batch, b.number))
}

fn by_year_and_topic<'a>(questions: &[&'a Question]) -> Vec<YearSection<'a>> {
    let mut grouped: BTreeMap<u16, BTreeMap<&str, Vec<&Question>>> = BTreeMap::new();
    for &item in questions {
        grouped
            .entry(item.year)
            .or_default()
            .entry(item.topic.as_str())
            .or_default()
            .push(item);
    }

    grouped
        .into_iter()
        .map(|(year, topics)| YearSection {
            year,
            topics: topics
                .into_iter()
                .map(|(topic, mut questions)| {
                    questions.sort_by(|a, b| section_order(a, b));
                    TopicSection { topic, questions }
                })
                .collect(),
        })
        .collect()
}

fn by_topic<'a>(questions: &[&'a Question]) -> Vec<TopicSection<'a>> {
    let mut grouped: BTreeMap<&str, Vec<&Question>> = BTreeMap::new();
    for &item in questions {
        grouped.entry(item.topic.as_str()).or_default().push(item);
    }

    grouped
        .into_iter()
        .map(|(topic, mut questions)| {
            questions.sort_by(|a, b| section_order(a, b));
            TopicSection { topic, questions }
        })
        .collect()
}

fn by_year<'a>(questions: &[&'a Question]) -> Vec<YearGrid<'a>> {
    let mut grouped: BTreeMap<u16, Vec<&Question>> = BTreeMap::new();
    for &item in questions {
        grouped.entry(item.year).or_default().push(item);
    }

    grouped
        .into_iter()
        .map(|(year, mut questions)| {
            questions.sort_by(|a, b| section_order(a, b));
            YearGrid { year, questions }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Batch;

    fn model(topic: Choice<String>, year: Choice<u16>) -> FilterModel {
        FilterModel {
            topic,
            year,
            batch: None,
            search: String::new(),
        }
    }

    fn question(year: u16, batch: Batch, topic: &str, number: u32) -> Question {
        Question {
            number,
            year,
            batch,
            topic: topic.to_string(),
            question: format!("Q{number}"),
            solution: String::new(),
            final_answer: None,
            image: None,
            image_caption: None,
            solution_image: None,
            solution_image_caption: None,
        }
    }

    #[test]
    fn decision_table_covers_all_ten_cases() {
        use Choice::{All, Only, Unset};

        let topic = || Only("Pipe Flow".to_string());
        let cases = [
            (model(All, All), ViewStrategy::FullHierarchy),
            (model(All, Only(2020)), ViewStrategy::TopicsWithinYear(2020)),
            (
                model(topic(), All),
                ViewStrategy::YearsWithTopic("Pipe Flow".to_string()),
            ),
            (
                model(topic(), Only(2020)),
                ViewStrategy::YearAndTopic(2020, "Pipe Flow".to_string()),
            ),
            // Cases 5 and 6: topic "all" without a specific year.
            (model(All, Unset), ViewStrategy::TopicOnly),
            (model(Unset, All), ViewStrategy::YearOnly),
            (
                model(topic(), Unset),
                ViewStrategy::SingleTopic("Pipe Flow".to_string()),
            ),
            (model(Unset, Only(2020)), ViewStrategy::SingleYear(2020)),
            (model(Unset, Unset), ViewStrategy::FlatGrid),
        ];

        for (filter_model, expected) in cases {
            assert_eq!(select_view(&filter_model), expected);
        }
    }

    #[test]
    fn full_hierarchy_orders_years_then_topics() {
        let data = vec![
            question(2021, Batch::April, "B", 1),
            question(2020, Batch::November, "B", 2),
            question(2020, Batch::April, "A", 3),
            question(2021, Batch::November, "A", 4),
            question(2020, Batch::April, "A", 1),
            question(2021, Batch::April, "B", 9),
            question(2020, Batch::April, "B", 5),
            question(2021, Batch::November, "A", 2),
        ];
        let refs: Vec<&Question> = data.iter().collect();

        let grouped = group_questions(&ViewStrategy::FullHierarchy, &refs);
        let GroupedQuestions::YearHierarchy(years) = grouped else {
            panic!("expected year hierarchy");
        };

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2020);
        assert_eq!(years[1].year, 2021);
        assert_eq!(years[0].topics.len(), 2);
        assert_eq!(years[0].topics[0].topic, "A");
        assert_eq!(years[0].topics[1].topic, "B");

        // Within a section: April before November, then by number.
        let numbers: Vec<u32> = years[0].topics[0]
            .questions
            .iter()
            .map(|q| q.number)
            .collect();
        assert_eq!(numbers, vec![1, 3]);
        let batches: Vec<Batch> = years[0].topics[1].questions.iter().map(|q| q.batch).collect();
        assert_eq!(batches, vec![Batch::April, Batch::November]);
    }

    #[test]
    fn single_topic_collapses_to_one_section() {
        let data = vec![
            question(2021, Batch::April, "Hydrostatics", 2),
            question(2020, Batch::April, "Hydrostatics", 1),
        ];
        let refs: Vec<&Question> = data.iter().collect();

        let strategy = ViewStrategy::SingleTopic("Hydrostatics".to_string());
        let GroupedQuestions::TopicSections(sections) = group_questions(&strategy, &refs) else {
            panic!("expected topic sections");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].questions.len(), 2);
    }

    #[test]
    fn year_only_groups_without_topic_subdivision() {
        let data = vec![
            question(2021, Batch::April, "A", 1),
            question(2020, Batch::April, "B", 2),
            question(2020, Batch::April, "A", 3),
        ];
        let refs: Vec<&Question> = data.iter().collect();

        let GroupedQuestions::YearGrids(grids) = group_questions(&ViewStrategy::YearOnly, &refs)
        else {
            panic!("expected year grids");
        };
        assert_eq!(grids.len(), 2);
        assert_eq!(grids[0].year, 2020);
        assert_eq!(grids[0].questions.len(), 2);
    }

    #[test]
    fn empty_result_sets_render_empty_containers() {
        let strategies = [
            ViewStrategy::FullHierarchy,
            ViewStrategy::TopicOnly,
            ViewStrategy::YearOnly,
            ViewStrategy::FlatGrid,
        ];
        for strategy in strategies {
            match group_questions(&strategy, &[]) {
                GroupedQuestions::YearHierarchy(sections) => assert!(sections.is_empty()),
                GroupedQuestions::TopicSections(sections) => assert!(sections.is_empty()),
                GroupedQuestions::YearGrids(grids) => assert!(grids.is_empty()),
                GroupedQuestions::Flat(questions) => assert!(questions.is_empty()),
            }
        }
    }
}
