use std::sync::Arc;

use prep_core::model::{Batch, Question};
use prep_core::view::{GroupedQuestions, ViewStrategy};
use services::filter_service::{FilterIntent, FilterService};

fn question(year: u16, batch: Batch, topic: &str, number: u32) -> Question {
    Question {
        number,
        year,
        batch,
        topic: topic.to_string(),
        question: format!("{topic} problem {number}"),
        solution: String::new(),
        final_answer: None,
        image: None,
        image_caption: None,
        solution_image: None,
        solution_image_caption: None,
    }
}

/// Years {2020, 2021} × topics {A, B}, one question each.
fn dataset() -> Arc<Vec<Question>> {
    Arc::new(vec![
        question(2021, Batch::November, "B", 4),
        question(2020, Batch::April, "A", 1),
        question(2021, Batch::April, "A", 3),
        question(2020, Batch::November, "B", 2),
    ])
}

#[test]
fn first_load_renders_the_nothing_selected_state() {
    let mut service = FilterService::new();
    service.set_dataset(dataset());

    let plan = service.render().unwrap();
    assert_eq!(plan.strategy, ViewStrategy::FlatGrid);
    assert!(plan.questions.is_empty());
    assert_eq!(plan.sync.topic_token, "choose");
    assert_eq!(plan.sync.year_token, "choose");
}

#[test]
fn all_all_builds_the_full_hierarchy_in_order() {
    let mut service = FilterService::new();
    service.set_dataset(dataset());

    assert!(service.apply(&FilterIntent::SetTopic("all".to_string())));
    assert!(service.apply(&FilterIntent::SetYear("all".to_string())));

    let plan = service.render().unwrap();
    assert_eq!(plan.strategy, ViewStrategy::FullHierarchy);
    assert_eq!(plan.summary, "4 questions grouped by year.");

    let GroupedQuestions::YearHierarchy(years) = plan.grouped else {
        panic!("expected the year hierarchy");
    };
    assert_eq!(years.len(), 2);
    assert_eq!(years[0].year, 2020);
    assert_eq!(years[1].year, 2021);
    for section in &years {
        assert_eq!(section.topics.len(), 2);
        assert_eq!(section.topics[0].topic, "A");
        assert_eq!(section.topics[1].topic, "B");
    }
}

#[test]
fn pivot_from_a_narrow_selection_stays_possible() {
    let mut service = FilterService::new();
    service.set_dataset(dataset());

    service.apply(&FilterIntent::SetTopic("A".to_string()));
    service.apply(&FilterIntent::SetYear("2020".to_string()));

    let plan = service.render().unwrap();
    assert_eq!(
        plan.strategy,
        ViewStrategy::YearAndTopic(2020, "A".to_string())
    );
    assert_eq!(plan.questions.len(), 1);

    // The other axis's options still cover the whole catalog.
    assert_eq!(plan.options.topics, vec!["A", "B"]);
    assert!(plan.options.years.contains(&2021));
}

#[test]
fn search_only_state_falls_back_to_the_flat_grid() {
    let mut service = FilterService::new();
    service.set_dataset(dataset());

    // Search with both axes untouched: flat, empty (nothing selected yet).
    service.apply(&FilterIntent::SetSearch("problem".to_string()));
    let plan = service.render().unwrap();
    assert_eq!(plan.strategy, ViewStrategy::FlatGrid);
    assert!(plan.questions.is_empty());

    // After clear-all the same search matches across the catalog.
    service.apply(&FilterIntent::ClearAll);
    service.apply(&FilterIntent::SetSearch("B problem".to_string()));
    let plan = service.render().unwrap();
    assert_eq!(plan.questions.len(), 2);
    assert_eq!(plan.summary, "2 questions found.");
}

#[test]
fn empty_filter_result_is_a_state_not_an_error() {
    let mut service = FilterService::new();
    service.set_dataset(dataset());

    service.apply(&FilterIntent::SetTopic("A".to_string()));
    service.apply(&FilterIntent::SetYear("2025".to_string()));

    let plan = service.render().unwrap();
    assert!(plan.questions.is_empty());
    assert_eq!(plan.summary, "0 questions found.");
    let GroupedQuestions::YearHierarchy(years) = plan.grouped else {
        panic!("expected the year hierarchy");
    };
    assert!(years.is_empty());
}
