#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod error;
pub mod filter_service;
pub mod preferences;
pub mod quiz;

pub use prep_core::Clock;

pub use catalog_service::{CatalogService, FeedClient};
pub use error::{FeedError, QuizError};
pub use filter_service::{FilterIntent, FilterService, RenderPlan, SelectorOptions, WidgetSync};
pub use preferences::PreferencesService;
pub use quiz::{QuizReport, QuizService, QuizSession, SavedSession, SubmitOutcome};
