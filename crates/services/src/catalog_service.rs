//! Feed loading and the immutable dataset store.

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use prep_core::model::{Formula, Question, QuizQuestion};

use crate::error::FeedError;

const QUESTIONS_FEED: &str = "assets/data/questions.json";
const FORMULAS_FEED: &str = "assets/data/formulas.json";
const QUIZ_FEED: &str = "assets/data/quiz.json";

/// HTTP client for the three static JSON feeds.
///
/// Responses are decoded from text so a malformed payload surfaces as
/// `FeedError::Decode` rather than a transport error.
#[derive(Clone)]
pub struct FeedClient {
    http: Client,
    base: Url,
}

impl FeedClient {
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
        }
    }

    /// Load the question catalog feed.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on transport, status, or decode failure.
    pub async fn questions(&self) -> Result<Vec<Question>, FeedError> {
        self.fetch(QUESTIONS_FEED).await
    }

    /// Load the formula catalog feed.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on transport, status, or decode failure.
    pub async fn formulas(&self) -> Result<Vec<Formula>, FeedError> {
        self.fetch(FORMULAS_FEED).await
    }

    /// Load the static half of the quiz question pool.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` on transport, status, or decode failure.
    pub async fn quiz_questions(&self) -> Result<Vec<QuizQuestion>, FeedError> {
        self.fetch(QUIZ_FEED).await
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, FeedError> {
        let url = self.base.join(path)?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status()));
        }
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// The dataset store: holds each collection once loaded.
///
/// Loads are memoized, so a second request for a feed returns the cached
/// data instead of refetching. The three feeds fail independently; a failed
/// load leaves that collection absent and retryable while the others stay
/// usable.
pub struct CatalogService {
    client: FeedClient,
    questions: Option<Arc<Vec<Question>>>,
    formulas: Option<Arc<Vec<Formula>>>,
    quiz_questions: Option<Arc<Vec<QuizQuestion>>>,
}

impl CatalogService {
    #[must_use]
    pub fn new(client: FeedClient) -> Self {
        Self {
            client,
            questions: None,
            formulas: None,
            quiz_questions: None,
        }
    }

    /// Load (or return the cached) question catalog.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the feed has not been loaded yet and the
    /// fetch fails.
    pub async fn load_questions(&mut self) -> Result<Arc<Vec<Question>>, FeedError> {
        if let Some(cached) = &self.questions {
            return Ok(Arc::clone(cached));
        }
        let loaded = Arc::new(self.client.questions().await?);
        self.questions = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Load (or return the cached) formula catalog.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the feed has not been loaded yet and the
    /// fetch fails.
    pub async fn load_formulas(&mut self) -> Result<Arc<Vec<Formula>>, FeedError> {
        if let Some(cached) = &self.formulas {
            return Ok(Arc::clone(cached));
        }
        let loaded = Arc::new(self.client.formulas().await?);
        self.formulas = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Load (or return the cached) static quiz questions.
    ///
    /// # Errors
    ///
    /// Returns `FeedError` when the feed has not been loaded yet and the
    /// fetch fails.
    pub async fn load_quiz_questions(&mut self) -> Result<Arc<Vec<QuizQuestion>>, FeedError> {
        if let Some(cached) = &self.quiz_questions {
            return Ok(Arc::clone(cached));
        }
        let loaded = Arc::new(self.client.quiz_questions().await?);
        self.quiz_questions = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    #[must_use]
    pub fn questions(&self) -> Option<&Arc<Vec<Question>>> {
        self.questions.as_ref()
    }

    #[must_use]
    pub fn formulas(&self) -> Option<&Arc<Vec<Formula>>> {
        self.formulas.as_ref()
    }

    #[must_use]
    pub fn quiz_questions(&self) -> Option<&Arc<Vec<QuizQuestion>>> {
        self.quiz_questions.as_ref()
    }
}
