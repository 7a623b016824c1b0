//! UI preference flags persisted as boolean-as-string slots.

use std::sync::Arc;

use storage::repository::{KeyValueStore, StorageError};

/// Storage slot for the sidebar pin preference.
pub const SIDEBAR_PIN_KEY: &str = "sidebarPinned";

/// Thin facade over the preference slots.
#[derive(Clone)]
pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the sidebar pin flag. An absent value or a storage failure
    /// defaults to unpinned.
    pub async fn sidebar_pinned(&self) -> bool {
        match self.store.get(SIDEBAR_PIN_KEY).await {
            Ok(Some(value)) => value == "true",
            Ok(None) => false,
            Err(err) => {
                log::warn!("could not read sidebar preference: {err}");
                false
            }
        }
    }

    /// Persist the sidebar pin flag.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the slot cannot be written.
    pub async fn set_sidebar_pinned(&self, pinned: bool) -> Result<(), StorageError> {
        self.store
            .put(SIDEBAR_PIN_KEY, if pinned { "true" } else { "false" })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryStore;

    #[tokio::test]
    async fn pin_flag_defaults_to_unpinned_and_round_trips() {
        let store = Arc::new(InMemoryStore::new());
        let preferences = PreferencesService::new(store.clone());

        assert!(!preferences.sidebar_pinned().await);

        preferences.set_sidebar_pinned(true).await.unwrap();
        assert!(preferences.sidebar_pinned().await);
        assert_eq!(
            store.get(SIDEBAR_PIN_KEY).await.unwrap().as_deref(),
            Some("true")
        );

        preferences.set_sidebar_pinned(false).await.unwrap();
        assert!(!preferences.sidebar_pinned().await);
    }

    #[tokio::test]
    async fn unrecognized_value_reads_as_unpinned() {
        let store = Arc::new(InMemoryStore::new());
        store.put(SIDEBAR_PIN_KEY, "maybe").await.unwrap();

        let preferences = PreferencesService::new(store);
        assert!(!preferences.sidebar_pinned().await);
    }
}
