// ABOUTME: List-view state for one resource type
// ABOUTME: Explicit re-fetch after a successful create stands in for any caching layer

use tracing::{error, info};

use crate::client::PersonaClient;
use crate::error::ClientResult;
use crate::resource::Resource;

/// Records shown by one page, plus its loading and error flags
#[derive(Debug)]
pub struct Listing<R: Resource> {
    items: Vec<R>,
    loading: bool,
    last_error: Option<String>,
}

impl<R: Resource> Default for Listing<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            last_error: None,
        }
    }
}

impl<R: Resource> Listing<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// One awaited list call. The loading flag is always cleared afterwards;
    /// on failure the previous items are kept and the error is recorded.
    pub async fn refresh(&mut self, client: &PersonaClient) -> bool {
        self.loading = true;
        let result = client.list::<R>().await;
        self.loading = false;

        match result {
            Ok(items) => {
                self.items = items;
                self.last_error = None;
                true
            }
            Err(e) => {
                error!("Error fetching {}: {}", R::KIND.plural(), e);
                self.last_error = Some(R::KIND.list_failure());
                false
            }
        }
    }

    /// Create a record and then re-fetch the list. Validation failures
    /// return before any request is made and leave the list untouched.
    pub async fn create(&mut self, client: &PersonaClient, draft: &R::Draft) -> ClientResult<R> {
        self.loading = true;
        let created = client.create::<R>(draft).await;
        self.loading = false;

        let created = created?;
        info!(
            "{} '{}' created, refreshing list",
            R::KIND.singular(),
            created.display_name()
        );
        self.refresh(client).await;
        Ok(created)
    }
}
