//! Core directory service structure and construction.

use std::sync::Arc;

use crate::auth::TokenProvider;
use crate::client::{Credentials, DirectoryApi};
use crate::retry::RetryConfig;

use super::resolver::SearchOptions;

/// Transport-agnostic service exposing the directory operations.
///
/// Generic over the upstream client so tests can substitute in-memory
/// doubles for the HTTP implementation. The service is shared by reference
/// across concurrent tool invocations; the token cache inside
/// [`TokenProvider`] is its only mutable state.
///
/// # Type Parameters
///
/// * `C` - The upstream client type implementing [`DirectoryApi`]
pub struct DirectoryService<C> {
    pub(super) client: Arc<C>,
    pub(super) tokens: TokenProvider<C>,
    pub(super) retry: RetryConfig,
    pub(super) search: SearchOptions,
}

impl<C: DirectoryApi> DirectoryService<C> {
    /// Create a service with default retry and search behavior.
    ///
    /// The credentials move into the token provider; nothing else in the
    /// service ever sees them.
    pub fn new(client: Arc<C>, credentials: Credentials) -> Self {
        let tokens = TokenProvider::new(Arc::clone(&client), credentials);
        Self {
            client,
            tokens,
            retry: RetryConfig::default(),
            search: SearchOptions::default(),
        }
    }

    /// Override the retry policy applied around upstream calls.
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Override search behavior (see [`SearchOptions`]).
    pub fn with_search_options(mut self, search: SearchOptions) -> Self {
        self.search = search;
        self
    }

    /// Override the token expiry safety margin.
    pub fn with_token_safety_margin(mut self, margin: chrono::Duration) -> Self {
        self.tokens = self.tokens.with_safety_margin(margin);
        self
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn search_options(&self) -> &SearchOptions {
        &self.search
    }
}
