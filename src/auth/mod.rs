//! Access token acquisition and caching.
//!
//! The upstream API issues short-lived bearer tokens in exchange for the
//! application credentials. [`TokenProvider`] owns the only cached copy:
//! reads of a still-fresh token take a shared lock and return immediately,
//! while expiry triggers exactly one upstream fetch no matter how many tasks
//! observe it concurrently (refresh mutex with a re-check after acquisition).
//!
//! A token is treated as expired `safety_margin` before its nominal expiry so
//! in-flight calls do not race the real cutoff. [`TokenProvider::invalidate`]
//! drops the cache; the operations service uses it when upstream rejects a
//! token mid-flight and a single refreshed retry is warranted.

use chrono::{DateTime, Duration, Utc};
use log::{debug, warn};
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::client::{Credentials, DirectoryApi};
use crate::error::DirectoryResult;

/// How long before nominal expiry a token stops being served.
pub const DEFAULT_SAFETY_MARGIN_SECS: i64 = 60;

/// A cached access token with its computed expiry instant.
#[derive(Clone)]
pub struct Token {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Fresh means strictly inside the expiry deadline minus the margin.
    pub fn is_fresh(&self, margin: Duration) -> bool {
        self.expires_at
            .checked_sub_signed(margin)
            .map(|deadline| Utc::now() < deadline)
            .unwrap_or(false)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Caching, single-flight provider of upstream access tokens.
///
/// Shared by reference across all operations; the cache is the only mutable
/// state in the crate. Token values are returned to callers but never logged.
pub struct TokenProvider<C> {
    client: Arc<C>,
    credentials: Credentials,
    safety_margin: Duration,
    cached: RwLock<Option<Token>>,
    refresh: Mutex<()>,
}

impl<C: DirectoryApi> TokenProvider<C> {
    pub fn new(client: Arc<C>, credentials: Credentials) -> Self {
        Self {
            client,
            credentials,
            safety_margin: Duration::seconds(DEFAULT_SAFETY_MARGIN_SECS),
            cached: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Override the expiry safety margin (mainly for tests).
    pub fn with_safety_margin(mut self, margin: Duration) -> Self {
        self.safety_margin = margin;
        self
    }

    /// Return a fresh token value, fetching from upstream only when the
    /// cached one is missing or inside the safety margin.
    pub async fn access_token(&self) -> DirectoryResult<String> {
        if let Some(value) = self.fresh_cached().await {
            return Ok(value);
        }

        // One refresh shared by every concurrent waiter; the re-check after
        // the lock turns late arrivals into cache hits.
        let _refresh = self.refresh.lock().await;
        if let Some(value) = self.fresh_cached().await {
            return Ok(value);
        }

        let issued = self.client.fetch_token(&self.credentials).await?;
        let lifetime = i64::try_from(issued.expires_in).unwrap_or(i64::MAX);
        let token = Token {
            value: issued.value,
            expires_at: Utc::now() + Duration::seconds(lifetime),
        };
        if lifetime <= self.safety_margin.num_seconds() {
            warn!(
                "issued token lifetime {lifetime}s is within the {}s safety margin, caching is ineffective",
                self.safety_margin.num_seconds()
            );
        }
        debug!("access token refreshed, valid until {}", token.expires_at);

        let value = token.value.clone();
        *self.cached.write().await = Some(token);
        Ok(value)
    }

    /// Drop the cached token so the next call must fetch a new one.
    pub async fn invalidate(&self) {
        debug!("cached access token invalidated");
        *self.cached.write().await = None;
    }

    async fn fresh_cached(&self) -> Option<String> {
        let cached = self.cached.read().await;
        cached
            .as_ref()
            .filter(|token| token.is_fresh(self.safety_margin))
            .map(|token| token.value.clone())
    }
}
