//! Debounced two-step forecast resolution.
//!
//! [`ForecastResolver::set_query`] is called on every edit of the location
//! query. Queries shorter than [`MIN_QUERY_CHARS`] reset the state right away.
//! Longer ones schedule an attempt after the quiet period; an attempt only
//! fires if no newer edit arrived meanwhile, and its writes are dropped as
//! soon as a newer edit supersedes it.

use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info, warn};

use crate::{
    ForecastError,
    model::ForecastData,
    provider::WeatherProvider,
    state::{StateStore, Transition, WeatherState},
};

/// Trimmed queries shorter than this never reach the network.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub struct ForecastResolver {
    provider: Arc<dyn WeatherProvider>,
    store: Arc<StateStore>,
    debounce: Duration,
}

impl ForecastResolver {
    pub fn new(provider: Arc<dyn WeatherProvider>, debounce: Duration) -> Self {
        Self { provider, store: Arc::new(StateStore::new()), debounce }
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> WeatherState {
        self.store.snapshot()
    }

    /// Feed a new value of the location query.
    ///
    /// Returns the handle of the scheduled attempt, or `None` when nothing
    /// was scheduled (unchanged or too-short query). Must be called from
    /// within a tokio runtime.
    pub fn set_query(&self, query: &str) -> Option<JoinHandle<()>> {
        let current = self.store.snapshot();
        if current.generation() > 0 && current.query() == query {
            return None;
        }

        let generation = self.store.begin(query);
        let trimmed = query.trim();

        if trimmed.chars().count() < MIN_QUERY_CHARS {
            debug!(generation, "query too short, resetting");
            self.store.apply_if_current(generation, Transition::Reset);
            return None;
        }

        let resolver = self.clone();
        let trimmed = trimmed.to_string();
        Some(tokio::spawn(async move {
            tokio::time::sleep(resolver.debounce).await;
            if !resolver.store.is_current(generation) {
                debug!(generation, query = %trimmed, "superseded before firing");
                return;
            }
            resolver.run_attempt(generation, &trimmed).await;
        }))
    }

    async fn run_attempt(&self, generation: u64, query: &str) {
        info!(generation, query, "resolving forecast");
        self.store.apply_if_current(generation, Transition::Started);

        let outcome = match self.fetch(generation, query).await {
            Ok(forecast) => {
                debug!(generation, days = forecast.days(), "forecast resolved");
                Transition::Succeeded(forecast)
            }
            Err(err) => {
                warn!(generation, query, error = %err, "forecast resolution failed");
                Transition::Failed(err.to_string())
            }
        };

        if !self.store.apply_if_current(generation, outcome) {
            debug!(generation, query, "discarding stale result");
            return;
        }
        self.store.apply_if_current(generation, Transition::Finished);
    }

    async fn fetch(&self, generation: u64, query: &str) -> Result<ForecastData, ForecastError> {
        let place = self
            .provider
            .geocode(query)
            .await?
            .ok_or_else(|| ForecastError::NotFound { query: query.to_string() })?;

        self.store.apply_if_current(generation, Transition::Resolved(place.resolved()));

        self.provider.forecast(&place).await
    }
}
