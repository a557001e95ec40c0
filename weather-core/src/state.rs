//! Authoritative UI state and the generation-checked store around it.
//!
//! Every query change bumps the generation. An attempt remembers the
//! generation it was scheduled under and every write it makes goes through
//! [`StateStore::apply_if_current`], which compares generations and mutates
//! under the same write lock. A superseded attempt therefore can never
//! overwrite state that belongs to a newer query.

use tokio::sync::watch;

use crate::model::{ForecastData, RequestState, ResolvedPlace};

/// Snapshot rendered by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherState {
    generation: u64,
    query: String,
    pub place: Option<ResolvedPlace>,
    pub loading: bool,
    pub forecast: Option<ForecastData>,
    pub error: Option<String>,
}

/// The only ways [`WeatherState`] changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Query too short: back to idle.
    Reset,
    Started,
    Resolved(ResolvedPlace),
    Succeeded(ForecastData),
    Failed(String),
    Finished,
}

impl WeatherState {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The latest query, as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Reset => {
                self.place = None;
                self.loading = false;
                self.forecast = None;
                self.error = None;
            }
            Transition::Started => self.loading = true,
            Transition::Resolved(place) => self.place = Some(place),
            Transition::Succeeded(forecast) => {
                self.forecast = Some(forecast);
                self.error = None;
            }
            Transition::Failed(message) => {
                self.forecast = None;
                self.error = Some(message);
            }
            Transition::Finished => self.loading = false,
        }
    }

    pub fn display_location(&self) -> Option<String> {
        self.place.as_ref().map(ResolvedPlace::display_label)
    }

    /// Error if present, else the resolved place label.
    pub fn status_line(&self) -> Option<String> {
        self.error.clone().or_else(|| self.display_location())
    }

    /// Forecast to show: only when there is no error.
    pub fn visible_forecast(&self) -> Option<&ForecastData> {
        match self.error {
            Some(_) => None,
            None => self.forecast.as_ref(),
        }
    }

    pub fn request_state(&self) -> RequestState {
        if self.loading {
            return RequestState::Loading;
        }
        if let Some(message) = &self.error {
            return RequestState::Failure(message.clone());
        }
        match &self.forecast {
            Some(forecast) => RequestState::Success {
                forecast: forecast.clone(),
                label: self.display_location().unwrap_or_default(),
            },
            None => RequestState::Idle,
        }
    }
}

/// Single writer for [`WeatherState`], broadcasting each change.
#[derive(Debug)]
pub struct StateStore {
    tx: watch::Sender<WeatherState>,
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WeatherState::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> WeatherState {
        self.tx.borrow().clone()
    }

    /// Record a new query, invalidating every earlier attempt, and return
    /// the new generation.
    pub fn begin(&self, query: &str) -> u64 {
        let mut generation = 0;
        self.tx.send_if_modified(|state| {
            state.generation += 1;
            state.query = query.to_string();
            generation = state.generation;
            false
        });
        generation
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.tx.borrow().generation == generation
    }

    /// Apply `transition` only if `generation` is still current.
    /// Returns whether the state was written.
    pub fn apply_if_current(&self, generation: u64, transition: Transition) -> bool {
        self.tx.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.apply(transition);
            true
        })
    }
}
