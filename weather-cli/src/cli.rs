use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{CustomType, InquireError, Text};
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;
use weather_core::{Config, ForecastResolver, WeatherState, provider_from_config};

use crate::render::{TITLE, render, render_json};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "classy-weather", version, about = "Multi-day forecast for any place")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search interactively; each entered line is a new location query.
    Search,

    /// Show the forecast for a single location and exit.
    Show {
        /// Location name, e.g. "Berlin".
        location: String,

        /// Print JSON instead of the text view.
        #[arg(long)]
        json: bool,
    },

    /// Edit endpoint URLs and the debounce interval.
    Configure,

    /// Print the config file path.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Search) {
            Command::Search => search().await,
            Command::Show { location, json } => show(&location, json).await,
            Command::Configure => configure().await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

fn resolver() -> anyhow::Result<ForecastResolver> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(ForecastResolver::new(Arc::from(provider), config.debounce()))
}

async fn search() -> anyhow::Result<()> {
    let resolver = resolver()?;
    let mut rx = resolver.subscribe();

    println!("{TITLE}");
    loop {
        let prompt = tokio::task::spawn_blocking(|| {
            Text::new("Search from location...")
                .with_help_message("Esc to quit")
                .prompt()
        })
        .await
        .context("Prompt task failed")?;

        let query = match prompt {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read location"),
        };

        match resolver.set_query(&query) {
            Some(attempt) => {
                let state = follow(&mut rx, attempt, &mut io::stdout()).await?;
                println!("{}\n", render(&state));
            }
            None => {
                let text = render(&resolver.snapshot());
                if !text.is_empty() {
                    println!("{text}\n");
                }
            }
        }
    }

    Ok(())
}

async fn show(location: &str, json: bool) -> anyhow::Result<()> {
    let resolver = resolver()?;
    let mut rx = resolver.subscribe();

    let state = match resolver.set_query(location) {
        Some(attempt) if json => {
            attempt.await.context("Forecast attempt failed")?;
            resolver.snapshot()
        }
        Some(attempt) => {
            println!("{TITLE}");
            follow(&mut rx, attempt, &mut io::stdout()).await?
        }
        None => bail!("Location must be at least {} characters", weather_core::MIN_QUERY_CHARS),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&render_json(&state))?);
    } else {
        println!("{}", render(&state));
    }

    if let Some(error) = state.error {
        bail!(error);
    }
    Ok(())
}

/// Write progress to `out` while `attempt` runs; return the settled state.
async fn follow(
    rx: &mut watch::Receiver<WeatherState>,
    attempt: JoinHandle<()>,
    out: &mut impl Write,
) -> anyhow::Result<WeatherState> {
    tokio::pin!(attempt);
    let mut shown_loading = false;

    loop {
        tokio::select! {
            done = &mut attempt => {
                done.context("Forecast attempt failed")?;
                break;
            }
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let loading = rx.borrow_and_update().loading;
                if loading && !shown_loading {
                    writeln!(out, "Loading...")?;
                    shown_loading = true;
                }
            }
        }
    }

    let state = rx.borrow_and_update().clone();
    debug!(
        generation = state.generation(),
        loading = state.loading,
        error = state.error.as_deref(),
        "attempt settled"
    );
    Ok(state)
}

async fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let config = tokio::task::spawn_blocking(move || prompt_config(current))
        .await
        .context("Prompt task failed")??;

    config.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

fn prompt_config(current: Config) -> anyhow::Result<Config> {
    let geocoding_url = Text::new("Geocoding endpoint:")
        .with_default(&current.geocoding_url)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    let forecast_url = Text::new("Forecast endpoint:")
        .with_default(&current.forecast_url)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    let debounce_ms = CustomType::<u64>::new("Debounce interval (ms):")
        .with_default(current.debounce_ms)
        .with_error_message("Please enter a whole number of milliseconds")
        .prompt()
        .context("Failed to read debounce interval")?;

    let config = Config { geocoding_url, forecast_url, debounce_ms };
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use weather_core::{ForecastData, ForecastError, GeoPlace, WeatherProvider};

    #[derive(Debug)]
    struct SlowProvider {
        latency: Duration,
    }

    #[async_trait]
    impl WeatherProvider for SlowProvider {
        async fn geocode(&self, query: &str) -> Result<Option<GeoPlace>, ForecastError> {
            tokio::time::sleep(self.latency).await;
            Ok((query == "Berlin").then(|| GeoPlace {
                latitude: 52.5,
                longitude: 13.4,
                timezone: Some("Europe/Berlin".into()),
                name: "Berlin".into(),
                country_code: "DE".into(),
            }))
        }

        async fn forecast(&self, place: &GeoPlace) -> Result<ForecastData, ForecastError> {
            tokio::time::sleep(self.latency).await;
            Ok(ForecastData::new(
                place.name.clone(),
                vec!["2024-01-01".into(), "2024-01-02".into()],
                vec![-1.0, 0.0],
                vec![5.0, 6.0],
                vec![0, 61],
            ))
        }
    }

    fn resolver() -> ForecastResolver {
        ForecastResolver::new(
            Arc::new(SlowProvider { latency: Duration::from_millis(200) }),
            Duration::from_millis(500),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn follow_prints_loading_once_and_returns_settled_state() {
        let resolver = resolver();
        let mut rx = resolver.subscribe();
        let mut out = Vec::new();

        let attempt = resolver.set_query("Berlin").expect("attempt scheduled");
        let state = follow(&mut rx, attempt, &mut out).await.expect("attempt settles");

        assert_eq!(String::from_utf8(out).unwrap(), "Loading...\n");
        assert!(!state.loading);
        assert_eq!(state.status_line().as_deref(), Some("Berlin 🇩🇪"));
        assert_eq!(state.visible_forecast().map(|f| f.days()), Some(2));
    }

    #[tokio::test(start_paused = true)]
    async fn follow_returns_failure_state() {
        let resolver = resolver();
        let mut rx = resolver.subscribe();
        let mut out = Vec::new();

        let attempt = resolver.set_query("zzzzqqqq").expect("attempt scheduled");
        let state = follow(&mut rx, attempt, &mut out).await.expect("attempt settles");

        assert_eq!(state.error.as_deref(), Some("Location not found: zzzzqqqq"));
        assert!(!state.loading);
        assert!(render(&state).starts_with("Location not found"));
    }
}
