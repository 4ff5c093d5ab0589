use std::sync::Arc;

use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Text};
use live_weather_core::{
    Config, ErrorKind, LiveLocationButton, LiveLocationError, LocationClient, RequestOutcome,
    WeatherResult,
    button::{ErrorCallback, SuccessCallback},
};

use crate::terminal::{BUTTON_ID, TerminalPage};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "live-weather", version, about = "Live-location weather for the irrigation server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set the server URL, session cookie and fixed position.
    Configure,

    /// Print the current position fix.
    Locate {
        #[command(flatten)]
        overrides: Overrides,
    },

    /// Fetch live weather for the current position.
    Weather {
        #[command(flatten)]
        overrides: Overrides,

        /// Print notifications as plain lines instead of toasts.
        #[arg(long)]
        plain: bool,
    },
}

/// One-off overrides on top of the saved config.
#[derive(Debug, Args)]
pub struct Overrides {
    /// Server origin, e.g. http://127.0.0.1:5000
    #[arg(long)]
    server: Option<String>,

    /// Session cookie sent with the request, e.g. "session=..."
    #[arg(long)]
    cookie: Option<String>,

    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Accuracy in meters reported with --lat/--lon.
    #[arg(long, requires = "lat")]
    accuracy: Option<f64>,
}

impl Overrides {
    fn apply(self, config: &mut Config) {
        if let Some(server) = self.server {
            config.server_url = server;
        }
        if let Some(cookie) = self.cookie {
            config.session_cookie = Some(cookie);
        }
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            config.set_position(lat, lon, self.accuracy);
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Locate { overrides } => {
                let client = LocationClient::from_config(&load_config(overrides)?)?;
                let coords = client.current_coordinates().await?;

                println!(
                    "{:.6}, {:.6} (±{:.0} m) at {}",
                    coords.latitude,
                    coords.longitude,
                    coords.accuracy_meters,
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                );
                Ok(())
            }
            Command::Weather { overrides, plain } => {
                let config = load_config(overrides)?;
                let client = Arc::new(LocationClient::from_config(&config)?);

                let page = Arc::new(TerminalPage::new("Use my location", !plain));
                let on_success: SuccessCallback = Box::new(print_weather);
                let on_error: ErrorCallback = Box::new(|err: &LiveLocationError| {
                    tracing::debug!(kind = %err.kind(), "weather request failed");
                });

                let binding = LiveLocationButton::bind(
                    page,
                    BUTTON_ID,
                    client,
                    Some(on_success),
                    Some(on_error),
                )
                .ok_or_else(|| anyhow!("live location button missing from terminal page"))?
                .with_toast_autohide(config.toast_autohide());

                match binding.click().await {
                    Some(RequestOutcome::Success(_)) => Ok(()),
                    Some(RequestOutcome::Failure(kind, message)) => {
                        Err(anyhow!("{message} ({kind})\nHint: {}", failure_hint(kind)))
                    }
                    None => Err(anyhow!(
                        "{}\nHint: {}",
                        LiveLocationError::Unsupported,
                        failure_hint(ErrorKind::Unsupported)
                    )),
                }
            }
        }
    }
}

fn load_config(overrides: Overrides) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    overrides.apply(&mut config);
    Ok(config)
}

fn failure_hint(kind: ErrorKind) -> &'static str {
    if kind.is_location() {
        "run `live-weather configure` to set a fixed position, or pass --lat/--lon."
    } else {
        "check the server URL and session cookie (`live-weather configure`, --server, --cookie)."
    }
}

fn print_weather(weather: &WeatherResult) {
    match serde_json::to_string_pretty(weather.as_json()) {
        Ok(json) => println!("{json}"),
        Err(e) => tracing::warn!("could not render weather payload: {e}"),
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.server_url = Text::new("Server URL:")
        .with_default(&config.server_url)
        .prompt()
        .context("Failed to read server URL")?;

    let cookie = Text::new("Session cookie (empty for none):")
        .with_default(config.session_cookie.as_deref().unwrap_or_default())
        .prompt()
        .context("Failed to read session cookie")?;
    config.session_cookie = Some(cookie).filter(|c| !c.trim().is_empty());

    let fixed = Confirm::new("Use a fixed position for this host?")
        .with_default(config.position.is_some())
        .prompt()
        .context("Failed to read answer")?;

    if fixed {
        let current = config.position;
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_starting_input(&current.map(|p| p.latitude.to_string()).unwrap_or_default())
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_starting_input(&current.map(|p| p.longitude.to_string()).unwrap_or_default())
            .prompt()
            .context("Failed to read longitude")?;
        let accuracy = CustomType::<f64>::new("Accuracy in meters (Esc to skip):")
            .prompt_skippable()
            .context("Failed to read accuracy")?;

        config.set_position(latitude, longitude, accuracy);
    } else {
        config.position = None;
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
