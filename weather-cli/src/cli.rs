use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tokio::net::TcpListener;
use weather_core::{Config, RelayClient, RelayState, Theme, ViewState, WeatherWidget, relay};

const THEME_COMMAND: &str = ":theme";
const QUIT_COMMAND: &str = ":quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather lookup relay and widget")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the relay endpoint (GET /api/weather?city=...).
    Serve {
        /// Listen address; overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Look up the weather for one city through the relay.
    Show {
        /// City name.
        city: String,

        /// Relay base URL; overrides the config file.
        #[arg(long)]
        relay: Option<String>,

        /// Render with the dark theme.
        #[arg(long)]
        dark: bool,
    },

    /// Interactive lookup loop. `:theme` toggles the theme, `:quit` exits.
    App {
        /// Relay base URL; overrides the config file.
        #[arg(long)]
        relay: Option<String>,
    },

    /// Configure relay and client settings.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Serve { bind } => {
                let bind = bind.unwrap_or_else(|| config.relay.bind.clone());
                tracing::info!(
                    %bind,
                    key_env = %config.relay.api_key_env,
                    "starting weather relay"
                );
                let listener = TcpListener::bind(&bind)
                    .await
                    .with_context(|| format!("Failed to bind relay to {bind}"))?;

                relay::serve(listener, RelayState::from_config(&config.relay))
                    .await
                    .context("Relay server stopped")?;
            }
            Command::Show { city, relay, dark } => {
                let mut widget = widget_for(&config, relay);
                if dark {
                    widget.toggle_theme();
                }

                log_outcome(widget.submit(&city).await);
                println!("{}", widget.render());
            }
            Command::App { relay } => run_app(widget_for(&config, relay)).await?,
            Command::Configure => configure(config)?,
        }

        Ok(())
    }
}

fn log_outcome(state: &ViewState) {
    match state {
        ViewState::Success(weather) => {
            tracing::info!(city = %weather.name, temp = weather.temp, "weather lookup succeeded");
        }
        ViewState::Error(message) => tracing::warn!(%message, "weather lookup failed"),
        ViewState::Idle | ViewState::Loading => {}
    }
}

fn widget_for(config: &Config, relay: Option<String>) -> WeatherWidget {
    let url = relay.unwrap_or_else(|| config.client.relay_url.clone());
    WeatherWidget::new(RelayClient::new(url))
}

async fn run_app(mut widget: WeatherWidget) -> anyhow::Result<()> {
    loop {
        let input = match Text::new("City:")
            .with_help_message(":theme toggles dark mode, :quit exits")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city name"),
        };

        match input.trim() {
            QUIT_COMMAND => break,
            THEME_COMMAND => {
                let theme = widget.toggle_theme();
                tracing::debug!(?theme, "theme toggled");
                println!("Theme: {}", if theme == Theme::Dark { "dark" } else { "light" });
            }
            _ => {
                println!("Loading...");
                log_outcome(widget.submit(&input).await);
                println!("{}\n", widget.render());
            }
        }
    }

    Ok(())
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let relay_url = Text::new("Relay URL:")
        .with_default(&config.client.relay_url)
        .prompt()
        .context("Failed to read relay URL")?;
    let bind = Text::new("Relay listen address:")
        .with_default(&config.relay.bind)
        .prompt()
        .context("Failed to read listen address")?;

    config.set_relay_url(relay_url);
    config.set_bind(bind);
    config.save()?;
    tracing::info!(
        relay_url = %config.client.relay_url,
        bind = %config.relay.bind,
        "configuration saved"
    );

    println!(
        "Saved {}.\nThe provider key is read from ${} when the relay handles a request.",
        Config::config_file_path()?.display(),
        config.relay.api_key_env
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_flags() {
        let cli = Cli::parse_from(["weather", "show", "New York", "--dark", "--relay", "http://x"]);

        match cli.command {
            Command::Show { city, relay, dark } => {
                assert_eq!(city, "New York");
                assert_eq!(relay.as_deref(), Some("http://x"));
                assert!(dark);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_serve_bind_override() {
        let cli = Cli::parse_from(["weather", "serve", "--bind", "0.0.0.0:8080"]);

        assert!(matches!(cli.command, Command::Serve { bind: Some(ref b) } if b == "0.0.0.0:8080"));
    }

    #[test]
    fn log_outcome_accepts_every_state() {
        log_outcome(&ViewState::Idle);
        log_outcome(&ViewState::Loading);
        log_outcome(&ViewState::Error("city not found".into()));
    }

    #[test]
    fn relay_flag_overrides_config() {
        let widget = widget_for(&Config::default(), Some("http://override:1".into()));
        assert!(format!("{widget:?}").contains("http://override:1"));
    }
}
