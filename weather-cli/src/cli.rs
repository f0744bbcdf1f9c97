use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, CustomUserError, Password, PasswordDisplayMode, validator::Validation};
use weather_core::{Config, WeatherInfo, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and request timeout.
    Configure,

    /// Show current weather for a location.
    Show {
        /// Location name, e.g. "Tokyo" or "São Paulo".
        location: String,

        /// API key to use instead of the configured one.
        #[arg(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Request timeout in seconds.
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        self.execute(config).await
    }

    async fn execute(self, mut config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(config)?,
            Command::Show { location, api_key, timeout, json } => {
                if let Some(key) = api_key {
                    config.set_api_key(key);
                }
                if timeout.is_some() {
                    config.timeout_secs = timeout;
                }

                let provider = provider_from_config(&config)?;
                let info = provider
                    .query(&location)
                    .await
                    .with_context(|| format!("Failed to look up weather for {location:?}"))?;

                if json {
                    println!("{}", serde_json::to_string_pretty(&info)?);
                } else {
                    println!("{}", render(&location, &info));
                }
            }
        }

        Ok(())
    }
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let api_key = Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    let timeout = CustomType::<u64>::new("Request timeout in seconds:")
        .with_default(config.provider_options().timeout.as_secs())
        .with_validator(validate_timeout)
        .prompt()
        .context("Failed to read timeout")?;

    config.set_api_key(api_key);
    config.timeout_secs = Some(timeout);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn validate_timeout(secs: &u64) -> Result<Validation, CustomUserError> {
    if *secs == 0 {
        Ok(Validation::Invalid("Timeout must be at least one second".into()))
    } else {
        Ok(Validation::Valid)
    }
}

fn render(location: &str, info: &WeatherInfo) -> String {
    if info.found {
        format!("Weather for {location}: {}, {:.1} °C", info.description, info.temperature)
    } else {
        format!("No weather data found for {location}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed_endpoint() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        format!("http://{addr}/data/2.5/weather")
    }

    #[test]
    fn parses_show_with_flags() {
        let cli = Cli::try_parse_from([
            "weather", "show", "São Paulo", "--api-key", "KEY", "--timeout", "5", "--json",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Show { location, api_key, timeout, json } => {
                assert_eq!(location, "São Paulo");
                assert_eq!(api_key.as_deref(), Some("KEY"));
                assert_eq!(timeout, Some(5));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_location() {
        assert!(Cli::try_parse_from(["weather", "show"]).is_err());
    }

    #[test]
    fn show_rejects_zero_timeout() {
        let res = Cli::try_parse_from(["weather", "show", "Tokyo", "--timeout", "0"]);
        assert!(res.is_err());
    }

    #[test]
    fn configure_rejects_zero_timeout() {
        assert!(matches!(validate_timeout(&0), Ok(Validation::Invalid(_))));
        assert!(matches!(validate_timeout(&10), Ok(Validation::Valid)));
    }

    #[tokio::test]
    async fn show_without_api_key_asks_to_configure() {
        let cli = Cli::try_parse_from(["weather", "show", "Tokyo", "--api-key", " "])
            .expect("valid arguments");

        let err = cli.execute(Config::default()).await.unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[tokio::test]
    async fn show_reports_unreachable_provider() {
        let cli = Cli::try_parse_from(["weather", "show", "Tokyo", "--api-key", "KEY"])
            .expect("valid arguments");
        let config = Config { endpoint: Some(closed_endpoint()), ..Config::default() };

        let err = cli.execute(config).await.unwrap_err();
        assert!(err.to_string().contains("Failed to look up weather for \"Tokyo\""));
    }

    #[test]
    fn renders_found_weather() {
        let info = WeatherInfo { temperature: 22.5, description: "clear sky".into(), found: true };
        assert_eq!(render("Tokyo", &info), "Weather for Tokyo: clear sky, 22.5 °C");
    }

    #[test]
    fn renders_missing_weather() {
        assert_eq!(render("Nowhere", &WeatherInfo::empty()), "No weather data found for Nowhere");
    }
}
