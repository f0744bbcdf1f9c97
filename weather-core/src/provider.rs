use crate::{Config, ProviderError, WeatherInfo, provider::openweather::OpenWeatherMap};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current weather for a free-text location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Look up `location` with exactly one outbound request.
    ///
    /// `Ok(EMPTY_RESULT)` means the provider had no data for the location; any `Err` also stands
    /// for `EMPTY_RESULT`.
    async fn query(&self, location: &str) -> Result<WeatherInfo, ProviderError>;
}

/// Construct the OpenWeatherMap provider from stored configuration.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured for OpenWeatherMap.\n\
                 Hint: run `weather configure` and enter your API key."
        )
    })?;

    let provider = OpenWeatherMap::with_options(api_key.to_owned(), config.provider_options())?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `weather configure`"));
    }

    #[test]
    fn provider_from_config_errors_on_bad_endpoint() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.endpoint = Some("::nope::".to_string());

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid provider endpoint"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
