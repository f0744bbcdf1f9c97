use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::ProviderError,
    model::{EMPTY_RESULT, WeatherInfo},
};

use super::WeatherProvider;

pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const KELVIN_OFFSET: f64 = 273.15;

/// Connection settings for [`OpenWeatherMap`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderOptions {
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Current-weather lookup against the OpenWeatherMap `data/2.5/weather` API.
#[derive(Debug, Clone)]
pub struct OpenWeatherMap {
    api_key: String,
    endpoint: Url,
    http: Client,
}

impl OpenWeatherMap {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Self::with_options(api_key, ProviderOptions::default())
    }

    pub fn with_options(api_key: String, options: ProviderOptions) -> Result<Self, ProviderError> {
        let endpoint = Url::parse(&options.endpoint)?;
        let http = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(ProviderError::Client)?;

        Ok(Self { api_key, endpoint, http })
    }

    /// Full request URL for `location`, with the query form-urlencoded.
    pub fn request_url(&self, location: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", location)
            .append_pair("appid", &self.api_key);
        url
    }

    async fn fetch(&self, location: &str) -> Result<String, ProviderError> {
        debug!("Querying {} for {location:?}", self.endpoint);

        let res = self
            .http
            .get(self.request_url(location))
            .send()
            .await
            .map_err(ProviderError::Transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            let err = ProviderError::Status { status };
            warn!("Request failed: {err}");
            return Err(err);
        }

        res.text().await.map_err(ProviderError::Transport)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherMap {
    async fn query(&self, location: &str) -> Result<WeatherInfo, ProviderError> {
        let body = self.fetch(location).await?;

        let parsed = match serde_json::from_str::<OwResponse>(&body) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("Discarding malformed OpenWeatherMap payload for {location:?}: {err}");
                OwResponse::default()
            }
        };

        Ok(parsed.into_weather_info())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwMain {
    /// Kelvin.
    #[serde(deserialize_with = "lenient")]
    temp: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwSys {
    #[serde(deserialize_with = "lenient")]
    country: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwWeather {
    #[serde(deserialize_with = "lenient")]
    description: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwResponse {
    #[serde(deserialize_with = "lenient")]
    name: String,
    #[serde(deserialize_with = "lenient")]
    main: OwMain,
    #[serde(deserialize_with = "lenient")]
    sys: OwSys,
    #[serde(deserialize_with = "lenient")]
    weather: Vec<OwWeather>,
}

/// Falls back to the default when a field is `null` or of the wrong type, so one bad field
/// does not discard the rest of the payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

impl OwResponse {
    fn into_weather_info(self) -> WeatherInfo {
        match self.weather.into_iter().next() {
            Some(condition) if !condition.description.is_empty() => {
                debug!("Resolved {} ({}) at {} K", self.name, self.sys.country, self.main.temp);

                WeatherInfo {
                    temperature: kelvin_to_display_celsius(self.main.temp),
                    description: condition.description,
                    found: true,
                }
            }
            _ => EMPTY_RESULT,
        }
    }
}

/// Celsius floored to a whole degree, then shifted up by half a degree.
pub fn kelvin_to_display_celsius(kelvin: f64) -> f64 {
    (kelvin - KELVIN_OFFSET).floor() + 0.5
}
