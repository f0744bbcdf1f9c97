//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap current-weather lookup behind [`WeatherProvider`]
//! - The normalized [`WeatherInfo`] record and its [`EMPTY_RESULT`] sentinel
//!
//! Diagnostics go through the `log` facade; installing a logger is left to the caller.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::Config;
pub use error::ProviderError;
pub use model::{EMPTY_RESULT, WeatherInfo};
pub use provider::{
    WeatherProvider,
    openweather::{OpenWeatherMap, ProviderOptions},
    provider_from_config,
};
