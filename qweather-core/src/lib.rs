//! Core library for the `qweather` CLI.
//!
//! This crate defines:
//! - Environment-based configuration
//! - The QWeather HTTP client (geocoding + current weather)
//! - The on-disk weather cache
//! - Shared domain models and report formatting
//!
//! It is used by `qweather-cli`, but can also be reused by other binaries or services.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod model;

pub use cache::CacheStore;
pub use client::WeatherClient;
pub use config::Settings;
pub use error::WeatherError;
pub use format::format_report;
pub use model::{Location, LocationId, Observation, Unit, WeatherDocument};
