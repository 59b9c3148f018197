use directories::ProjectDirs;
use std::{env, path::PathBuf, time::Duration};

use crate::error::WeatherError;

/// Default city when neither the CLI argument nor `DEFAULT_CITY` is set.
pub const DEFAULT_CITY: &str = "beijing";

/// Freshness window for cached weather data.
pub const CACHE_EXPIRY: Duration = Duration::from_secs(30 * 60);

const DEFAULT_GEO_URL: &str = "https://geoapi.qweather.com";
const DEFAULT_API_URL: &str = "https://devapi.qweather.com";

/// Placeholder shipped in .env.example; treated the same as an unset key.
const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

/// Runtime settings, assembled from the environment (with `.env` support).
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: Option<String>,
    pub default_city: String,
    pub cache_dir: PathBuf,
    pub geo_base_url: String,
    pub api_base_url: String,
}

impl Settings {
    /// Read settings from the environment, loading a `.env` file first if one exists.
    pub fn from_env() -> Result<Self, WeatherError> {
        let _ = dotenvy::dotenv();

        let cache_dir = match env::var_os("QWEATHER_CACHE_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => Self::default_cache_dir()?,
        };

        Ok(Self {
            api_key: env::var("QWEATHER_API_KEY").ok(),
            default_city: env::var("DEFAULT_CITY").unwrap_or_else(|_| DEFAULT_CITY.to_string()),
            cache_dir,
            geo_base_url: env::var("QWEATHER_GEO_URL")
                .unwrap_or_else(|_| DEFAULT_GEO_URL.to_string()),
            api_base_url: env::var("QWEATHER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        })
    }

    /// Return the API key, rejecting empty values and the .env.example placeholder.
    pub fn require_api_key(&self) -> Result<&str, WeatherError> {
        match self.api_key.as_deref() {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(key),
            _ => Err(WeatherError::MissingApiKey),
        }
    }

    /// Path to the per-user weather cache directory.
    pub fn default_cache_dir() -> Result<PathBuf, WeatherError> {
        let dirs = ProjectDirs::from("dev", "qweather", "qweather-cli").ok_or_else(|| {
            WeatherError::Io(std::io::Error::other(
                "Could not determine platform cache directory",
            ))
        })?;

        Ok(dirs.cache_dir().to_path_buf())
    }

    #[cfg(test)]
    fn with_api_key(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            default_city: DEFAULT_CITY.to_string(),
            cache_dir: PathBuf::from("unused"),
            geo_base_url: DEFAULT_GEO_URL.to_string(),
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}
