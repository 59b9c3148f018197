use std::io;
use thiserror::Error;

/// Error type shared by the qweather core components.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// No usable API key in the environment.
    #[error(
        "No QWeather API key configured.\n\
         Hint: set QWEATHER_API_KEY in the environment or in a .env file (see .env.example)."
    )]
    MissingApiKey,

    /// Geocoder returned no match for the requested city.
    #[error("City '{0}' was not found. Check the spelling or try the pinyin name.")]
    CityNotFound(String),

    /// Provider answered with a non-success business code.
    #[error("QWeather API returned error code {code}")]
    Api { code: String },

    /// HTTP-level failure with a non-success status.
    #[error("QWeather request failed with status {status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    /// A response was received but required fields are missing or unparsable.
    #[error("Malformed weather payload: {0}")]
    MalformedPayload(String),

    /// Wrapper for reqwest errors (connect failures, timeouts).
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    /// Wrapper for I/O errors (cache directory, entry files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Wrapper for JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
