//! QWeather HTTP client: city geocoding and cache-backed current weather.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    cache::CacheStore,
    config::{CACHE_EXPIRY, Settings},
    error::WeatherError,
    model::{Location, LocationId, WeatherDocument},
};

const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);
const WEATHER_TIMEOUT: Duration = Duration::from_secs(15);

/// Business code QWeather uses for a successful response.
const CODE_OK: &str = "200";

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    api_key: String,
    geo_base_url: String,
    api_base_url: String,
    cache: CacheStore,
}

impl WeatherClient {
    pub fn new(
        api_key: String,
        geo_base_url: String,
        api_base_url: String,
        cache: CacheStore,
    ) -> Self {
        Self {
            http: Client::new(),
            api_key,
            geo_base_url,
            api_base_url,
            cache,
        }
    }

    /// Build a client from settings. Fails when no API key is configured, so
    /// the check happens before any network call.
    pub fn from_settings(settings: &Settings) -> Result<Self, WeatherError> {
        let api_key = settings.require_api_key()?.to_string();
        let cache = CacheStore::open(&settings.cache_dir, CACHE_EXPIRY)?;

        Ok(Self::new(
            api_key,
            settings.geo_base_url.clone(),
            settings.api_base_url.clone(),
            cache,
        ))
    }

    /// Resolve a free-text city name to a location. The provider may return
    /// several matches; the first one wins. Lookups are never cached.
    pub async fn lookup_city(&self, city: &str) -> Result<Location, WeatherError> {
        let url = format!("{}/v2/city/lookup", self.geo_base_url);

        debug!(%city, "resolving city via geocoder");

        let res = self
            .http
            .get(&url)
            .query(&[("location", city), ("key", self.api_key.as_str())])
            .timeout(GEOCODE_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: GeoResponse = serde_json::from_str(&body)?;

        if parsed.code != CODE_OK {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        let place = parsed
            .location
            .into_iter()
            .flatten()
            .next()
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))?;

        Ok(Location {
            id: LocationId(place.id),
            name: place.name,
        })
    }

    /// Current conditions for a location, served from the cache when the
    /// entry is fresh and fetched (then persisted) otherwise. A stale entry
    /// is never used as fallback when the fetch fails.
    pub async fn current_weather(
        &self,
        id: &LocationId,
    ) -> Result<WeatherDocument, WeatherError> {
        if let Some(doc) = self.cache.load(id)? {
            info!(location = %id, "serving cached weather data");
            return Ok(doc);
        }

        info!(location = %id, "fetching current weather");
        let doc = self.fetch_current(id).await?;
        self.cache.store(id, &doc)?;

        Ok(doc)
    }

    async fn fetch_current(&self, id: &LocationId) -> Result<WeatherDocument, WeatherError> {
        let url = format!("{}/v7/weather/now", self.api_base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("location", id.as_str()), ("key", self.api_key.as_str())])
            .timeout(WEATHER_TIMEOUT)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let doc: WeatherDocument = serde_json::from_str(&body)
            .map_err(|err| WeatherError::MalformedPayload(err.to_string()))?;

        if doc.code != CODE_OK {
            return Err(WeatherError::Api { code: doc.code });
        }

        Ok(doc)
    }
}

#[derive(Debug, Deserialize)]
struct GeoPlace {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    code: String,
    location: Option<Vec<GeoPlace>>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    // back off to a char boundary so multibyte bodies can't panic the slice
    let mut cut = MAX;
    while !body.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &body[..cut])
}
