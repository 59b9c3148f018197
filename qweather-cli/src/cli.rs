use chrono::Local;
use clap::{Parser, ValueEnum};

use qweather_core::{
    CacheStore, Settings, Unit, WeatherClient, config::CACHE_EXPIRY, format_report,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "qweather", version, about = "Weather lookup CLI for QWeather")]
pub struct Cli {
    /// City name (Chinese or pinyin), e.g. 北京 or beijing.
    /// Defaults to DEFAULT_CITY from the environment.
    pub city: Option<String>,

    /// Temperature unit.
    #[arg(long, value_enum, default_value_t = UnitArg::C)]
    pub unit: UnitArg,

    /// Remove all cached weather data and exit.
    #[arg(long)]
    pub clear_cache: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    /// Celsius
    C,
    /// Fahrenheit
    F,
}

impl From<UnitArg> for Unit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::C => Unit::Celsius,
            UnitArg::F => Unit::Fahrenheit,
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::from_env()?;

        // Cache clearing needs no API key and touches no network.
        if self.clear_cache {
            let cache = CacheStore::open(&settings.cache_dir, CACHE_EXPIRY)?;
            cache.clear()?;
            println!("Cache cleared");
            return Ok(());
        }

        let client = WeatherClient::from_settings(&settings)?;

        let city = self.city.as_deref().unwrap_or(&settings.default_city);
        let location = client.lookup_city(city).await?;
        let document = client.current_weather(&location.id).await?;

        let report = format_report(&document, &location.name, self.unit.into(), Local::now())?;
        println!("{report}");

        Ok(())
    }
}
