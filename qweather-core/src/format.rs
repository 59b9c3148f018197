//! Human-readable report rendering. Pure: the report timestamp is passed in,
//! nothing is read from the environment or the clock.

use chrono::{DateTime, Local};

use crate::{
    error::WeatherError,
    model::{Unit, WeatherDocument},
};

/// Render a weather document as the multi-line report printed to stdout.
pub fn format_report(
    doc: &WeatherDocument,
    display_name: &str,
    unit: Unit,
    now: DateTime<Local>,
) -> Result<String, WeatherError> {
    let obs = &doc.now;

    let temp_c = numeric_field("temp", &obs.temp)?;
    let feels_c = numeric_field("feelsLike", &obs.feels_like)?;
    numeric_field("humidity", &obs.humidity)?;

    let (temp, feels) = match unit {
        Unit::Celsius => (format!("{temp_c:.1}°C"), format!("{feels_c:.1}°C")),
        Unit::Fahrenheit => (
            format!("{:.1}°F", to_fahrenheit(temp_c)),
            format!("{:.1}°F", to_fahrenheit(feels_c)),
        ),
    };

    let icon = condition_icon(&obs.text);
    let rule = "━".repeat(27);

    let mut out = String::new();
    out.push_str(&format!(
        "{icon} {display_name} weather ({})\n",
        now.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("🌡️  Temperature: {temp}\n"));
    out.push_str(&format!("😅  Feels like: {feels}\n"));
    out.push_str(&format!("💧  Humidity: {}%\n", obs.humidity));
    match &obs.wind_dir {
        Some(dir) => out.push_str(&format!("💨  Wind: {} km/h {dir}\n", obs.wind_speed)),
        None => out.push_str(&format!("💨  Wind: {} km/h\n", obs.wind_speed)),
    }
    if let Some(vis) = &obs.vis {
        out.push_str(&format!("👀  Visibility: {vis} km\n"));
    }
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "Updated: {}\n",
        doc.update_time.replace('T', " ")
    ));

    Ok(out)
}

fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

fn numeric_field(name: &str, raw: &str) -> Result<f64, WeatherError> {
    raw.parse::<f64>()
        .map_err(|_| WeatherError::MalformedPayload(format!("field '{name}' is not numeric: {raw:?}")))
}

fn condition_icon(text: &str) -> &'static str {
    match text {
        "Sunny" => "☀️",
        "Cloudy" => "⛅",
        "Overcast" => "☁️",
        "Rain" => "🌧️",
        "Snow" => "❄️",
        "Thunder" => "⚡",
        "Fog" | "Haze" => "🌫️",
        _ => "🌤️",
    }
}
