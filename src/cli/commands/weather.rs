use crate::cli::commands::block_on;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, warning};
use crate::weather::{WeatherClient, describe_weather_code};

/// Show the current weather. A failed lookup is not an error: there is
/// simply nothing to show.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Weather { lat, lon } = cmd {
        let (Some(lat), Some(lon)) = (lat.or(cfg.latitude), lon.or(cfg.longitude)) else {
            return Err(AppError::InvalidInput(
                "coordinates missing: pass --lat/--lon or set latitude/longitude in the config"
                    .into(),
            ));
        };

        let client = WeatherClient::new(&cfg.weather_base_url)?;

        match block_on(client.fetch_current_opt(lat, lon))? {
            Some(w) => info(format!(
                "{:.1}°C, {} (code {})",
                w.temperature_celsius,
                describe_weather_code(w.weather_code),
                w.weather_code
            )),
            None => warning("Weather unavailable."),
        }
    }

    Ok(())
}
