use sighting_weather::{SightingWeather, SightingWeatherError, SosCredentials, WindowDateFormat};
use std::env;

#[tokio::main]
async fn main() -> Result<(), SightingWeatherError> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let credentials = SosCredentials::new(
        env::var("SOS_SUBSCRIPTION_KEY").unwrap_or_default(),
        env::var("SOS_AUTHORIZATION").unwrap_or_default(),
    );
    let client = SightingWeather::new(credentials)?;

    let correlation = client
        .correlate()
        .species("Boletus edulis")
        .days_back(7)
        .call()
        .await?;

    println!(
        "{} observations near {} stations",
        correlation.observations.len(),
        correlation.station_dates.len()
    );
    println!("{}", correlation.to_frame(WindowDateFormat::Iso)?);

    Ok(())
}
