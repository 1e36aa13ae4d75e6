use sighting_weather::{
    build_lookback_windows, join_observations_to_stations, resolve_nearest_station, LatLon,
    Observation, SightingWeatherError, Station, StationCatalog, WindowDateFormat,
};

fn station(id: i64, name: &str, latitude: f64, longitude: f64) -> Station {
    Station {
        id,
        key: id.to_string(),
        active: true,
        latitude,
        longitude,
        name: Some(name.to_string()),
        height: None,
    }
}

fn main() -> Result<(), SightingWeatherError> {
    let catalog = StationCatalog::new(vec![
        station(98210, "Stockholm", 59.3417, 18.0549),
        station(52350, "Malmö", 55.5714, 13.0734),
        station(180940, "Kiruna", 67.8267, 20.3387),
    ])?;

    let id = resolve_nearest_station(catalog.stations(), ("59.30", "18.10"))?;
    println!("Nearest to Södermalm: {:?}", catalog.get(id).and_then(|s| s.name.as_deref()));

    let observations = vec![
        Observation::new("2023-08-10T12:00:00", LatLon(59.30, 18.10)),
        Observation::new("2023-08-11", LatLon(55.65, 13.10)),
        Observation::new("2023-08-20/2023-08-21", LatLon(67.85, 20.22)),
    ];
    let station_dates = join_observations_to_stations(&catalog, &observations)?;
    for window in build_lookback_windows(&station_dates, 14)? {
        println!(
            "{}: {} .. {}",
            window.station_id,
            window.start_label(WindowDateFormat::Iso),
            window.end_label(WindowDateFormat::Iso)
        );
    }

    Ok(())
}
