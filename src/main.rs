use clap::Parser;
use log::error;
use reqwest::Client;
use sighting_weather::{
    ObservationClient, SightingWeather, SightingWeatherError, SosCredentials,
    StationCatalogBuilder, WindowDateFormat, DEFAULT_DAYS_BACK, DEFAULT_KINGDOM, METOBS_URL,
};
use std::error::Error;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(about = "Match species observations to their nearest SMHI weather station.")]
struct Cli {
    /// Scientific name of the organism to look up
    #[arg(long, default_value = "Cantharellus cibarius")]
    species: String,
    #[arg(long, default_value = DEFAULT_KINGDOM)]
    kingdom: String,
    /// Days of weather to cover before each observation
    #[arg(long, default_value_t = DEFAULT_DAYS_BACK)]
    days_back: u32,
    /// Print window dates as YYYY-MM-DD instead of YYYY-MM_DD
    #[arg(long)]
    iso_dates: bool,
    #[arg(long, env = "SOS_SUBSCRIPTION_KEY", hide_env_values = true)]
    subscription_key: String,
    /// Bearer token for the SOS API
    #[arg(long, env = "SOS_AUTHORIZATION", hide_env_values = true)]
    authorization: String,
    #[arg(long, env = "SMHI_METOBS_URL", default_value = METOBS_URL)]
    smhi_base_url: String,
}

impl Cli {
    fn date_format(&self) -> WindowDateFormat {
        if self.iso_dates {
            WindowDateFormat::Iso
        } else {
            WindowDateFormat::Legacy
        }
    }
}

async fn run(args: Cli) -> Result<(), SightingWeatherError> {
    let format = args.date_format();
    let http = Client::builder()
        .build()
        .map_err(SightingWeatherError::HttpClient)?;
    let client = SightingWeather::from_parts(
        ObservationClient::new(
            http.clone(),
            SosCredentials::new(args.subscription_key, args.authorization),
        ),
        StationCatalogBuilder::with_base_url(http, &args.smhi_base_url),
    );

    let correlation = client
        .correlate()
        .species(&args.species)
        .kingdom(&args.kingdom)
        .days_back(args.days_back)
        .call()
        .await?;

    println!("{}", correlation.to_frame(format)?);
    Ok(())
}

fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    message
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", describe(&e));
            ExitCode::FAILURE
        }
    }
}
