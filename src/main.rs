//! Cosmic Forecast
//!
//! Prints the Earth + space weather dashboard for a location.

use chrono::Local;
use clap::{Parser, Subcommand};
use cosmic_forecast::{
    analysis::{self, KpSeverity},
    config::Config,
    data::fallback,
    CombinedWeather, Coordinates, WeatherService,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cosmic-forecast")]
#[command(about = "Earth and space weather dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (defaults to cosmic.toml / config.toml if present)
    #[arg(short, long)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch live data, falling back to synthetic data on failure
    Fetch {
        /// Latitude override
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude override
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,
        /// Print the model as JSON
        #[arg(long)]
        json: bool,
        /// Fail instead of falling back to synthetic data
        #[arg(long)]
        strict: bool,
    },
    /// Print a synthetic dataset
    Mock {
        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
        /// Print the model as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    if let Ok(key) = std::env::var("NASA_API_KEY") {
        config.space.api_key = key;
    }

    match cli.command {
        Commands::Fetch {
            lat,
            lon,
            json,
            strict,
        } => fetch(config, lat, lon, json, strict).await,
        Commands::Mock { seed, json } => {
            let today = Local::now().date_naive();
            let weather = match seed {
                Some(seed) => fallback::generate(today, &mut StdRng::seed_from_u64(seed)),
                None => fallback::generate(today, &mut rand::rng()),
            };
            print_weather(&weather, json)
        }
    }
}

async fn fetch(
    config: Config,
    lat: Option<f64>,
    lon: Option<f64>,
    json: bool,
    strict: bool,
) -> anyhow::Result<()> {
    let coords = Coordinates::new(
        lat.unwrap_or(config.location.latitude),
        lon.unwrap_or(config.location.longitude),
    );
    let service = WeatherService::from_config(&config)?;

    let weather = if strict {
        let today = Local::now().date_naive();
        let mut rng = StdRng::from_os_rng();
        service.fetch_live(coords, today, &mut rng).await?
    } else {
        service.fetch_weather_now(coords).await
    };

    print_weather(&weather, json)
}

fn print_weather(weather: &CombinedWeather, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(weather)?);
        return Ok(());
    }

    let earth = &weather.earth;
    let space = &weather.space;

    println!("\n🌍 Earth Weather ({})\n", earth.location);
    println!("  Condition:   {}", earth.condition);
    println!("  Temperature: {}°C", earth.temperature);
    println!("  Wind Speed:  {} m/s", earth.wind_speed);
    println!("  Humidity:    {}%", earth.humidity);

    let severity = KpSeverity::from_kp(space.kp_index);
    println!("\n☀️  Space Weather\n");
    println!("  Solar Wind:  {} km/s", space.solar_wind_speed);
    println!("  Kp-index:    {} ({})", space.kp_index, severity);
    println!("  Recent CMEs: {}", space.cme_count);

    println!("\n📅 7-Day Forecast\n");
    println!("{:<6} {:>8} {:<14} {:>12} {:>4}", "Day", "Temp", "Condition", "Solar Wind", "Kp");
    println!("{}", "-".repeat(48));
    for (e, s) in earth.forecast.iter().zip(&space.forecast) {
        println!(
            "{:<6} {:>6}°C {:<14} {:>7} km/s {:>4}",
            e.day, e.temperature, e.condition, s.solar_wind_speed, s.kp_index
        );
    }

    if let Some(peak) = analysis::peak_kp_forecast(&space.forecast) {
        println!(
            "\n⚡ Peak Kp {} on {} ({})",
            peak.kp_index,
            peak.day,
            KpSeverity::from_kp(peak.kp_index)
        );
    }

    println!("\n📈 Last 7 Days\n");
    println!("{:<6} {:>8} {:>10} {:>6} {:>6}", "Day", "Temp", "Solar Wind", "CMEs", "Kp");
    let rows = analysis::temperature_vs_solar_wind(weather);
    for (row, geo) in rows.iter().zip(analysis::geomagnetic_rows(space)) {
        let temp = row
            .earth
            .map(|t| format!("{:.1}", t))
            .unwrap_or_else(|| "N/A".to_string());
        let wind = row
            .solar_wind
            .map(|w| format!("{:.0}", w))
            .unwrap_or_else(|| "N/A".to_string());
        println!(
            "{:<6} {:>8} {:>10} {:>6} {:>6}",
            row.time, temp, wind, geo.cme_count, geo.max_kp
        );
    }

    Ok(())
}
