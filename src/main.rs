use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

use fairweather::config::{Config, DEFAULT_HISTORY_YEARS};
use fairweather::fetch::{event_datetime, run_analysis, AnalysisRequest};
use fairweather::output::{self, ExportRow};
use fairweather::scoring::ComfortThresholds;
use fairweather::weather::types::AnalysisKind;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Clone, Debug, Default)]
struct EventArgs {
    /// Place name or "lat, lon" (defaults to `location` from the config)
    location: Option<String>,

    /// Event date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Event time, 24-hour HH:MM (defaults to 14:00)
    #[arg(long)]
    time: Option<String>,

    /// Comfort threshold: temperature in °C
    #[arg(long)]
    max_temp: Option<f64>,

    /// Comfort threshold: relative humidity in %
    #[arg(long)]
    max_humidity: Option<f64>,

    /// Comfort threshold: wind speed in km/h
    #[arg(long)]
    max_wind: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score the live forecast for an event (default if no subcommand)
    Forecast {
        #[command(flatten)]
        event: EventArgs,

        /// Also open the location on OpenStreetMap
        #[arg(long)]
        open_map: bool,
    },
    /// Score a multi-year historical average for the same date and hour
    History {
        #[command(flatten)]
        event: EventArgs,

        /// How many past years to average
        #[arg(long)]
        years: Option<u32>,
    },
    /// Run an analysis and emit CSV instead of the score table
    Export {
        #[command(flatten)]
        event: EventArgs,

        /// Use the historical average instead of the live forecast
        #[arg(long)]
        history: bool,

        /// How many past years to average (with --history)
        #[arg(long)]
        years: Option<u32>,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Open a location on OpenStreetMap in the browser
    Map { location: Option<String> },
    /// Create the config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "fairweather")]
#[command(about = "Adverse-weather likelihood scores for outdoor events", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fairweather/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Skip the on-disk HTTP cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Input mistakes exit 1; everything else that fails an analysis exits 2.
fn exit_code_for(e: &anyhow::Error) -> i32 {
    let message = format!("{:#}", e);
    let input_markers = [
        "Invalid date",
        "Invalid time",
        "Location is empty",
        "No location matches",
        "Coordinates out of range",
        "at least 1 year",
    ];
    if input_markers.iter().any(|m| message.contains(m)) {
        EXIT_INPUT
    } else {
        EXIT_NETWORK
    }
}

fn resolve_location_arg(arg: Option<String>, config: &Config) -> Result<String, ()> {
    match arg.or_else(|| config.location.clone()) {
        Some(location) => Ok(location),
        None => {
            eprintln!("No location given.");
            eprintln!("Pass one as an argument, or set a default in ~/.config/fairweather/config.yaml:");
            eprintln!("  location: \"New York, NY\"");
            Err(())
        }
    }
}

fn build_thresholds(config: &Config, event: &EventArgs) -> Option<ComfortThresholds> {
    let overrides = ComfortThresholds {
        temperature: event.max_temp,
        humidity: event.max_humidity,
        wind_speed: event.max_wind,
    };
    let merged = config
        .thresholds
        .clone()
        .unwrap_or_default()
        .merged(&overrides);
    (!merged.is_empty()).then_some(merged)
}

fn build_request(
    config: &Config,
    event: &EventArgs,
    kind: AnalysisKind,
    years: Option<u32>,
) -> Result<AnalysisRequest, i32> {
    let location = match resolve_location_arg(event.location.clone(), config) {
        Ok(l) => l,
        Err(()) => return Err(EXIT_INPUT),
    };

    let when = match event_datetime(event.date.as_deref(), event.time.as_deref()) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("{}", e);
            return Err(EXIT_INPUT);
        }
    };

    Ok(AnalysisRequest {
        location,
        when,
        kind,
        years: years.or(config.history_years).unwrap_or(DEFAULT_HISTORY_YEARS),
        thresholds: build_thresholds(config, event),
    })
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Forecast {
        event: EventArgs::default(),
        open_map: false,
    });
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match fairweather::config::load_config(config_path.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let effective_scoring = config.scoring.clone().unwrap_or_default();
    if let Err(errors) = fairweather::scoring::validate_scoring(&effective_scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if let Commands::Init = command {
        if let Err(e) = fairweather::config::init::run_init_wizard(config_path) {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let cache = match fairweather::config::cache_config(&config, cli.no_cache) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    let client = match fairweather::weather::create_client() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    match command {
        Commands::Forecast { event, open_map } => {
            let request = match build_request(&config, &event, AnalysisKind::Forecast, None) {
                Ok(r) => r,
                Err(code) => std::process::exit(code),
            };

            let outcome =
                match run_analysis(&client, &cache, &effective_scoring, &request, cli.verbose).await
                {
                    Ok(o) => o,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(exit_code_for(&e));
                    }
                };

            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_reading_line(outcome.kind, &outcome.reading, use_colors)
            );
            println!();
            println!("{}", output::format_score_table(&outcome.result, use_colors));
            println!();
            println!("{}", outcome.report);

            if cli.verbose {
                eprintln!();
                eprintln!("{}", output::format_breakdown(&outcome.result));
                eprintln!("Done in {:?}", start_time.elapsed());
            }

            if open_map {
                if let Err(e) = fairweather::browser::open_map(outcome.location.coords) {
                    eprintln!("Failed to open browser: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            }
        }
        Commands::History { event, years } => {
            let request = match build_request(&config, &event, AnalysisKind::History, years) {
                Ok(r) => r,
                Err(code) => std::process::exit(code),
            };

            let outcome =
                match run_analysis(&client, &cache, &effective_scoring, &request, cli.verbose).await
                {
                    Ok(o) => o,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(exit_code_for(&e));
                    }
                };

            let use_colors = output::should_use_colors();
            println!(
                "{}",
                output::format_reading_line(outcome.kind, &outcome.reading, use_colors)
            );
            println!();
            println!("{}", output::format_score_table(&outcome.result, use_colors));
            println!();
            println!("{}", outcome.report);

            if cli.verbose {
                eprintln!();
                eprintln!("{}", output::format_breakdown(&outcome.result));
                eprintln!("Done in {:?}", start_time.elapsed());
            }
        }
        Commands::Export {
            event,
            history,
            years,
            output: output_path,
        } => {
            let kind = if history {
                AnalysisKind::History
            } else {
                AnalysisKind::Forecast
            };
            let request = match build_request(&config, &event, kind, years) {
                Ok(r) => r,
                Err(code) => std::process::exit(code),
            };

            let outcome =
                match run_analysis(&client, &cache, &effective_scoring, &request, cli.verbose).await
                {
                    Ok(o) => o,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(exit_code_for(&e));
                    }
                };

            let rows = [ExportRow {
                kind: outcome.kind,
                when: outcome.when,
                coords: outcome.location.coords,
                reading: &outcome.reading,
                scores: &outcome.result.scores,
                report: &outcome.report,
            }];
            let csv = output::format_csv(&rows);

            match output_path {
                Some(path) => {
                    if let Err(e) = output::write_export(&path, &csv) {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_NETWORK);
                    }
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", csv),
            }
        }
        Commands::Map { location } => {
            let input = match resolve_location_arg(location, &config) {
                Ok(l) => l,
                Err(()) => std::process::exit(EXIT_INPUT),
            };

            let resolved =
                match fairweather::geocode::resolve(&client, &cache, &input, cli.verbose).await {
                    Ok(r) => r,
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(exit_code_for(&e));
                    }
                };

            if let Err(e) = fairweather::browser::open_map(resolved.coords) {
                eprintln!("Failed to open browser: {}", e);
                std::process::exit(EXIT_NETWORK);
            }

            println!(
                "Opening {} in browser: {}",
                resolved.label,
                fairweather::browser::map_url(resolved.coords)
            );
        }
        Commands::Init => unreachable!("handled before client setup"),
    }

    std::process::exit(EXIT_SUCCESS);
}
