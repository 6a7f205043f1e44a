use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{ensure_config_dir, get_config_path, Config};
use crate::scoring::ComfortThresholds;

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Prompt for an optional positive number. Empty input means "no preference";
/// anything else loops until it parses as a positive finite number.
fn prompt_optional_threshold(message: &str) -> Result<Option<f64>> {
    loop {
        let input = prompt(&format!("{} (blank for none): ", message))?;
        if input.is_empty() {
            return Ok(None);
        }
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => return Ok(Some(v)),
            _ => println!("Please enter a positive number, or leave blank."),
        }
    }
}

/// Print text with a typewriter effect, one character at a time.
fn typewriter(text: &str) {
    use std::thread;
    use std::time::Duration;
    for c in text.chars() {
        print!("{}", c);
        std::io::stdout().flush().ok();
        thread::sleep(Duration::from_millis(18));
    }
    println!();
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, uses the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    let config_path = default_path.unwrap_or_else(get_config_path);

    println!();
    typewriter("Fairweather Setup");
    println!("=================");
    println!();

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!("{} already exists. Overwrite?", config_path.display()),
            false,
        )?;
        if !overwrite {
            println!("Keeping the existing config.");
            return Ok(());
        }
    }

    // 1. Default location
    typewriter("The default location is used whenever a command is run without one.");
    let location = prompt("Default location, place name or \"lat, lon\" (blank for none): ")?;
    let location = (!location.is_empty()).then_some(location);

    // 2. Comfort thresholds
    println!();
    typewriter(
        "Comfort thresholds feed the discomfort score: readings past a threshold raise it.",
    );
    let thresholds = if prompt_yes_no("Set comfort thresholds?", false)? {
        let thresholds = ComfortThresholds {
            temperature: prompt_optional_threshold("Max comfortable temperature, °C")?,
            humidity: prompt_optional_threshold("Max comfortable humidity, %")?,
            wind_speed: prompt_optional_threshold("Max comfortable wind speed, km/h")?,
        };
        (!thresholds.is_empty()).then_some(thresholds)
    } else {
        None
    };

    // 3. History span
    println!();
    let history_years: u32 = loop {
        let input = prompt_with_default("Years to average for history analyses", "5")?;
        match input.parse::<u32>() {
            Ok(v) if v >= 1 => break v,
            _ => println!("Please enter a whole number of years, at least 1."),
        }
    };

    let config = Config {
        location,
        thresholds,
        scoring: None,
        history_years: Some(history_years),
        cache: None,
    };

    let yaml = serde_saphyr::to_string(&config).context("Failed to serialize config")?;

    if config_path == get_config_path() {
        ensure_config_dir()?;
    } else if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&config_path, yaml)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!();
    println!("Wrote {}", config_path.display());
    Ok(())
}
