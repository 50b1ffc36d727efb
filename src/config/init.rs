use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::{get_config_path, Config, DEFAULT_NAME_COLUMN};
use crate::positions::PositionGroup;
use crate::scoring::{validate_scoring, weight_warnings, FilterBounds, TierWeights};

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
        Ok(input == "y" || input == "yes" || input == "s" || input == "sim")
    }
}

/// Keep asking until the answer parses as a non-negative number.
fn prompt_number(message: &str, default: f64) -> Result<f64> {
    loop {
        let input = prompt_with_default(message, &default.to_string())?;
        match input.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(v),
            Ok(_) => println!("  Invalid: must be a non-negative number. Try again."),
            Err(_) => println!("  Invalid: '{}' is not a number. Try again.", input),
        }
    }
}

fn prompt_weights(defaults: &TierWeights) -> Result<TierWeights> {
    println!("Each tier average is multiplied by its weight; weights usually add up to 1.");
    loop {
        let weights = TierWeights::new(
            prompt_number("Tier 1 weight", defaults.tier1)?,
            prompt_number("Tier 2 weight", defaults.tier2)?,
            prompt_number("Tier 3 weight", defaults.tier3)?,
        );
        let warnings = weight_warnings(&weights);
        if warnings.is_empty() {
            return Ok(weights);
        }
        for warning in &warnings {
            println!("  Note: {}", warning);
        }
        if prompt_yes_no("Keep these weights anyway?", false)? {
            return Ok(weights);
        }
    }
}

fn prompt_filters(defaults: &FilterBounds) -> Result<FilterBounds> {
    loop {
        let bounds = FilterBounds {
            min_minutes: prompt_number("Minimum minutes played", defaults.min_minutes)?,
            max_minutes: prompt_number("Maximum minutes played", defaults.max_minutes)?,
            max_age: prompt_number("Maximum age", defaults.max_age)?,
        };
        match validate_scoring(&TierWeights::default(), &bounds) {
            Ok(()) => return Ok(bounds),
            Err(errors) => {
                for error in errors {
                    println!("  Invalid: {}", error);
                }
            }
        }
    }
}

fn prompt_group() -> Result<Option<String>> {
    println!("Position groups:");
    for group in PositionGroup::all() {
        println!("  {:<20} {}", group.slug(), group.label());
    }
    loop {
        let input = prompt_with_default("Default position group (or 'none')", "none")?;
        if input.is_empty() || input.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        match input.parse::<PositionGroup>() {
            Ok(group) => return Ok(Some(group.slug().to_string())),
            Err(e) => println!("  Invalid: {}. Try again.", e),
        }
    }
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path. With
/// `accept_defaults` nothing is asked and built-in defaults are written.
pub fn run_init_wizard(default_path: Option<PathBuf>, accept_defaults: bool) -> Result<()> {
    let default_config_path = default_path.unwrap_or_else(get_config_path);

    if accept_defaults {
        if default_config_path.exists() {
            anyhow::bail!(
                "Config already exists at {}; rerun without --yes to overwrite it",
                default_config_path.display()
            );
        }
        write_config(&default_config_path, &Config::default())?;
        println!("Config written to {}", default_config_path.display());
        return Ok(());
    }

    println!();
    println!("scout-rank configuration");
    println!("========================");
    println!();

    let defaults = Config::default();
    let weights = prompt_weights(&defaults.weights)?;
    println!();
    let filters = prompt_filters(&defaults.filters)?;
    println!();
    let default_group = prompt_group()?;
    println!();
    let name_column = prompt_with_default("Column holding the player name", DEFAULT_NAME_COLUMN)?;
    let top = loop {
        let input = prompt_with_default("Rows to show in terminal output (or 'all')", "all")?;
        if input.eq_ignore_ascii_case("all") {
            break None;
        }
        match input.parse::<usize>() {
            Ok(n) if n > 0 => break Some(n),
            _ => println!("  Invalid: must be a positive whole number or 'all'. Try again."),
        }
    };

    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    let config = Config {
        weights,
        filters,
        default_group,
        name_column,
        top,
    };
    write_config(&config_path, &config)?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `scout-rank score <file.csv>` to get started.");

    Ok(())
}

/// Serialize a config to YAML and write it atomically, creating parent directories.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    let yaml = serde_saphyr::to_string(config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .with_context(|| format!("Failed to write config to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save config to {}", path.display()))?;

    Ok(())
}
