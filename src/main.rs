use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use scout_rank::config::Config;
use scout_rank::output::SortKey;
use scout_rank::positions::PositionGroup;
use scout_rank::scoring::{FilterBounds, ScoreOutcome, ScoringRequest, TierWeights};
use scout_rank::table::{delimiter_for, PlayerTable};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 2;
const EXIT_MISSING_COLUMNS: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Ranked table for the terminal
    Table,
    /// Tab-separated values with every column
    Tsv,
    /// JSON array, one object per player
    Json,
    /// CSV with every column
    Csv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score players of one position group from a CSV/TSV export
    Score {
        /// Spreadsheet export with Position, Age and Minutes played columns
        file: PathBuf,

        /// Position group label or slug (see `groups`)
        #[arg(short, long)]
        group: Option<String>,

        /// Minimum minutes played (inclusive)
        #[arg(long)]
        min_minutes: Option<f64>,

        /// Maximum minutes played (inclusive)
        #[arg(long)]
        max_minutes: Option<f64>,

        /// Maximum age (inclusive)
        #[arg(long)]
        max_age: Option<f64>,

        /// Tier weights as "W1,W2,W3"
        #[arg(short, long)]
        weights: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Ranking order
        #[arg(short, long, value_enum, default_value_t = SortKey::Final)]
        sort: SortKey,

        /// Show only the first N players
        #[arg(short, long)]
        top: Option<usize>,

        /// Also write every scored column to this CSV file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Field delimiter (defaults to tab for .tsv, comma otherwise)
        #[arg(short, long)]
        delimiter: Option<char>,
    },
    /// List position groups, or show the tiers of one group
    Groups {
        /// Group label or slug
        group: Option<String>,
    },
    /// Create a config file interactively
    Init {
        /// Write the defaults without asking
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "scout-rank")]
#[command(about = "Rank soccer players by tiered performance scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scout-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn main() {
    let cli = Cli::parse();
    scout_rank::logging::init(cli.verbose);
    let config_path = cli.config.map(PathBuf::from);

    let code = match cli.command {
        Commands::Init { yes } => match scout_rank::config::init::run_init_wizard(config_path, yes) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                EXIT_CONFIG
            }
        },
        Commands::Groups { group } => run_groups(group.as_deref()),
        Commands::Score {
            file,
            group,
            min_minutes,
            max_minutes,
            max_age,
            weights,
            format,
            sort,
            top,
            out,
            delimiter,
        } => {
            let config = match load_validated_config(config_path) {
                Ok(c) => c,
                Err(code) => std::process::exit(code),
            };
            let args = ScoreArgs {
                file,
                group,
                min_minutes,
                max_minutes,
                max_age,
                weights,
                format,
                sort,
                top,
                out,
                delimiter,
            };
            run_score(&config, args)
        }
    };

    std::process::exit(code);
}

fn load_validated_config(path: Option<PathBuf>) -> Result<Config, i32> {
    let config = match scout_rank::config::load_config(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    if let Err(errors) = scout_rank::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }

    Ok(config)
}

fn run_groups(group: Option<&str>) -> i32 {
    let use_colors = scout_rank::output::should_use_colors();
    match group {
        None => {
            println!("{}", scout_rank::output::format_group_list(use_colors));
            EXIT_SUCCESS
        }
        Some(label) => match label.parse::<PositionGroup>() {
            Ok(group) => {
                println!("{}", scout_rank::output::format_group_detail(group, use_colors));
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                EXIT_CONFIG
            }
        },
    }
}

struct ScoreArgs {
    file: PathBuf,
    group: Option<String>,
    min_minutes: Option<f64>,
    max_minutes: Option<f64>,
    max_age: Option<f64>,
    weights: Option<String>,
    format: OutputFormat,
    sort: SortKey,
    top: Option<usize>,
    out: Option<PathBuf>,
    delimiter: Option<char>,
}

/// Group, weights and bounds for one run: flags override the config file,
/// which overrides built-in defaults. Errors are printed and mapped to an
/// exit code.
fn resolve_parameters(
    config: &Config,
    args: &ScoreArgs,
) -> Result<(PositionGroup, TierWeights, FilterBounds), i32> {
    let group_str = match args.group.as_deref().or(config.default_group.as_deref()) {
        Some(g) => g,
        None => {
            eprintln!("No position group given. Pass --group or set default_group in the config.");
            eprintln!("Available groups:");
            eprintln!("{}", scout_rank::output::format_group_list(false));
            return Err(EXIT_CONFIG);
        }
    };
    let group = group_str.parse::<PositionGroup>().map_err(|e| {
        eprintln!("{}", e);
        EXIT_CONFIG
    })?;

    let weights = match args.weights.as_deref() {
        Some(w) => TierWeights::parse(w).map_err(|e| {
            eprintln!("Invalid --weights: {}", e);
            EXIT_CONFIG
        })?,
        None => config.weights,
    };
    let bounds = FilterBounds {
        min_minutes: args.min_minutes.unwrap_or(config.filters.min_minutes),
        max_minutes: args.max_minutes.unwrap_or(config.filters.max_minutes),
        max_age: args.max_age.unwrap_or(config.filters.max_age),
    };

    if let Err(errors) = scout_rank::scoring::validate_scoring(&weights, &bounds) {
        eprintln!("Scoring parameter errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(EXIT_CONFIG);
    }
    for warning in scout_rank::scoring::weight_warnings(&weights) {
        warn!("{}", warning);
    }

    Ok((group, weights, bounds))
}

fn run_score(config: &Config, args: ScoreArgs) -> i32 {
    let start_time = Instant::now();

    let (group, weights, bounds) = match resolve_parameters(config, &args) {
        Ok(params) => params,
        Err(code) => return code,
    };

    let delimiter = match args.delimiter {
        Some(c) if c.is_ascii() => c as u8,
        Some(c) => {
            eprintln!("Delimiter must be a single ASCII character, got '{}'", c);
            return EXIT_CONFIG;
        }
        None => delimiter_for(&args.file),
    };
    let table = match PlayerTable::from_path(&args.file, delimiter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to load {}: {}", args.file.display(), e);
            return EXIT_INPUT;
        }
    };

    let request = ScoringRequest::for_group(group, weights, bounds);
    let scored = match scout_rank::scoring::score_players(&table, &request) {
        ScoreOutcome::Scored(scored) => scored,
        ScoreOutcome::NoPlayersMatched => {
            eprintln!(
                "No players found for {} with {}-{} minutes and age <= {}.",
                group, bounds.min_minutes, bounds.max_minutes, bounds.max_age
            );
            return EXIT_SUCCESS;
        }
        ScoreOutcome::MissingColumns(missing) => {
            eprintln!("The following metrics are missing from {}:", args.file.display());
            for column in missing {
                eprintln!("  - {}", column);
            }
            return EXIT_MISSING_COLUMNS;
        }
    };
    info!(
        "scored {} of {} players as {} in {:?}",
        scored.len(),
        table.len(),
        group,
        start_time.elapsed()
    );

    if let Some(ref path) = args.out {
        let all = scout_rank::output::rank_records(&scored, args.sort, None);
        if let Err(e) = scout_rank::output::write_csv(&scored, &all, path) {
            eprintln!("Failed to write {}: {:#}", path.display(), e);
            return EXIT_INPUT;
        }
        info!("wrote {} scored players to {}", all.len(), path.display());
    }

    let top = args.top.or(config.top);
    let ranked = scout_rank::output::rank_records(&scored, args.sort, top);
    match args.format {
        OutputFormat::Table => {
            let use_colors = scout_rank::output::should_use_colors();
            println!(
                "{}",
                scout_rank::output::format_scored_table(&scored, &ranked, &config.name_column, use_colors)
            );
        }
        OutputFormat::Tsv => println!("{}", scout_rank::output::format_tsv(&scored, &ranked)),
        OutputFormat::Json => match scout_rank::output::format_json(&scored, &ranked, &config.name_column) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{:#}", e);
                return EXIT_INPUT;
            }
        },
        OutputFormat::Csv => {
            if let Err(e) = scout_rank::output::write_csv_to(&scored, &ranked, io::stdout().lock()) {
                eprintln!("{:#}", e);
                return EXIT_INPUT;
            }
        }
    }

    EXIT_SUCCESS
}
