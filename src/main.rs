use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use scorecard::session::Session;

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Tsv,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rate indicators interactively (default if no subcommand)
    Tui,
    /// Print dimension scores, total and grade
    Score {
        /// Scores file to rate from (an earlier export)
        #[arg(short, long)]
        ratings: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Write a scores snapshot
    Export {
        /// Scores file to rate from (an earlier export)
        #[arg(short, long)]
        ratings: Option<PathBuf>,

        /// Output file (defaults to ./scores-<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a starter config and an editable copy of the built-in model
    Init,
    /// Show the active model with its weights
    Model,
}

#[derive(Parser, Debug)]
#[command(name = "scorecard")]
#[command(about = "Weighted KPI scorecard with letter grades", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/scorecard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model file to use instead of the configured one
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    if let Err(e) = scorecard::telemetry::init(cli.verbose) {
        eprintln!("Logging disabled: {}", e);
    }

    if let Commands::Init = command {
        if let Err(e) = scorecard::config::init::run_init(cli.config) {
            eprintln!("Init failed: {:#}", e);
            std::process::exit(EXIT_IO);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match scorecard::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Band errors are reported by load_config; ordering only warns
    if config.bands.is_empty() {
        tracing::warn!("no grade bands configured, grades will read N/A");
    } else if !scorecard::scoring::is_sorted_descending(&config.bands) {
        tracing::warn!("grade bands are not sorted by descending threshold; first match wins");
    }

    let model = match scorecard::config::resolve_model(&config, cli.model.as_deref()) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Model error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(
        indicators = model.indicator_count(),
        total_weight = model.total_weight(),
        "model ready"
    );

    let session = Session::new(model, config.bands.clone());
    let use_colors = scorecard::output::should_use_colors();

    match command {
        Commands::Tui => {
            let export_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let colors = scorecard::tui::resolve_theme(config.theme);
            let app = scorecard::tui::App::new(session, export_dir, colors);
            if let Err(e) = scorecard::tui::run_tui(app) {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_IO);
            }
        }
        Commands::Score { ratings, format } => {
            let session = with_ratings_file(session, ratings);
            let output = match format {
                OutputFormat::Table => {
                    let mut output = scorecard::output::format_score_table(&session, use_colors);
                    if cli.verbose {
                        output.push_str("\n\n");
                        output.push_str(&scorecard::output::format_breakdown(
                            &session.result(),
                            use_colors,
                        ));
                    }
                    output
                }
                OutputFormat::Tsv => scorecard::output::format_tsv(&session),
                OutputFormat::Json => {
                    let snapshot = scorecard::export::snapshot(&session);
                    match scorecard::output::format_json(&snapshot) {
                        Ok(json) => json,
                        Err(e) => {
                            eprintln!("Failed to render scores: {:#}", e);
                            std::process::exit(EXIT_IO);
                        }
                    }
                }
            };
            println!("{}", output);
        }
        Commands::Export { ratings, output } => {
            let session = with_ratings_file(session, ratings);
            let path = output.unwrap_or_else(|| {
                let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                scorecard::export::default_export_path(&dir)
            });
            let snapshot = scorecard::export::snapshot(&session);
            if let Err(e) = scorecard::export::save_snapshot(&path, &snapshot) {
                eprintln!("Export failed: {:#}", e);
                std::process::exit(EXIT_IO);
            }
            println!(
                "Exported {} scores to {} ({:.1}%, grade {})",
                snapshot.scores.len(),
                path.display(),
                snapshot.total_pct,
                snapshot.final_grade
            );
        }
        Commands::Model => {
            println!(
                "{}",
                scorecard::output::format_model(session.model(), use_colors)
            );
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Apply an earlier export's scores, exiting on a file error.
fn with_ratings_file(session: Session, ratings: Option<PathBuf>) -> Session {
    let Some(path) = ratings else {
        return session;
    };
    match scorecard::export::load_snapshot(&path) {
        Ok(snapshot) => session.with_imported_scores(&snapshot.scores),
        Err(e) => {
            eprintln!("Scores error: {:#}", e);
            std::process::exit(EXIT_IO);
        }
    }
}
