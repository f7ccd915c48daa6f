use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use caseboard::store::{DirStore, Store};
use caseboard::usecase::UseCase;

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List use cases with their scores and quadrants
    List,
    /// Export the collection as JSON or CSV
    Export {
        #[arg(value_enum)]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import use cases from a JSON file, replacing existing data
    Import {
        file: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Generate an HTML report (full summary, or one use case with --case)
    Report {
        /// Index of a single use case to report on (1-based, as shown in list)
        #[arg(long = "case")]
        case: Option<usize>,

        /// Write to a specific file instead of the default name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the report in the browser afterwards
        #[arg(long)]
        open: bool,
    },
    /// Delete a use case by its index number (1-based, as shown in list)
    Delete { index: usize },
    /// Delete all use cases
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
    /// Write a starter config file
    Init {
        /// Overwrite an existing config without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "caseboard")]
#[command(about = "Assess and prioritize AI use cases", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/caseboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match caseboard::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate dimension config at startup
    if let Err(errors) = caseboard::scoring::validate_dimensions(&config.dimensions) {
        eprintln!("Dimension config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    if let Err(e) = config.autosave_duration() {
        eprintln!("Config error: {}", e);
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!(
            "Scale {}-{}, threshold {}, {} value + {} feasibility dimensions",
            config.dimensions.scale.min,
            config.dimensions.scale.max,
            config.dimensions.threshold(),
            config.dimensions.value.len(),
            config.dimensions.feasibility.len()
        );
    }

    let data_dir = config
        .data_dir
        .clone()
        .unwrap_or_else(DirStore::default_dir);
    if cli.verbose {
        eprintln!("Data directory: {}", data_dir.display());
    }
    let store = DirStore::new(data_dir);

    match cli.command {
        None => {
            // Interactive mode: entry form, dashboard, matrix
            let use_cases = load_collection_or_warn(&store, cli.verbose);
            let state = caseboard::state::AppState::new(use_cases);
            let app = caseboard::tui::App::new(state, config, store, cli.verbose);
            if let Err(e) = caseboard::tui::run_tui(app).await {
                eprintln!("Terminal error: {}", e);
                std::process::exit(EXIT_DATA);
            }
        }

        Some(Commands::List) => {
            let use_cases = load_collection_or_warn(&store, cli.verbose);
            let use_colors = caseboard::output::should_use_colors();

            if cli.verbose && !use_cases.is_empty() {
                for uc in &use_cases {
                    println!("{}", caseboard::output::format_detail(uc, use_colors));
                    println!();
                }
            } else {
                println!(
                    "{}",
                    caseboard::output::format_table(&use_cases, use_colors)
                );
            }
        }

        Some(Commands::Export { format, output }) => {
            let use_cases = load_collection_or_warn(&store, cli.verbose);
            let content = match format {
                ExportFormat::Json => match caseboard::export::generate_json(&use_cases) {
                    Ok(json) => json,
                    Err(e) => {
                        eprintln!("Export failed: {}", e);
                        std::process::exit(EXIT_DATA);
                    }
                },
                ExportFormat::Csv => caseboard::export::generate_csv(&use_cases),
            };

            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, content) {
                        eprintln!("Failed to write {}: {}", path.display(), e);
                        std::process::exit(EXIT_DATA);
                    }
                    println!(
                        "Exported {} use case(s) to {}",
                        use_cases.len(),
                        path.display()
                    );
                }
                None => print!("{}", content),
            }
        }

        Some(Commands::Import { file, force }) => {
            let data = match std::fs::read_to_string(&file) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", file.display(), e);
                    std::process::exit(EXIT_DATA);
                }
            };

            // Parse and migrate before touching existing data: a failed
            // import must leave the current collection intact.
            let outcome = match caseboard::migration::import_collection(
                &data,
                &config.dimensions,
                chrono::Utc::now(),
            ) {
                Ok(o) => o,
                Err(e) => {
                    eprintln!("Import failed: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            if outcome.skipped > 0 {
                eprintln!("Skipped {} invalid record(s)", outcome.skipped);
            }

            let existing = load_collection_or_warn(&store, cli.verbose);
            if !existing.is_empty() && !force {
                let proceed = confirm(&format!(
                    "Replace {} existing use case(s) with {} imported?",
                    existing.len(),
                    outcome.use_cases.len()
                ));
                if !proceed {
                    println!("Import cancelled.");
                    std::process::exit(EXIT_SUCCESS);
                }
            }

            if let Err(e) = caseboard::store::save_collection(&store, &outcome.use_cases) {
                eprintln!("Failed to save imported data: {}", e);
                std::process::exit(EXIT_DATA);
            }
            println!("Imported {} use case(s)", outcome.use_cases.len());
        }

        Some(Commands::Report { case, output, open }) => {
            let use_cases = load_collection_or_warn(&store, cli.verbose);
            let now = chrono::Utc::now();

            let (content, default_name) = match case {
                Some(index) => {
                    if index < 1 || index > use_cases.len() {
                        eprintln!(
                            "Invalid index {}. Must be between 1 and {}.",
                            index,
                            use_cases.len()
                        );
                        std::process::exit(EXIT_DATA);
                    }
                    let uc = &use_cases[index - 1];
                    (
                        caseboard::export::use_case_report(uc, now),
                        caseboard::export::report::use_case_filename(&uc.title),
                    )
                }
                None => {
                    if use_cases.is_empty() {
                        println!("No use cases to report on.");
                        std::process::exit(EXIT_SUCCESS);
                    }
                    (
                        caseboard::export::summary_report(&use_cases, now),
                        caseboard::export::report::summary_report_filename(now),
                    )
                }
            };

            let path = output.unwrap_or_else(|| PathBuf::from(default_name));
            if let Err(e) = std::fs::write(&path, content) {
                eprintln!("Failed to write {}: {}", path.display(), e);
                std::process::exit(EXIT_DATA);
            }
            println!("Report written to {}", path.display());

            if open {
                if let Err(e) = caseboard::browser::open_report(&path) {
                    eprintln!("{}", e);
                }
            }
        }

        Some(Commands::Delete { index }) => {
            let mut use_cases = load_collection_or_warn(&store, cli.verbose);
            if index < 1 || index > use_cases.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    use_cases.len()
                );
                std::process::exit(EXIT_DATA);
            }

            let removed = use_cases.remove(index - 1);
            if let Err(e) = caseboard::store::save_collection(&store, &use_cases) {
                eprintln!("Failed to save data: {}", e);
                std::process::exit(EXIT_DATA);
            }
            println!("Deleted: {}", removed.title);
        }

        Some(Commands::Clear { force }) => {
            if !force && !confirm("Delete ALL use cases? This cannot be undone.") {
                println!("Clear cancelled.");
                std::process::exit(EXIT_SUCCESS);
            }

            let result = store
                .remove(caseboard::store::COLLECTION_KEY)
                .and_then(|_| store.remove(caseboard::store::DRAFT_KEY));
            if let Err(e) = result {
                eprintln!("Failed to clear data: {}", e);
                std::process::exit(EXIT_DATA);
            }
            println!("All data cleared.");
        }

        Some(Commands::Init { force }) => {
            match caseboard::config::write_starter_config(None, force) {
                Ok(Some(path)) => println!("Config written to {}", path.display()),
                Ok(None) => println!("Init cancelled."),
                Err(e) => {
                    eprintln!("Init failed: {}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load the collection, falling back to empty on a corrupt blob. The prior
/// file stays on disk until the next successful save.
fn load_collection_or_warn(store: &DirStore, verbose: bool) -> Vec<UseCase> {
    match caseboard::store::load_collection(store) {
        Ok(use_cases) => {
            if verbose {
                eprintln!("Loaded {} use case(s)", use_cases.len());
            }
            use_cases
        }
        Err(e) => {
            eprintln!("Warning: {}. Starting with an empty collection.", e);
            Vec::new()
        }
    }
}

fn confirm(message: &str) -> bool {
    print!("{} [y/N]: ", message);
    if std::io::stdout().flush().is_err() {
        return false;
    }
    let mut input = String::new();
    if std::io::stdin().lock().read_line(&mut input).is_err() {
        return false;
    }
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}
