use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use holiday_docgen::anomalies::count_by_category;
use holiday_docgen::generator::DEFAULT_INPUT_ROOT;
use holiday_docgen::workbook::DEFAULT_OUTPUT;
use holiday_docgen::{generate, logging, GeneratorConfig, RunOutcome, EXIT_SUCCESS};

#[derive(Parser, Debug)]
#[command(
    name = "holiday-docgen",
    version,
    about = "Document holiday credit configuration exports and flag anomalies",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Workbook to write (.db/.sqlite/.sqlite3 for SQLite, anything else is a CSV directory)
    #[arg(default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Directory holding one folder per exported config type
    #[arg(short, long, default_value = DEFAULT_INPUT_ROOT)]
    input: PathBuf,

    /// JSON file with check definitions, replacing the built-in battery
    #[arg(long)]
    checks: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Browse a SQLite workbook written by an earlier run
    View {
        /// Workbook to open
        workbook: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match &cli.command {
        Some(Command::View { workbook }) => run_view(workbook),
        None => run_generate(&cli),
    }
}

fn run_generate(cli: &Cli) -> ExitCode {
    if let Err(err) = logging::init("info") {
        eprintln!("Warning: logging unavailable: {}", err);
    }

    let config = GeneratorConfig::new(&cli.input, &cli.output);
    let result = match &cli.checks {
        Some(path) => config.with_checks_file(path),
        None => Ok(config),
    }
    .and_then(|config| generate(&config));

    match result {
        Ok(outcome) => {
            print_summary(&outcome);
            ExitCode::from(EXIT_SUCCESS as u8)
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn print_summary(outcome: &RunOutcome) {
    let analysis = &outcome.analysis;

    println!("📚 Holiday Credit Solution Documentation");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "✓ Documented {} objects across {} types",
        analysis.catalog.len(),
        analysis.catalog.loaded_types().count()
    );
    println!(
        "✓ Wrote {} sheets to {} ({})",
        analysis.report.len(),
        outcome.output.display(),
        outcome.format
    );

    if analysis.anomalies.is_empty() {
        println!("✓ No anomalies found");
        return;
    }

    println!("\n🚩 {} anomalies:", analysis.anomalies.len());
    for (category, count) in count_by_category(&analysis.anomalies) {
        if count > 0 {
            println!("   {}: {}", category, count);
        }
    }
    println!();
    for anomaly in &analysis.anomalies {
        println!("   {}", anomaly.summary());
    }
}

#[cfg(feature = "tui")]
fn run_view(workbook: &std::path::Path) -> ExitCode {
    use anyhow::Context;
    use holiday_docgen::{read_sqlite, ui, EXIT_INPUT_FAILURE};

    let result = read_sqlite(workbook)
        .with_context(|| format!("Failed to open workbook {}", workbook.display()))
        .and_then(|report| {
            let mut app = ui::App::new(report, &workbook.display().to_string());
            ui::run_ui(&mut app)
        });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(EXIT_INPUT_FAILURE as u8)
        }
    }
}

#[cfg(not(feature = "tui"))]
fn run_view(_workbook: &std::path::Path) -> ExitCode {
    eprintln!("❌ Viewer not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    ExitCode::from(holiday_docgen::EXIT_INPUT_FAILURE as u8)
}
