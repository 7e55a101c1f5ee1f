use clap::Parser;
use std::path::PathBuf;

use spectra_table::settings::Settings;
use spectra_table::{app, logger};

/// Spectra Table - numeric table with clipboard copy/paste
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Decimal places shown in cells (full precision when omitted)
    #[arg(long)]
    precision: Option<usize>,

    /// Also put an HTML table on the clipboard when copying
    #[arg(long)]
    html: bool,
}

fn load_settings(args: &Args) -> Result<Settings, String> {
    let mut settings = match args.config {
        Some(ref path) => Settings::load(path).map_err(|e| e.to_string())?,
        None => Settings::default(),
    };

    // Command line wins over the settings file
    if let Some(rows) = args.rows {
        settings.rows = rows;
    }
    if let Some(columns) = args.columns {
        settings.columns = columns;
    }
    if args.precision.is_some() {
        settings.precision = args.precision;
    }
    if args.html {
        settings.copy_html = true;
    }
    Ok(settings)
}

fn main() {
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error loading settings: {}", e);
            std::process::exit(1);
        }
    };

    logger::init(settings.log_path.clone());
    logger::log("[DEBUG main] ===== Program started =====");
    logger::log(&format!(
        "[DEBUG main] rows={}, columns={}, precision={:?}, copy_html={}",
        settings.rows, settings.columns, settings.precision, settings.copy_html
    ));

    if let Err(e) = app::run_table_gui(settings) {
        eprintln!("Error running GUI: {}", e);
        std::process::exit(1);
    }
}
