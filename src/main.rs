//! Gridview - render evaluated spreadsheets as cross-linked HTML pages

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use gridview_core::HtmlReport;
use gridview_core::storage::{parse_dimensions, parse_workbook};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gridview", version, about)]
struct Cli {
    /// Workbook JSON with each sheet's values and formulae
    workbook: PathBuf,

    /// Tab-separated `sheet<TAB>area` list ordering the navigation strip
    #[arg(short, long, value_name = "FILE")]
    dimensions: Option<PathBuf>,

    /// Directory to write pages into (default: current directory)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Only compile this sheet (can be repeated)
    #[arg(short, long = "sheet", value_name = "NAME")]
    sheets: Vec<String>,

    /// Report title (overrides the workbook and config title)
    #[arg(short, long)]
    title: Option<String>,

    /// Config file (default: <config dir>/gridview/config.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;

    let workbook = parse_workbook(&cli.workbook)
        .with_context(|| format!("Failed to load workbook {}", cli.workbook.display()))?;
    log::info!(
        "Loaded {} sheet(s) from {}",
        workbook.sheets().len(),
        cli.workbook.display()
    );

    let mut report = HtmlReport::new(&workbook, config.report);
    if let Some(path) = &cli.dimensions {
        let dimensions = parse_dimensions(path)
            .with_context(|| format!("Failed to load dimensions {}", path.display()))?;
        report = report.with_dimensions(dimensions);
    }
    if let Some(title) = cli.title {
        report = report.with_title(title);
    }

    let output_dir = cli
        .output
        .or(config.output)
        .unwrap_or_else(|| PathBuf::from("."));

    let written = report.write_reports(&output_dir, &cli.sheets)?;
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
