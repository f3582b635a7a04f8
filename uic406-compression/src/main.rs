use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use uic406_compression::compression::{CompressionTrace, NoTrace, compressor_for, execute};
use uic406_compression::config::{CONFIG_FILE, CompressionConfig};
use uic406_compression::loader::load_repository;
use uic406_compression::network::{SegmentHeadways, SolveStrategy};
use uic406_compression::writer::{CsvTrace, write_timetable};

/// Compress a railway timetable following UIC leaflet 406.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Directory holding the infrastructure and timetable CSV files
    #[arg(long, default_value = "Data")]
    data_dir: PathBuf,

    /// Directory the compressed timetable is written to
    #[arg(long, default_value = "Solution")]
    solution_dir: PathBuf,

    /// Configuration file [default: <DATA_DIR>/Config.json]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override `output_level` from the configuration
    #[arg(long)]
    output_level: Option<u32>,

    /// Override `solve_strategy` from the configuration
    #[arg(long, value_enum)]
    strategy: Option<SolveStrategy>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    println!("A railway timetable compression program implementing UIC leaflet code 406");
    println!("uic406-compression {}", env!("CARGO_PKG_VERSION"));
    println!();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> uic406_compression::Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| cli.data_dir.join(CONFIG_FILE));
    let mut config = CompressionConfig::load(&config_path)?;
    if let Some(level) = cli.output_level {
        config.output_level = level;
    }
    if let Some(strategy) = cli.strategy {
        config.solve_strategy = strategy;
    }

    let data = load_repository(&cli.data_dir, config.time_format)?;
    let mut repo = data.repository;
    let headways = SegmentHeadways::new(config.min_headway).with_overrides(data.headway_overrides);
    info!(
        default = headways.default_headway(),
        overrides = headways.len(),
        "minimum headways"
    );

    let compressor = compressor_for(config.method, headways, config.solve_strategy)?;
    let mut csv_trace;
    let mut no_trace = NoTrace;
    let trace: &mut dyn CompressionTrace = if config.writes_debug_files() {
        csv_trace = CsvTrace::new(&cli.solution_dir, config.time_format);
        &mut csv_trace
    } else {
        &mut no_trace
    };

    let report = execute(compressor.as_ref(), &mut repo, trace)?;
    let path = write_timetable(&cli.solution_dir, &repo, config.time_format)?;

    match report.occupancy() {
        Some(occupancy) => info!(
            path = %path.display(),
            original_span = report.original_span,
            compressed_span = report.compressed_span,
            "occupancy {:.1}%",
            occupancy * 100.0
        ),
        None => info!(path = %path.display(), "compressed timetable written"),
    }
    Ok(())
}
