//! Data Entropy CLI
//!
//! Runs the synthetic self-test or estimates the resolution of values
//! given on the command line.

use clap::{Args, Parser, Subcommand};
use data_entropy::{
    metrics::MetricsRegistry, parse_samples, selftest, FileConfig, SelfTest,
};
use std::error::Error;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "Estimate the information-theoretic resolution of sampled data")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate entropy of synthetic clean and noisy datasets (default)
    Selftest(SelftestArgs),
    /// Estimate entropy of the given values
    Analyze {
        /// Nominal bits per sample
        #[arg(long, short = 'b', default_value_t = 8)]
        bit_depth: u32,

        /// Print Prometheus metrics after the result
        #[arg(long)]
        metrics: bool,

        /// Sample values
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<String>,
    },
}

#[derive(Args, Default)]
struct SelftestArgs {
    /// Samples per scenario
    #[arg(long, short = 'n')]
    samples: Option<usize>,

    /// Generator seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Standard deviation of the added noise
    #[arg(long)]
    noise: Option<f64>,

    /// Also run a coarse scenario with this many low bits dropped
    #[arg(long)]
    quantize: Option<u32>,

    /// Print per-scenario diagnoses
    #[arg(long)]
    diagnose: bool,

    /// Print Prometheus metrics after the report
    #[arg(long)]
    metrics: bool,
}

fn main() {
    // Initialize logging (stderr, so the report stays on stdout)
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    info!("Data Entropy v{}", data_entropy::VERSION);

    let config = match &cli.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let result = match cli.command {
        Some(Commands::Analyze {
            bit_depth,
            metrics,
            values,
        }) => run_analyze(&config, bit_depth, metrics, &values),
        Some(Commands::Selftest(args)) => run_selftest(config, &args),
        None => run_selftest(config, &SelftestArgs::default()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Builds the log filter: `info` unless `directives` (from `RUST_LOG`) says otherwise.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

fn run_selftest(config: FileConfig, args: &SelftestArgs) -> Result<(), Box<dyn Error>> {
    let mut selftest_config = config.selftest;
    if let Some(samples) = args.samples {
        selftest_config.samples = samples;
    }
    if let Some(seed) = args.seed {
        selftest_config.seed = Some(seed);
    }
    if let Some(noise) = args.noise {
        selftest_config.noise_std_dev = noise;
    }
    if let Some(drop_bits) = args.quantize {
        selftest_config.quantize_drop_bits = Some(drop_bits);
    }

    let report = SelfTest::new(selftest_config, config.thresholds)?.run()?;
    println!("{}", report);

    if args.diagnose {
        println!("{}", report.render_diagnoses());
    }

    let anomalies = report.anomalies().count();
    info!(
        scenarios = report.results().len(),
        anomalies, "Self-test complete"
    );

    if args.metrics {
        let registry = MetricsRegistry::new()?;
        registry.record_report(&report);
        print!("{}", registry.encode()?);
    }

    Ok(())
}

fn run_analyze(
    config: &FileConfig,
    bit_depth: u32,
    metrics: bool,
    values: &[String],
) -> Result<(), Box<dyn Error>> {
    let samples = parse_samples(values)?;
    let (estimate, diagnosis) = selftest::analyze(&samples, bit_depth, &config.thresholds)?;

    println!("{:.<20} {}", "N samples", estimate.total_count());
    println!("{:.<20} {}", "Distinct values", estimate.distinct_count());
    println!("{:.<20} {}", "Entropy", estimate);
    println!("{}", diagnosis);

    if metrics {
        let registry = MetricsRegistry::new()?;
        registry.record("input", &estimate, Some(&diagnosis));
        print!("{}", registry.encode()?);
    }

    Ok(())
}
