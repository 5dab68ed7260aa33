use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use link_harvester::config;
use link_harvester::runner;

/// Scans the shop/flow/action store for link-service URLs and writes a
/// CSV report.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Page size for shops, flows and actions (overrides BATCH_SIZE)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Concurrent shop workers per page (overrides WORKER_COUNT)
    #[arg(long)]
    workers: Option<usize>,

    /// Output CSV path (overrides OUTPUT_PATH)
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = config::load_from_env()?;

    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(workers) = args.workers {
        config.worker_count = workers;
    }
    if let Some(out) = args.out {
        config.output_path = out;
    }
    config.validate()?;

    init_tracing(&config.log_level, &config.log_format);
    config.print_summary();

    runner::run(config).await
}

fn init_tracing(level: &str, format: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
