use clap::Parser;
use prompt_recall::cli::Cli;
use prompt_recall::commands;
use prompt_recall::core::storage::AppCtx;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("• {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = AppCtx::init(cli.home).map_err(|e| e.to_string())?;
    commands::dispatch(cli.command, &ctx).await
}

/// Warnings only by default; `--verbose` shows store operations. `RUST_LOG` wins over both.
fn init_logging(verbose: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "warn,prompt_recall=debug"
    } else {
        "warn"
    }
}
