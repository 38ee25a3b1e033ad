mod cli;
use cli::{CliMode, parse_cli_mode, usage};

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let options = match parse_cli_mode() {
        Ok(CliMode::Run(options)) => options,
        Ok(CliMode::Help) => {
            println!("{}", usage());
            return Ok(());
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", usage());
            return Ok(());
        }
    };

    if let Err(e) = cli::run(options).await {
        tracing::error!("calpick failed: {:#}", e);
        return Err(e);
    }

    Ok(())
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join("calpick"))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "calpick.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("calpick started");
}
