//! photo_pipeline CLI entry point.
//!
//! Initializes logging and delegates to the CLI module for the simulation run.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    // 引数解析を先に行い、ログレベルを決定する
    let cli = photo_pipeline::cli::parse_cli();

    // 優先順位: RUST_LOG > --log-level > "warn"
    // イベント出力をstdoutに残すため、診断ログはstderrへ
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)))
        .init();

    if let Err(error) = photo_pipeline::cli::run_with_cli(cli).await {
        tracing::error!(error = %error, "simulation aborted");
        eprintln!("❌ エラー: {error:#}");
        std::process::exit(1);
    }
}
