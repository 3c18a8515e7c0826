// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとパイプラインの橋渡し

pub mod args;

// 公開API
pub use args::*;

use crate::{
    core::{PipelineReporter, PipelineSummary},
    engine::PhotoPipeline,
    services::{ConsoleReporter, JsonLinesReporter},
};
use anyhow::Context;
use clap::Parser;

/// コマンドライン引数を解析
///
/// 解析エラー時はclapがメッセージを出力してプロセスを終了する
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// 出力形式に応じたレポーターを作成
pub fn create_reporter(format: OutputFormat, quiet: bool) -> Box<dyn PipelineReporter> {
    match (format, quiet) {
        (OutputFormat::Text, false) => Box::new(ConsoleReporter::new()),
        (OutputFormat::Text, true) => Box::new(ConsoleReporter::quiet()),
        (OutputFormat::Json, false) => Box::new(JsonLinesReporter::new()),
        (OutputFormat::Json, true) => Box::new(JsonLinesReporter::quiet()),
    }
}

/// 解析済みの引数でパイプラインを実行
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<PipelineSummary> {
    let config = cli.to_config();
    tracing::debug!(?config, "effective configuration");

    let pipeline = PhotoPipeline::new(config, create_reporter(cli.format, cli.quiet))
        .context("invalid pipeline configuration")?;

    let summary = pipeline.run().await.context("pipeline execution failed")?;
    Ok(summary)
}
