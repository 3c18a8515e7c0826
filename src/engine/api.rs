// 高レベル公開API
// PhotoPipelineを簡単に使用できるようにするための便利な関数

use super::PhotoPipeline;
use crate::{
    core::{PipelineReporter, PipelineResult, PipelineSummary},
    services::{ConsoleReporter, NoOpReporter, PipelineConfig},
};

/// コンソール出力付きのパイプラインを作成
pub fn create_console_pipeline(
    config: PipelineConfig,
) -> PipelineResult<PhotoPipeline<ConsoleReporter>> {
    PhotoPipeline::new(config, ConsoleReporter::new())
}

/// 出力なしのパイプラインを作成（バックグラウンド・テスト用）
pub fn create_quiet_pipeline(config: PipelineConfig) -> PipelineResult<PhotoPipeline<NoOpReporter>> {
    PhotoPipeline::new(config, NoOpReporter::new())
}

/// 設定とレポーターを受け取り、パイプラインを作成して最後まで実行
pub async fn run_simulation<R>(config: PipelineConfig, reporter: R) -> PipelineResult<PipelineSummary>
where
    R: PipelineReporter + 'static,
{
    PhotoPipeline::new(config, reporter)?.run().await
}
