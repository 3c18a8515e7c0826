// Consumer - 取り出しと保存機能

use crate::{
    core::{PipelineItem, PipelineReporter},
    services::{save_photo, BoundedChannel, LatencyModel},
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Consumer終了時の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerOutcome {
    pub persisted: usize,
    /// パイプライン開始からConsumer終了までの経過時間
    pub elapsed: Duration,
}

/// 単一Consumer
///
/// チャンネルが「空かつ入力終了」になるまでアイテムを取り出して保存する。
/// 終了時に開始時刻からの経過時間を最終報告する。
pub fn spawn_consumer<R>(
    channel: Arc<BoundedChannel<PipelineItem>>,
    latency: LatencyModel,
    reporter: Arc<R>,
    started_at: Instant,
) -> tokio::task::JoinHandle<ConsumerOutcome>
where
    R: PipelineReporter + 'static,
{
    tokio::spawn(async move {
        debug!("consumer started");
        let mut persisted = 0;

        // Noneは空かつ入力終了（正常終了）
        while let Some(item) = channel.take().await {
            save_photo(&item, &latency).await;
            persisted += 1;
            reporter.report_persisted(item.id).await;
        }

        let elapsed = started_at.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        reporter.report_done(elapsed_ms).await;

        debug!(persisted, elapsed_ms, "consumer finished");
        ConsumerOutcome { persisted, elapsed }
    })
}
