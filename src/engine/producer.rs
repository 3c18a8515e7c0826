// Producer - 写真処理と投入機能

use crate::{
    core::{PipelineItem, PipelineReporter, PipelineResult},
    services::{process_photo, BoundedChannel, LatencyModel, WorkSource},
};
use std::sync::Arc;
use tracing::debug;

/// 単一Producer
///
/// 作業プールが空になるまでIDを取り出し、処理してチャンネルに投入する。
/// 投入したアイテム数を返す。
pub fn spawn_producer<R>(
    producer_id: usize,
    source: Arc<WorkSource>,
    channel: Arc<BoundedChannel<PipelineItem>>,
    latency: LatencyModel,
    reporter: Arc<R>,
) -> tokio::task::JoinHandle<PipelineResult<usize>>
where
    R: PipelineReporter + 'static,
{
    tokio::spawn(async move {
        debug!(producer_id, "producer started");
        let mut produced = 0;

        // Noneは作業切れ（正常終了）
        while let Some(id) = source.try_take() {
            let item = process_photo(id, &latency).await;

            // 満杯ならここで待機（バックプレッシャー）
            channel.put(item).await?;
            produced += 1;

            reporter.report_produced(id, producer_id).await;
        }

        debug!(producer_id, produced, "producer finished");
        Ok(produced)
    })
}

/// Producers: 並行に動く複数のProducer
pub fn spawn_producers<R>(
    producer_count: usize,
    source: Arc<WorkSource>,
    channel: Arc<BoundedChannel<PipelineItem>>,
    latency: LatencyModel,
    reporter: Arc<R>,
) -> Vec<tokio::task::JoinHandle<PipelineResult<usize>>>
where
    R: PipelineReporter + 'static,
{
    (0..producer_count)
        .map(|producer_id| {
            spawn_producer(
                producer_id,
                Arc::clone(&source),
                Arc::clone(&channel),
                latency,
                Arc::clone(&reporter),
            )
        })
        .collect()
}
