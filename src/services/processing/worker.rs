// Worker - 単一写真の処理と保存の模擬

use super::latency::LatencyModel;
use crate::core::{PhotoId, PipelineItem};
use std::time::Duration;

/// 写真の縮小・サムネイル作成を模擬し、チャンネルに流すアイテムを作る
pub async fn process_photo(id: PhotoId, latency: &LatencyModel) -> PipelineItem {
    latency.wait().await;
    PipelineItem::new(id)
}

/// DB書き込みを模擬する
///
/// 実際の待ち時間を返す
pub async fn save_photo(item: &PipelineItem, latency: &LatencyModel) -> Duration {
    let delay = latency.wait().await;
    tracing::trace!(
        id = item.id,
        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
        "photo saved"
    );
    delay
}
