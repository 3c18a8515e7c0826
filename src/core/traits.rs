// パイプラインの観測インターフェース定義

use super::types::PhotoId;
use async_trait::async_trait;
use mockall::automock;

/// 進捗イベントの出力先を抽象化するトレイト
///
/// ProducerとConsumerから並行に呼ばれるため Send + Sync が必要
#[automock]
#[async_trait]
pub trait PipelineReporter: Send + Sync {
    /// パイプライン開始時の報告
    async fn report_started(&self, total_items: u32, producer_count: usize);

    /// Producerがアイテムをチャンネルに投入した
    async fn report_produced(&self, id: PhotoId, producer: usize);

    /// Consumerがアイテムの保存を終えた
    async fn report_persisted(&self, id: PhotoId);

    /// Consumer終了時の最終報告（開始からの経過ミリ秒）
    async fn report_done(&self, elapsed_ms: u64);
}

// PipelineReporter for Box<dyn PipelineReporter>
#[async_trait]
impl PipelineReporter for Box<dyn PipelineReporter> {
    async fn report_started(&self, total_items: u32, producer_count: usize) {
        self.as_ref().report_started(total_items, producer_count).await
    }

    async fn report_produced(&self, id: PhotoId, producer: usize) {
        self.as_ref().report_produced(id, producer).await
    }

    async fn report_persisted(&self, id: PhotoId) {
        self.as_ref().report_persisted(id).await
    }

    async fn report_done(&self, elapsed_ms: u64) {
        self.as_ref().report_done(elapsed_ms).await
    }
}
