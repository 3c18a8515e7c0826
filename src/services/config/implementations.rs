// パイプライン設定の具象実装

use crate::core::{PipelineError, PipelineResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PHOTO_COUNT: u32 = 100;
pub const DEFAULT_QUEUE_SIZE: usize = 10;
pub const DEFAULT_PRODUCER_COUNT: usize = 1;
pub const DEFAULT_IMG_PROC_TIME_MS: u64 = 4000;
pub const DEFAULT_SAVE_DB_TIME_MS: u64 = 1000;

/// パイプライン設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// 処理する写真の枚数（IDは1..=photo_count）
    pub photo_count: u32,
    /// チャンネル容量
    pub queue_size: usize,
    /// Producerの数
    pub producer_count: usize,
    /// 画像処理の基準時間（ミリ秒）
    pub img_proc_time_ms: u64,
    /// DB保存の基準時間（ミリ秒）
    pub save_db_time_ms: u64,
}

impl PipelineConfig {
    pub fn with_photo_count(mut self, photo_count: u32) -> Self {
        self.photo_count = photo_count;
        self
    }

    pub fn with_queue_size(mut self, queue_size: usize) -> Self {
        self.queue_size = queue_size;
        self
    }

    pub fn with_producer_count(mut self, producer_count: usize) -> Self {
        self.producer_count = producer_count;
        self
    }

    pub fn with_img_proc_time(mut self, img_proc_time_ms: u64) -> Self {
        self.img_proc_time_ms = img_proc_time_ms;
        self
    }

    pub fn with_save_db_time(mut self, save_db_time_ms: u64) -> Self {
        self.save_db_time_ms = save_db_time_ms;
        self
    }

    /// 遅延なし設定（テスト・ベンチマーク用）
    pub fn instant(photo_count: u32) -> Self {
        Self::default()
            .with_photo_count(photo_count)
            .with_img_proc_time(0)
            .with_save_db_time(0)
    }

    /// 設定の検証
    ///
    /// パイプライン起動前に呼ばれ、失敗した場合はワーカーを一切起動しない
    pub fn validate(&self) -> PipelineResult<()> {
        if self.queue_size == 0 {
            return Err(PipelineError::validation(
                "queue_size",
                "キューサイズは1以上である必要があります",
            ));
        }

        if self.producer_count == 0 {
            return Err(PipelineError::validation(
                "producer_count",
                "Producer数は1以上である必要があります",
            ));
        }

        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            photo_count: DEFAULT_PHOTO_COUNT,
            queue_size: DEFAULT_QUEUE_SIZE,
            producer_count: DEFAULT_PRODUCER_COUNT,
            img_proc_time_ms: DEFAULT_IMG_PROC_TIME_MS,
            save_db_time_ms: DEFAULT_SAVE_DB_TIME_MS,
        }
    }
}
