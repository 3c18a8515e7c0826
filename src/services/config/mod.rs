// 設定管理機能
// 起動時に一度だけ読み込まれ、全ワーカーから読み取り専用で共有される

pub mod implementations;

// 公開API
pub use implementations::{
    PipelineConfig, DEFAULT_IMG_PROC_TIME_MS, DEFAULT_PHOTO_COUNT, DEFAULT_PRODUCER_COUNT,
    DEFAULT_QUEUE_SIZE, DEFAULT_SAVE_DB_TIME_MS,
};
