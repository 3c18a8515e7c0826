// エンジン層 - 並列処理とオーケストレーション
// サービス層の部品を組み合わせてパイプラインを構成する

pub mod api;
pub mod consumer;
pub mod pipeline;
pub mod producer;

// 公開API - 主要エンジンクラス
pub use api::{create_console_pipeline, create_quiet_pipeline, run_simulation};
pub use consumer::{spawn_consumer, ConsumerOutcome};
pub use pipeline::PhotoPipeline;
pub use producer::{spawn_producer, spawn_producers};
