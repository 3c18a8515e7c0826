// サービス層 - 機能別の部品
// 各サービスは特定の責任を持ち、疎結合で設計されている

pub mod config;
pub mod monitoring;
pub mod processing;
pub mod queue;

// 公開API - 各サービスの主要機能を明示的にエクスポート
pub use config::PipelineConfig;
pub use monitoring::{ConsoleReporter, JsonLinesReporter, MemoryReporter, NoOpReporter};
pub use processing::{process_photo, save_photo, LatencyModel};
pub use queue::{BoundedChannel, WorkSource};
