pub mod cli;
pub mod core;
pub mod engine;
pub mod services;

// 主要APIの再エクスポート
pub use crate::core::{
    PhotoId, PipelineError, PipelineEvent, PipelineItem, PipelineReporter, PipelineResult,
    PipelineState, PipelineSummary,
};
pub use engine::{run_simulation, PhotoPipeline};
pub use services::{
    BoundedChannel, ConsoleReporter, JsonLinesReporter, MemoryReporter, NoOpReporter,
    PipelineConfig, WorkSource,
};
