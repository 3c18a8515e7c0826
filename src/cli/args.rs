use crate::services::config::{
    PipelineConfig, DEFAULT_IMG_PROC_TIME_MS, DEFAULT_PHOTO_COUNT, DEFAULT_PRODUCER_COUNT,
    DEFAULT_QUEUE_SIZE, DEFAULT_SAVE_DB_TIME_MS,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "photo_pipeline")]
#[command(about = "Simulates a bounded producer/consumer photo processing pipeline")]
#[command(version)]
pub struct Cli {
    /// Number of photos to process
    #[arg(long = "photo-count", alias = "photoCount", default_value_t = DEFAULT_PHOTO_COUNT)]
    pub photo_count: u32,

    /// Capacity of the queue between producers and the consumer
    #[arg(long = "queue-size", alias = "queueSize", default_value_t = DEFAULT_QUEUE_SIZE)]
    pub queue_size: usize,

    /// Number of concurrent producers
    #[arg(long = "producer-count", alias = "producerCount", default_value_t = DEFAULT_PRODUCER_COUNT)]
    pub producer_count: usize,

    /// Base image processing time in milliseconds (±20%)
    #[arg(long = "img-proc-time", alias = "imgProcTime", default_value_t = DEFAULT_IMG_PROC_TIME_MS)]
    pub img_proc_time: u64,

    /// Base database save time in milliseconds (±20%)
    #[arg(long = "save-db-time", alias = "saveDbTime", default_value_t = DEFAULT_SAVE_DB_TIME_MS)]
    pub save_db_time: u64,

    /// Output format for pipeline events
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only print the final report
    #[arg(short, long)]
    pub quiet: bool,

    /// Log level for diagnostics on stderr (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    /// コマンドライン引数からパイプライン設定を作成
    pub fn to_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_photo_count(self.photo_count)
            .with_queue_size(self.queue_size)
            .with_producer_count(self.producer_count)
            .with_img_proc_time(self.img_proc_time)
            .with_save_db_time(self.save_db_time)
    }
}
