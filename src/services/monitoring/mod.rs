// 進捗監視機能
// 投入・保存・完了イベントの出力

pub mod implementations;

// 公開API
pub use implementations::{
    format_thousands, ConsoleReporter, JsonLinesReporter, MemoryReporter, NoOpReporter,
};
