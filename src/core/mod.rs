// コアレイヤー - 基盤となるトレイト、型、エラー定義
// 他のレイヤーから参照される基本的な抽象化を提供

pub mod error;
pub mod traits;
pub mod types;

// 公開API
pub use error::{ErrorSeverity, PipelineError, PipelineResult};
pub use traits::{MockPipelineReporter, PipelineReporter};
pub use types::{PhotoId, PipelineEvent, PipelineItem, PipelineState, PipelineSummary};
