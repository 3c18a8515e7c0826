// パイプライン専用のカスタムエラー型定義
// 正常終了シグナル（作業切れ・チャンネル完了）はエラーではなくOption::Noneで表現する

use thiserror::Error;

/// パイプライン固有のエラー型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    /// 入力終了済みチャンネルへの投入（コーディネーターの順序違反）
    #[error("チャンネルエラー: 入力終了後に投入されました ({message})")]
    ChannelClosedError { message: String },

    #[error("並列実行エラー: {message}")]
    ParallelExecutionError { message: String },

    #[error("タスクエラー: {source}")]
    TaskError {
        #[source]
        source: tokio::task::JoinError,
    },
}

impl PipelineError {
    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// 不変条件違反（close後のput）の作成
    pub fn channel_closed(message: impl Into<String>) -> Self {
        Self::ChannelClosedError {
            message: message.into(),
        }
    }

    /// 並列実行エラーの作成
    pub fn parallel_execution(message: impl Into<String>) -> Self {
        Self::ParallelExecutionError {
            message: message.into(),
        }
    }

    /// タスクエラーの作成
    pub fn task(source: tokio::task::JoinError) -> Self {
        Self::TaskError { source }
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationError { .. } | Self::TaskError { .. } => ErrorSeverity::High,
            Self::ParallelExecutionError { .. } => ErrorSeverity::Medium,
            Self::ChannelClosedError { .. } => ErrorSeverity::Critical,
        }
    }

    /// エラーが回復可能かどうかを判定
    ///
    /// リトライ機構は存在しないため、起動前に利用者が直せる設定系のみtrue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }

    /// プログラム上の不変条件違反かどうか
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::ChannelClosedError { .. })
    }
}

impl From<tokio::task::JoinError> for PipelineError {
    fn from(source: tokio::task::JoinError) -> Self {
        Self::task(source)
    }
}

/// エラーの重要度レベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// 中重要度 - 警告レベル
    Medium,
    /// 高重要度 - 起動・実行を中止
    High,
    /// 致命的 - プロセス停止レベル
    Critical,
}

impl ErrorSeverity {
    /// 重要度の文字列表現を取得
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

/// パイプライン処理の結果型
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_fields() {
        let error = PipelineError::validation("producer_count", "0は指定できません");

        assert!(error.to_string().contains("バリデーションエラー"));
        assert!(error.to_string().contains("producer_count"));
        assert_eq!(error.severity(), ErrorSeverity::High);
        assert!(!error.is_invariant_violation());

        match &error {
            PipelineError::ValidationError { field, reason } => {
                assert_eq!(field, "producer_count");
                assert_eq!(reason, "0は指定できません");
            }
            _ => panic!("Expected ValidationError"),
        }
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_channel_closed_is_critical_invariant_violation() {
        let error = PipelineError::channel_closed("photo 3");

        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(error.is_invariant_violation());
        assert!(!error.is_recoverable());
        assert!(error.to_string().contains("photo 3"));
    }

    #[test]
    fn test_parallel_execution_is_medium() {
        let error = PipelineError::parallel_execution("state=finished");

        assert_eq!(error.severity(), ErrorSeverity::Medium);
        assert!(!error.is_recoverable());
        assert!(error.to_string().contains("state=finished"));
    }

    #[tokio::test]
    async fn test_task_error_from_join_error() {
        let handle = tokio::spawn(async { panic!("worker panic") });
        let join_error = handle.await.unwrap_err();

        let error: PipelineError = join_error.into();
        assert!(matches!(error, PipelineError::TaskError { .. }));
        assert!(!error.is_recoverable());
        assert_eq!(error.severity(), ErrorSeverity::High);

        let source = std::error::Error::source(&error).map(|s| s.to_string());
        assert!(source.is_some());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Critical > ErrorSeverity::High);
        assert!(ErrorSeverity::High > ErrorSeverity::Medium);
        assert_eq!(ErrorSeverity::Critical.as_str(), "CRITICAL");
        assert_eq!(ErrorSeverity::Medium.as_str(), "MEDIUM");
    }
}
