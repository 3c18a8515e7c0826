// Pipeline - Producer-Consumer パイプラインのコーディネーター
// 起動 → Producer全員の合流 → 入力終了 → Consumerの合流 の順序を管理する

use super::{consumer::spawn_consumer, producer::spawn_producers};
use crate::{
    core::{PipelineError, PipelineReporter, PipelineResult, PipelineState, PipelineSummary},
    services::{BoundedChannel, LatencyModel, PipelineConfig, WorkSource},
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info};

/// 写真処理パイプライン
///
/// 設定とレポーターはコンストラクタで注入する。
/// 状態遷移は `Idle → Running → Draining → Finished` の一方向で、
/// `subscribe` で購読できる。一つのインスタンスは一度だけ実行できる。
pub struct PhotoPipeline<R> {
    config: Arc<PipelineConfig>,
    reporter: Arc<R>,
    state_tx: watch::Sender<PipelineState>,
}

impl<R> PhotoPipeline<R>
where
    R: PipelineReporter + 'static,
{
    /// 新しいパイプラインを作成
    ///
    /// 設定が不正な場合はここで失敗し、ワーカーは起動しない
    pub fn new(config: PipelineConfig, reporter: R) -> PipelineResult<Self> {
        Self::with_shared_reporter(config, Arc::new(reporter))
    }

    /// 呼び出し側と共有するレポーターでパイプラインを作成
    pub fn with_shared_reporter(config: PipelineConfig, reporter: Arc<R>) -> PipelineResult<Self> {
        config.validate()?;
        let (state_tx, _) = watch::channel(PipelineState::Idle);

        Ok(Self {
            config: Arc::new(config),
            reporter,
            state_tx,
        })
    }

    /// パイプラインを最後まで実行
    pub async fn run(&self) -> PipelineResult<PipelineSummary> {
        // Idle → Running（確認と遷移を一度に行い、二重実行を防ぐ）
        let claimed = self.state_tx.send_if_modified(|state| {
            if *state == PipelineState::Idle {
                *state = PipelineState::Running;
                true
            } else {
                false
            }
        });
        if !claimed {
            return Err(PipelineError::parallel_execution(format!(
                "パイプラインは既に実行されています (state={})",
                self.state().as_str()
            )));
        }
        info!(
            photo_count = self.config.photo_count,
            queue_size = self.config.queue_size,
            producer_count = self.config.producer_count,
            "pipeline state changed to running"
        );

        let config = Arc::clone(&self.config);
        let started_at = Instant::now();

        let source = Arc::new(WorkSource::new(config.photo_count));
        let channel = Arc::new(BoundedChannel::new(config.queue_size)?);
        self.reporter
            .report_started(config.photo_count, config.producer_count)
            .await;

        let producer_handles = spawn_producers(
            config.producer_count,
            Arc::clone(&source),
            Arc::clone(&channel),
            LatencyModel::new(config.img_proc_time_ms),
            Arc::clone(&self.reporter),
        );
        let mut consumer_handle = spawn_consumer(
            Arc::clone(&channel),
            LatencyModel::new(config.save_db_time_ms),
            Arc::clone(&self.reporter),
            started_at,
        );

        // Producerの合流とConsumerの異常終了を同時に待機する
        // Consumerが入力終了前に止まるのはパニック時のみで、その場合はcloseで待機中のProducerを解放する
        let producers = join_producers(producer_handles);
        tokio::pin!(producers);
        let mut consumer_result = None;

        let (produced, first_error) = tokio::select! {
            joined = &mut producers => joined,
            result = &mut consumer_handle => {
                channel.close_for_input();
                consumer_result = Some(result);
                producers.await
            }
        };

        // Running → Draining: 以降putされることはない
        self.transition(PipelineState::Draining);
        channel.close_for_input();

        // Draining → Finished
        let consumer_result = match consumer_result {
            Some(result) => result,
            None => consumer_handle.await,
        };
        self.transition(PipelineState::Finished);

        let outcome = match consumer_result {
            Ok(outcome) => outcome,
            Err(join_error) => {
                let error = PipelineError::task(join_error);
                error!(%error, severity = error.severity().as_str(), "consumer failed");
                return Err(error);
            }
        };

        if let Some(error) = first_error {
            error!(%error, severity = error.severity().as_str(), "producer failed");
            return Err(error);
        }

        let summary = PipelineSummary {
            total_items: config.photo_count,
            produced,
            persisted: outcome.persisted,
            producer_count: config.producer_count,
            queue_size: config.queue_size,
            peak_buffered: channel.peak_len(),
            elapsed_ms: u64::try_from(outcome.elapsed.as_millis()).unwrap_or(u64::MAX),
        };
        info!(
            produced = summary.produced,
            persisted = summary.persisted,
            peak_buffered = summary.peak_buffered,
            elapsed_ms = summary.elapsed_ms,
            "pipeline finished"
        );

        Ok(summary)
    }

    fn transition(&self, next: PipelineState) {
        let previous = self.state_tx.send_replace(next);
        info!(
            from = previous.as_str(),
            to = next.as_str(),
            "pipeline state changed"
        );
    }

    /// 現在の状態
    pub fn state(&self) -> PipelineState {
        *self.state_tx.borrow()
    }

    /// 状態遷移の購読
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state_tx.subscribe()
    }

    /// 設定への参照を取得（読み取り専用アクセス）
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &Arc<R> {
        &self.reporter
    }
}

/// 全Producerを合流させ、投入数の合計と最初のエラーを返す
///
/// 失敗したProducerがあっても残りを待つ
async fn join_producers(
    handles: Vec<JoinHandle<PipelineResult<usize>>>,
) -> (usize, Option<PipelineError>) {
    let mut produced = 0;
    let mut first_error = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(count)) => produced += count,
            Ok(Err(error)) => {
                first_error.get_or_insert(error);
            }
            Err(join_error) => {
                first_error.get_or_insert(PipelineError::task(join_error));
            }
        }
    }
    (produced, first_error)
}
