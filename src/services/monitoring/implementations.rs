// 進捗監視の具象実装

use crate::core::{PhotoId, PipelineEvent, PipelineReporter};
use async_trait::async_trait;
use chrono::Local;
use std::sync::{Arc, Mutex, PoisonError};

/// 3桁区切りの数値表記（例: 12345 → "12,345"）
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }
    formatted
}

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最終報告のみ出力する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn timestamp() -> String {
        Local::now().format("%M:%S").to_string()
    }
}

#[async_trait]
impl PipelineReporter for ConsoleReporter {
    async fn report_started(&self, total_items: u32, producer_count: usize) {
        tracing::debug!(total_items, producer_count, "console reporter started");
    }

    async fn report_produced(&self, id: PhotoId, _producer: usize) {
        if !self.quiet {
            println!("{} Photo {id} is processed", Self::timestamp());
        }
    }

    async fn report_persisted(&self, id: PhotoId) {
        if !self.quiet {
            println!("{} Photo {id} is saved to DB", Self::timestamp());
        }
    }

    async fn report_done(&self, elapsed_ms: u64) {
        println!("Done {}ms", format_thousands(elapsed_ms));
    }
}

/// 1イベント1行のJSON出力実装
#[derive(Debug, Default, Clone)]
pub struct JsonLinesReporter {
    quiet: bool,
}

impl JsonLinesReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// doneイベントのみ出力する
    pub fn quiet() -> Self {
        Self { quiet: true }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    fn emit(event: &PipelineEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(error) => tracing::warn!(%error, event = event.name(), "failed to encode event"),
        }
    }
}

#[async_trait]
impl PipelineReporter for JsonLinesReporter {
    async fn report_started(&self, _total_items: u32, _producer_count: usize) {
        // 開始イベントは出力しない
    }

    async fn report_produced(&self, id: PhotoId, producer: usize) {
        if !self.quiet {
            Self::emit(&PipelineEvent::produced(id, producer));
        }
    }

    async fn report_persisted(&self, id: PhotoId) {
        if !self.quiet {
            Self::emit(&PipelineEvent::persisted(id));
        }
    }

    async fn report_done(&self, elapsed_ms: u64) {
        Self::emit(&PipelineEvent::done(elapsed_ms));
    }
}

/// イベントをメモリに記録する実装（テスト・組み込み用）
///
/// クローンは同じ記録を共有する
#[derive(Debug, Default, Clone)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<PipelineEvent>>>,
    started: Arc<Mutex<Option<(u32, usize)>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, event: PipelineEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// 記録済みイベントのスナップショット
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 開始報告の内容（件数, Producer数）
    pub fn started(&self) -> Option<(u32, usize)> {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 投入されたIDを記録順に取得
    pub fn produced_ids(&self) -> Vec<PhotoId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PipelineEvent::Produced { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// 指定Producerが投入したIDを取得
    pub fn produced_by(&self, producer: usize) -> Vec<PhotoId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PipelineEvent::Produced { id, producer: p, .. } if p == producer => Some(id),
                _ => None,
            })
            .collect()
    }

    /// 保存されたIDを記録順に取得
    pub fn persisted_ids(&self) -> Vec<PhotoId> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                PipelineEvent::Persisted { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// 最終報告の経過ミリ秒
    pub fn done_elapsed_ms(&self) -> Option<u64> {
        self.events().into_iter().find_map(|event| match event {
            PipelineEvent::Done { elapsed_ms } => Some(elapsed_ms),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl PipelineReporter for MemoryReporter {
    async fn report_started(&self, total_items: u32, producer_count: usize) {
        *self.started.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((total_items, producer_count));
    }

    async fn report_produced(&self, id: PhotoId, producer: usize) {
        self.record(PipelineEvent::produced(id, producer));
    }

    async fn report_persisted(&self, id: PhotoId) {
        self.record(PipelineEvent::persisted(id));
    }

    async fn report_done(&self, elapsed_ms: u64) {
        self.record(PipelineEvent::done(elapsed_ms));
    }
}

/// 何もしない進捗報告実装（テスト・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpReporter;

impl NoOpReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PipelineReporter for NoOpReporter {
    async fn report_started(&self, _total_items: u32, _producer_count: usize) {
        // 何もしない
    }

    async fn report_produced(&self, _id: PhotoId, _producer: usize) {
        // 何もしない
    }

    async fn report_persisted(&self, _id: PhotoId) {
        // 何もしない
    }

    async fn report_done(&self, _elapsed_ms: u64) {
        // 何もしない
    }
}
