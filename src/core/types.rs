// パイプラインで受け渡されるデータ型定義

use chrono::{DateTime, Local};
use serde::Serialize;

/// 作業アイテムの識別子（1..=photo_count の連番）
pub type PhotoId = u32;

/// Producerが処理を終えてチャンネルに投入するアイテム
///
/// 所有権はProducer → チャンネル → Consumerの順に移動し、
/// 同時に複数のタスクから触られることはない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineItem {
    pub id: PhotoId,
    pub payload: Vec<u8>,
}

impl PipelineItem {
    /// 空のペイロードでアイテムを作成
    pub fn new(id: PhotoId) -> Self {
        Self {
            id,
            payload: Vec::new(),
        }
    }

    pub fn with_payload(id: PhotoId, payload: Vec<u8>) -> Self {
        Self { id, payload }
    }
}

/// 観測用イベント
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    Produced {
        timestamp: DateTime<Local>,
        id: PhotoId,
        producer: usize,
    },
    Persisted {
        timestamp: DateTime<Local>,
        id: PhotoId,
    },
    Done {
        elapsed_ms: u64,
    },
}

impl PipelineEvent {
    pub fn produced(id: PhotoId, producer: usize) -> Self {
        Self::Produced {
            timestamp: Local::now(),
            id,
            producer,
        }
    }

    pub fn persisted(id: PhotoId) -> Self {
        Self::Persisted {
            timestamp: Local::now(),
            id,
        }
    }

    pub fn done(elapsed_ms: u64) -> Self {
        Self::Done { elapsed_ms }
    }

    /// イベント名（"produced" / "persisted" / "done"）
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Produced { .. } => "produced",
            Self::Persisted { .. } => "persisted",
            Self::Done { .. } => "done",
        }
    }
}

/// コーディネーターの状態遷移
/// Idle → Running → Draining → Finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Running,
    Draining,
    Finished,
}

impl PipelineState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Draining => "draining",
            Self::Finished => "finished",
        }
    }
}

/// パイプライン全体のサマリー
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineSummary {
    pub total_items: u32,
    pub produced: usize,
    pub persisted: usize,
    pub producer_count: usize,
    pub queue_size: usize,
    /// チャンネルに同時に滞留したアイテム数の最大値
    pub peak_buffered: usize,
    pub elapsed_ms: u64,
}
