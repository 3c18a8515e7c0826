// BoundedChannel - 容量制限付きFIFOチャンネル
// 満杯ならputが待機し、空ならtakeが待機する。入力終了は一方向の遷移

use crate::core::{PipelineError, PipelineResult};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

struct ChannelState<T> {
    buffer: VecDeque<T>,
    closed: bool,
    peak_len: usize,
}

/// ProducerとConsumerの間に置く容量制限付きチャンネル
///
/// 状態はMutexで保護し、待機は2つのNotify（not_full / not_empty）で行う。
/// 待機側は条件を確認する前に`Notified::enable`で登録するため、
/// 確認から待機までの間に起きたput/closeの通知を取りこぼさない。
pub struct BoundedChannel<T> {
    capacity: usize,
    state: Mutex<ChannelState<T>>,
    not_full: Notify,
    not_empty: Notify,
}

impl<T> BoundedChannel<T> {
    /// 指定容量のチャンネルを作成
    pub fn new(capacity: usize) -> PipelineResult<Self> {
        if capacity == 0 {
            return Err(PipelineError::validation(
                "capacity",
                "チャンネル容量は1以上である必要があります",
            ));
        }

        Ok(Self {
            capacity,
            state: Mutex::new(ChannelState {
                buffer: VecDeque::with_capacity(capacity),
                closed: false,
                peak_len: 0,
            }),
            not_full: Notify::new(),
            not_empty: Notify::new(),
        })
    }

    // クリティカルセクション内でpanicしないため、poisonされても状態は整合している
    fn lock_state(&self) -> MutexGuard<'_, ChannelState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// 末尾にアイテムを追加
    ///
    /// 満杯の間は待機する。入力終了後の呼び出し（待機中に終了された場合を含む）は
    /// 不変条件違反としてエラーを返す。
    pub async fn put(&self, item: T) -> PipelineResult<()> {
        loop {
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock_state();
                if state.closed {
                    return Err(PipelineError::channel_closed(format!(
                        "capacity={}, buffered={}",
                        self.capacity,
                        state.buffer.len()
                    )));
                }

                if state.buffer.len() < self.capacity {
                    state.buffer.push_back(item);
                    state.peak_len = state.peak_len.max(state.buffer.len());
                    drop(state);
                    self.not_empty.notify_one();
                    return Ok(());
                }
            }

            notified.await;
        }
    }

    /// 先頭のアイテムを取り出す
    ///
    /// 空かつ入力受付中の間は待機する。
    /// `None`は「空かつ入力終了」を意味し、Consumerの終了シグナルとなる。
    pub async fn take(&self) -> Option<T> {
        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock_state();
                if let Some(item) = state.buffer.pop_front() {
                    drop(state);
                    self.not_full.notify_one();
                    return Some(item);
                }

                if state.closed {
                    return None;
                }
            }

            notified.await;
        }
    }

    /// 入力終了を宣言
    ///
    /// 冪等。最初の呼び出しのみtrueを返し、待機中の全てのtake/putを起こす。
    pub fn close_for_input(&self) -> bool {
        let newly_closed = {
            let mut state = self.lock_state();
            !std::mem::replace(&mut state.closed, true)
        };

        if newly_closed {
            self.not_empty.notify_waiters();
            self.not_full.notify_waiters();
        }

        newly_closed
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 現在バッファされているアイテム数
    pub fn len(&self) -> usize {
        self.lock_state().buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_state().buffer.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.lock_state().closed
    }

    /// 入力終了済みかつ全アイテムが取り出し済み
    pub fn is_finished(&self) -> bool {
        let state = self.lock_state();
        state.closed && state.buffer.is_empty()
    }

    /// これまでに観測された最大バッファ数
    pub fn peak_len(&self) -> usize {
        self.lock_state().peak_len
    }
}
