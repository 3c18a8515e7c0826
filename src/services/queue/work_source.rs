// WorkSource - 未処理の写真IDプール
// 複数Producerから同時に取り出されても、各IDはちょうど一度だけ払い出される

use crate::core::PhotoId;
use std::sync::atomic::{AtomicU64, Ordering};

/// 1..=total の連番IDを払い出すプール
///
/// IDが連続しているため、キューではなくアトミックなカーソルで表現する
#[derive(Debug)]
pub struct WorkSource {
    next: AtomicU64,
    total: PhotoId,
}

impl WorkSource {
    pub fn new(total: PhotoId) -> Self {
        Self {
            next: AtomicU64::new(1),
            total,
        }
    }

    /// 次のIDを取り出す
    ///
    /// 待機はしない。`None`はプールが空になったことを示し、Producerの終了シグナルとなる。
    pub fn try_take(&self) -> Option<PhotoId> {
        let limit = u64::from(self.total);
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next <= limit).then_some(next + 1)
            })
            .ok()
            .and_then(|id| PhotoId::try_from(id).ok())
    }

    /// 未払い出しのID数
    pub fn remaining(&self) -> u32 {
        let next = self.next.load(Ordering::Acquire);
        let remaining = (u64::from(self.total) + 1).saturating_sub(next);
        u32::try_from(remaining).unwrap_or(u32::MAX)
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_takes_ids_in_order() {
        let source = WorkSource::new(3);

        assert_eq!(source.remaining(), 3);
        assert_eq!(source.try_take(), Some(1));
        assert_eq!(source.try_take(), Some(2));
        assert_eq!(source.try_take(), Some(3));
        assert_eq!(source.try_take(), None);
        assert!(source.is_exhausted());
    }

    #[test]
    fn test_empty_source() {
        let source = WorkSource::new(0);

        assert_eq!(source.total(), 0);
        assert!(source.is_exhausted());
        assert_eq!(source.try_take(), None);
    }

    #[test]
    fn test_exhausted_source_stays_exhausted() {
        let source = WorkSource::new(1);
        assert_eq!(source.try_take(), Some(1));

        for _ in 0..10 {
            assert_eq!(source.try_take(), None);
        }
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_max_id_does_not_overflow() {
        let source = WorkSource::new(u32::MAX);
        source.next.store(u64::from(u32::MAX), Ordering::Release);

        assert_eq!(source.try_take(), Some(u32::MAX));
        assert_eq!(source.try_take(), None);
    }

    #[test]
    fn test_concurrent_take_is_exactly_once() {
        let source = Arc::new(WorkSource::new(10_000));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let source = Arc::clone(&source);
                std::thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(id) = source.try_take() {
                        taken.push(id);
                    }
                    taken
                })
            })
            .collect();

        let mut all = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(all.len(), 10_000);
        assert_eq!(unique.len(), 10_000);
        assert_eq!(unique, (1..=10_000).collect::<HashSet<_>>());
    }
}
