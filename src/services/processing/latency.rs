// 処理時間のばらつきモデル

use rand::RngExt;
use std::time::Duration;

/// 基準時間の±20%でばらつく待ち時間
///
/// 実際の待ち時間は `[base*4/5, base*4/5 + base*2/5)` ミリ秒の一様乱数。
/// 幅が0になる小さな基準値では下限値そのものを返す。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyModel {
    base_ms: u64,
}

impl LatencyModel {
    pub const fn new(base_ms: u64) -> Self {
        Self { base_ms }
    }

    pub const fn base_ms(&self) -> u64 {
        self.base_ms
    }

    /// 待ち時間の範囲（下限ミリ秒, 幅ミリ秒）
    pub fn bounds(&self) -> (u64, u64) {
        let low = self.base_ms.saturating_mul(4) / 5;
        let span = self.base_ms.saturating_mul(2) / 5;
        (low, span)
    }

    /// 待ち時間を一つ抽選
    pub fn sample(&self) -> Duration {
        let (low, span) = self.bounds();
        let jitter = if span == 0 {
            0
        } else {
            // スレッドローカルな乱数源なのでワーカー間で競合しない
            rand::rng().random_range(0..span)
        };
        Duration::from_millis(low + jitter)
    }

    /// 抽選した時間だけ待機し、その時間を返す
    pub async fn wait(&self) -> Duration {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_base_has_no_delay() {
        let latency = LatencyModel::new(0);

        assert_eq!(latency.bounds(), (0, 0));
        assert_eq!(latency.sample(), Duration::ZERO);
    }

    #[test]
    fn test_tiny_base_without_span() {
        // 2*2/5 = 0 なので乱数幅はなく、下限値 2*4/5 = 1 になる
        let latency = LatencyModel::new(2);

        assert_eq!(latency.bounds(), (1, 0));
        assert_eq!(latency.sample(), Duration::from_millis(1));
    }

    #[test]
    fn test_sample_stays_within_twenty_percent() {
        let latency = LatencyModel::new(4000);
        assert_eq!(latency.bounds(), (3200, 1600));

        for _ in 0..1000 {
            let delay = latency.sample();
            assert!(delay >= Duration::from_millis(3200));
            assert!(delay < Duration::from_millis(4800));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_sleeps_for_sampled_duration() {
        let latency = LatencyModel::new(1000);
        let start = tokio::time::Instant::now();

        let delay = latency.wait().await;

        let elapsed = start.elapsed();
        assert!(elapsed >= delay);
        assert!(elapsed < delay + Duration::from_millis(5));
        assert!(delay >= Duration::from_millis(800));
        assert!(delay < Duration::from_millis(1200));
    }

    #[tokio::test]
    async fn test_wait_with_zero_base_returns_immediately() {
        let latency = LatencyModel::new(0);
        assert_eq!(latency.wait().await, Duration::ZERO);
    }
}
