// BoundedChannel / WorkSource の性質テスト
// ランダムな待ち時間で Producer / Consumer を揺さぶり、不変条件を検査する
use photo_pipeline::{BoundedChannel, WorkSource};
use rand::RngExt;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::time::{sleep, timeout, Duration};

fn random_delay(max_ms: u64) -> Duration {
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}

#[tokio::test(start_paused = true)]
async fn test_fuzzed_capacity_and_exactly_once() {
    for round in 0..20u32 {
        let capacity = (round % 5 + 1) as usize;
        let producer_count = round % 4 + 1;
        let total = 50 + round;

        let source = Arc::new(WorkSource::new(total));
        let channel = Arc::new(BoundedChannel::new(capacity).unwrap());

        let producers: Vec<_> = (0..producer_count)
            .map(|_| {
                let source = Arc::clone(&source);
                let channel = Arc::clone(&channel);
                tokio::spawn(async move {
                    while let Some(id) = source.try_take() {
                        sleep(random_delay(7)).await;
                        channel.put(id).await.unwrap();
                        assert!(channel.len() <= capacity);
                    }
                })
            })
            .collect();

        let consumer = {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move {
                let mut received = Vec::new();
                while let Some(id) = channel.take().await {
                    assert!(channel.len() <= capacity);
                    received.push(id);
                    sleep(random_delay(9)).await;
                }
                received
            })
        };

        for producer in producers {
            producer.await.unwrap();
        }
        assert!(channel.close_for_input());

        let received = consumer.await.unwrap();
        let unique: HashSet<_> = received.iter().copied().collect();

        assert_eq!(received.len(), total as usize);
        assert_eq!(unique, (1..=total).collect::<HashSet<_>>());
        assert!(channel.peak_len() <= capacity);
        assert!(channel.is_finished());
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_producer_order_survives_random_delays() {
    let channel = Arc::new(BoundedChannel::new(2).unwrap());

    let producer = {
        let channel = Arc::clone(&channel);
        tokio::spawn(async move {
            for id in 1..=40u32 {
                sleep(random_delay(5)).await;
                channel.put(id).await.unwrap();
            }
            channel.close_for_input();
        })
    };

    let mut received = Vec::new();
    while let Some(id) = channel.take().await {
        sleep(random_delay(5)).await;
        received.push(id);
    }

    producer.await.unwrap();
    assert_eq!(received, (1..=40).collect::<Vec<_>>());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_close_with_blocked_consumer_never_deadlocks() {
    for _ in 0..100 {
        let channel = Arc::new(BoundedChannel::<u32>::new(1).unwrap());

        let consumer = {
            let channel = Arc::clone(&channel);
            tokio::spawn(async move { channel.take().await })
        };

        tokio::task::yield_now().await;
        channel.close_for_input();

        let taken = timeout(Duration::from_secs(2), consumer)
            .await
            .expect("consumer stayed blocked after close")
            .unwrap();
        assert_eq!(taken, None);
    }
}

#[tokio::test]
async fn test_repeated_close_has_no_additional_effect() {
    let channel = BoundedChannel::new(3).unwrap();
    channel.put(1u32).await.unwrap();
    channel.put(2u32).await.unwrap();

    assert!(channel.close_for_input());
    let len_after_first = channel.len();

    for _ in 0..5 {
        assert!(!channel.close_for_input());
        assert_eq!(channel.len(), len_after_first);
        assert!(channel.is_closed());
    }

    assert_eq!(channel.take().await, Some(1));
    assert_eq!(channel.take().await, Some(2));
    assert_eq!(channel.take().await, None);
}
