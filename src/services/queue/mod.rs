// キュー機能
// 作業プールとProducer/Consumer間の容量制限付きチャンネル

pub mod bounded;
pub mod work_source;

// 公開API
pub use bounded::BoundedChannel;
pub use work_source::WorkSource;
