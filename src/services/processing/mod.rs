// 処理シミュレーション機能
// 画像処理とDB保存を、ばらつきのある待ち時間で模擬する

pub mod latency;
pub mod worker;

// 公開API
pub use latency::LatencyModel;
pub use worker::{process_photo, save_photo};
