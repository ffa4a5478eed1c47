//! Notifier port - 削除記録の出力
//!
//! 削除と同期して呼ばれる（ログの順序を削除の順序と一致させるため、async にしない）。
//!
//! # 実装
//! - TracingNotifier: tracing の info! に構造化フィールドとして出す
//! - RecordingNotifier: テスト用にメモリへ貯める

use crate::domain::RemovalRecord;

pub trait Notifier: Send + Sync {
    fn record(&self, record: &RemovalRecord);
}
