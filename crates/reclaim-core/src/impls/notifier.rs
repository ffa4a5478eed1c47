//! Notifier 実装
//!
//! - TracingNotifier: 本番用。1 件の削除につき info! を 1 回
//! - RecordingNotifier: テスト用。記録をメモリに貯める

use std::sync::Mutex;

use crate::domain::RemovalRecord;
use crate::ports::Notifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn record(&self, record: &RemovalRecord) {
        tracing::info!(
            sweep_id = %record.sweep_id,
            world_id = %record.world_id,
            claim_id = %record.claim_id,
            owner_id = %record.owner_id,
            owner = %record.owner_display_name,
            reason = %record.reason,
            "{}",
            record.message()
        );
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    records: Mutex<Vec<RemovalRecord>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<RemovalRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn record(&self, record: &RemovalRecord) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record.clone());
    }
}
