//! Status - スイープ 1 回分の集計

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ExpirationReason, SweepId};

/// SweepReport はスイープ 1 回分のカウンタ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    pub sweep_id: SweepId,
    pub started_at: DateTime<Utc>,

    pub worlds_visited: usize,
    /// snapshot が空だったワールド
    pub worlds_skipped: usize,
    /// snapshot を取れなかったワールド
    pub worlds_failed: usize,

    /// Admin・期限切れ無効・オーナー設定未ロード
    pub claims_exempt: usize,
    pub claims_kept: usize,
    pub removed_inactivity: usize,
    pub removed_tax_arrears: usize,
    pub already_absent: usize,
    pub delete_failures: usize,

    /// chest tier 一致後の打ち切り回数
    pub chest_tier_stops: usize,
    /// shutdown 要求で途中停止した
    pub interrupted: bool,
}

impl SweepReport {
    pub fn new(sweep_id: SweepId, started_at: DateTime<Utc>) -> Self {
        Self {
            sweep_id,
            started_at,
            worlds_visited: 0,
            worlds_skipped: 0,
            worlds_failed: 0,
            claims_exempt: 0,
            claims_kept: 0,
            removed_inactivity: 0,
            removed_tax_arrears: 0,
            already_absent: 0,
            delete_failures: 0,
            chest_tier_stops: 0,
            interrupted: false,
        }
    }

    pub fn record_removal(&mut self, reason: ExpirationReason) {
        match reason {
            ExpirationReason::Inactivity => self.removed_inactivity += 1,
            ExpirationReason::TaxArrears => self.removed_tax_arrears += 1,
        }
    }

    pub fn removed(&self) -> usize {
        self.removed_inactivity + self.removed_tax_arrears
    }
}
