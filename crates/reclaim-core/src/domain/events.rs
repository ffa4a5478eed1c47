//! Events - スイープで発生する記録
//!
//! RemovalRecord は「確定した削除 1 件につき 1 件」だけ作られます。
//! Keep や除外では作られません。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decision::ExpirationReason;
use super::ids::{ClaimId, OwnerId, SweepId, WorldId};

/// ClaimContext はスイープ中のクレーム 1 件分のコンテキスト
///
/// snapshot からクレームを取り出した時に作り、コラボレーターに渡し、
/// その反復の終わりで捨てる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimContext {
    pub sweep_id: SweepId,
    pub world_id: WorldId,
    pub claim_id: ClaimId,
}

/// RemovalRecord は確定した削除 1 件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalRecord {
    pub sweep_id: SweepId,
    pub world_id: WorldId,
    pub claim_id: ClaimId,
    pub owner_id: OwnerId,
    pub owner_display_name: String,
    pub reason: ExpirationReason,
    pub removed_at: DateTime<Utc>,
}

impl RemovalRecord {
    /// サーバーコンソール向けの 1 行メッセージ
    pub fn message(&self) -> String {
        format!(
            "Claim {} owned by {} was removed due to {}.",
            self.claim_id, self.owner_display_name, self.reason
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_owner_claim_and_reason() {
        let record = RemovalRecord {
            sweep_id: SweepId::generate(),
            world_id: WorldId::generate(),
            claim_id: ClaimId::generate(),
            owner_id: OwnerId::generate(),
            owner_display_name: "alice".to_string(),
            reason: ExpirationReason::Inactivity,
            removed_at: Utc::now(),
        };

        let message = record.message();
        assert!(message.contains("alice"));
        assert!(message.contains(&record.claim_id.to_string()));
        assert!(message.ends_with("due to inactivity."));
    }
}
