//! ClaimRemovalExecutor - 期限切れ判定の確定（削除と後始末）
//!
//! # フロー
//! 1. DeleteRequest を組み立てる（schematic 復元の指定はリクエストに載せる）
//! 2. ClaimRegistry::delete()（ここが point of no return）
//! 3. RemovalRecord を Notifier へ（削除 1 件につき 1 回だけ）
//! 4. 自然復元（schematic 復元が無効で、自然復元が有効な場合のみ）
//! 5. クレームスコープの権限を削除
//!
//! delete が失敗したら 3〜5 は実行しない。クレームは残り、次回スイープで
//! 再評価される。4・5 の失敗は削除を巻き戻さない（warn を出すだけ）。

use std::sync::Arc;

use crate::domain::{
    Claim, ClaimContext, Decision, ExpirationReason, OwnerSettings, RegistryError, RemovalRecord,
    WorldPolicyConfig,
};
use crate::ports::{
    ClaimRegistry, Clock, DeleteOutcome, DeleteRequest, Notifier, PermissionCleaner, Restorer,
};

/// CleanupStatus はベストエフォートな後始末 1 ステップの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStatus {
    Done,
    Skipped,
    Failed(String),
}

/// RemovalResult は executor に渡したクレーム 1 件の結末
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalResult {
    /// 判定が `Keep`（何も触らない）
    NotExpired,
    Removed {
        reason: ExpirationReason,
        restore: CleanupStatus,
        permissions: CleanupStatus,
    },
    /// 削除前に他者が消していた
    AlreadyAbsent,
    /// registry が削除を拒否（クレームは残る）
    Failed(RegistryError),
}

/// ClaimRemovalExecutor は registry に書き込む唯一のコンポーネント
pub struct ClaimRemovalExecutor {
    registry: Arc<dyn ClaimRegistry>,
    restorer: Arc<dyn Restorer>,
    permissions: Arc<dyn PermissionCleaner>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
}

impl ClaimRemovalExecutor {
    pub fn new(
        registry: Arc<dyn ClaimRegistry>,
        restorer: Arc<dyn Restorer>,
        permissions: Arc<dyn PermissionCleaner>,
        notifier: Arc<dyn Notifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            restorer,
            permissions,
            notifier,
            clock,
        }
    }

    /// `claim` に対する `decision` を確定
    pub async fn execute(
        &self,
        ctx: &ClaimContext,
        claim: &Claim,
        owner: &OwnerSettings,
        world: &WorldPolicyConfig,
        decision: Decision,
    ) -> RemovalResult {
        let Some(reason) = decision.reason() else {
            return RemovalResult::NotExpired;
        };

        let request = DeleteRequest {
            world_id: ctx.world_id,
            claim_id: claim.id,
            restore_schematic: world.auto_schematic_restore,
        };
        match self.registry.delete(request).await {
            Ok(DeleteOutcome::Deleted) => {}
            Ok(DeleteOutcome::AlreadyAbsent) => {
                tracing::debug!(claim_id = %claim.id, "claim already removed by another actor");
                return RemovalResult::AlreadyAbsent;
            }
            Err(err) => {
                tracing::warn!(claim_id = %claim.id, error = %err, kind = ?err.kind(), "claim deletion failed; will retry next sweep");
                return RemovalResult::Failed(err);
            }
        }

        self.notifier.record(&RemovalRecord {
            sweep_id: ctx.sweep_id,
            world_id: ctx.world_id,
            claim_id: claim.id,
            owner_id: claim.owner_id,
            owner_display_name: owner.display_name.clone(),
            reason,
            removed_at: self.clock.now(),
        });

        let restore = if world.wants_nature_restore() {
            match self.restorer.restore(ctx, claim).await {
                Ok(()) => CleanupStatus::Done,
                Err(err) => {
                    tracing::warn!(claim_id = %claim.id, error = %err, "nature restoration failed");
                    CleanupStatus::Failed(err.to_string())
                }
            }
        } else {
            CleanupStatus::Skipped
        };

        let permissions = match self.permissions.clear_context(ctx, claim).await {
            Ok(()) => CleanupStatus::Done,
            Err(err) => {
                tracing::warn!(claim_id = %claim.id, error = %err, "permission cleanup failed");
                CleanupStatus::Failed(err.to_string())
            }
        };

        RemovalResult::Removed {
            reason,
            restore,
            permissions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClaimId, ClaimKind, OwnerId, SweepId, WorldId};
    use crate::impls::{InMemoryClaimRegistry, RecordingCollaborator, RecordingNotifier};
    use crate::ports::FixedClock;
    use chrono::{TimeZone, Utc};

    struct Fixture {
        registry: Arc<InMemoryClaimRegistry>,
        restorer: Arc<RecordingCollaborator>,
        permissions: Arc<RecordingCollaborator>,
        notifier: Arc<RecordingNotifier>,
        executor: ClaimRemovalExecutor,
        ctx: ClaimContext,
        claim: Claim,
        owner: OwnerSettings,
    }

    async fn fixture(restorer: RecordingCollaborator, permissions: RecordingCollaborator) -> Fixture {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let registry = Arc::new(InMemoryClaimRegistry::new());
        let restorer = Arc::new(restorer);
        let permissions = Arc::new(permissions);
        let notifier = Arc::new(RecordingNotifier::new());
        let executor = ClaimRemovalExecutor::new(
            registry.clone(),
            restorer.clone(),
            permissions.clone(),
            notifier.clone(),
            Arc::new(FixedClock::new(now)),
        );

        let world_id = WorldId::generate();
        let claim = Claim::new(ClaimId::generate(), OwnerId::generate(), ClaimKind::Basic, 9, now);
        registry.insert(world_id, claim.clone()).await;

        Fixture {
            registry,
            restorer,
            permissions,
            notifier,
            executor,
            ctx: ClaimContext {
                sweep_id: SweepId::generate(),
                world_id,
                claim_id: claim.id,
            },
            claim,
            owner: OwnerSettings::new("alice", 30),
        }
    }

    fn nature_world() -> WorldPolicyConfig {
        WorldPolicyConfig {
            auto_nature_restore: true,
            ..WorldPolicyConfig::default()
        }
    }

    #[tokio::test]
    async fn removal_deletes_records_restores_and_clears() {
        let f = fixture(RecordingCollaborator::new(), RecordingCollaborator::new()).await;

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &nature_world(), Decision::ExpireInactivity)
            .await;

        assert_eq!(
            result,
            RemovalResult::Removed {
                reason: ExpirationReason::Inactivity,
                restore: CleanupStatus::Done,
                permissions: CleanupStatus::Done,
            }
        );
        assert!(!f.registry.contains(f.ctx.world_id, f.claim.id).await);

        let records = f.notifier.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].owner_display_name, "alice");
        assert_eq!(records[0].claim_id, f.claim.id);
        assert_eq!(records[0].reason, ExpirationReason::Inactivity);

        assert_eq!(f.restorer.calls(), vec![f.claim.id]);
        assert_eq!(f.permissions.calls(), vec![f.claim.id]);
    }

    #[tokio::test]
    async fn schematic_restore_is_passed_with_the_request_and_skips_nature_restore() {
        let f = fixture(RecordingCollaborator::new(), RecordingCollaborator::new()).await;
        let world = WorldPolicyConfig {
            auto_schematic_restore: true,
            ..nature_world()
        };

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &world, Decision::ExpireTaxArrears)
            .await;

        assert!(matches!(
            result,
            RemovalResult::Removed { reason: ExpirationReason::TaxArrears, restore: CleanupStatus::Skipped, .. }
        ));
        let requests = f.registry.delete_requests().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].restore_schematic);
        assert!(f.restorer.calls().is_empty());
        // record は restore を飛ばしても出る
        assert_eq!(f.notifier.records().len(), 1);
    }

    #[tokio::test]
    async fn failed_deletion_has_no_side_effects() {
        let f = fixture(RecordingCollaborator::new(), RecordingCollaborator::new()).await;
        f.registry.fail_next_deletes(1).await;

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &nature_world(), Decision::ExpireInactivity)
            .await;

        assert!(matches!(result, RemovalResult::Failed(RegistryError::DeleteRejected { .. })));
        assert!(f.registry.contains(f.ctx.world_id, f.claim.id).await);
        assert!(f.notifier.records().is_empty());
        assert!(f.restorer.calls().is_empty());
        assert!(f.permissions.calls().is_empty());
    }

    #[tokio::test]
    async fn already_absent_claim_is_not_recorded() {
        let f = fixture(RecordingCollaborator::new(), RecordingCollaborator::new()).await;
        f.registry.remove_externally(f.ctx.world_id, f.claim.id).await;

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &nature_world(), Decision::ExpireInactivity)
            .await;

        assert_eq!(result, RemovalResult::AlreadyAbsent);
        assert!(f.notifier.records().is_empty());
        assert!(f.permissions.calls().is_empty());
    }

    #[tokio::test]
    async fn cleanup_failures_do_not_undo_the_deletion() {
        let f = fixture(RecordingCollaborator::failing(), RecordingCollaborator::failing()).await;

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &nature_world(), Decision::ExpireInactivity)
            .await;

        let RemovalResult::Removed { restore, permissions, .. } = result else {
            panic!("expected removal, got {result:?}");
        };
        assert!(matches!(restore, CleanupStatus::Failed(_)));
        assert!(matches!(permissions, CleanupStatus::Failed(_)));
        assert!(!f.registry.contains(f.ctx.world_id, f.claim.id).await);
        assert_eq!(f.notifier.records().len(), 1);
    }

    #[tokio::test]
    async fn keep_decision_touches_nothing() {
        let f = fixture(RecordingCollaborator::new(), RecordingCollaborator::new()).await;

        let result = f
            .executor
            .execute(&f.ctx, &f.claim, &f.owner, &nature_world(), Decision::Keep)
            .await;

        assert_eq!(result, RemovalResult::NotExpired);
        assert!(f.registry.delete_requests().await.is_empty());
        assert!(f.notifier.records().is_empty());
    }
}
