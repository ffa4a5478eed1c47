//! SweepScheduler - 期限切れクレームの定期回収
//!
//! # フロー（1 回のスイープ）
//! 1. ClaimRegistry::list_worlds() でワールドを列挙
//! 2. ワールドごとに snapshot を取る（空ならスキップ）
//! 3. クレームごとにオーナー設定を解決 → ExpirationPolicy で判定
//! 4. Keep 以外なら ClaimRemovalExecutor に渡す
//!
//! # エラーの扱い
//! - 1 クレームの失敗は次のクレームに進む
//! - snapshot の失敗はそのワールドだけを飛ばす
//! - list_worlds の失敗だけがスイープ全体を失敗させる
//!
//! # 停止
//! shutdown はクレームの合間で確認する。処理中のクレームは最後まで
//! 処理してから止まる（各削除は独立して確定しているので途中停止は安全）。

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::Instrument;

use super::executor::{ClaimRemovalExecutor, RemovalResult};
use super::status::SweepReport;
use crate::domain::{
    ChestTierMatch, Claim, ClaimContext, ExpirationPolicy, ReclaimError, SweepConfig, SweepId, Tier,
    WorldId, WorldPolicyConfig,
};
use crate::ports::{ClaimRegistry, Clock, IdGenerator, OptionResolver, PolicyConfig};

/// Flow は 1 クレーム（または 1 ワールド）処理後の進み先
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    StopWorld,
    StopSweep,
}

/// SweepScheduler は定期スイープの駆動役
///
/// スイープは直列に実行し、ワールドもクレームも順番に処理する。
pub struct SweepScheduler {
    registry: Arc<dyn ClaimRegistry>,
    config: Arc<dyn PolicyConfig>,
    options: Arc<dyn OptionResolver>,
    policy: Arc<dyn ExpirationPolicy>,
    executor: ClaimRemovalExecutor,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    sweep_config: SweepConfig,
}

impl SweepScheduler {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        registry: Arc<dyn ClaimRegistry>,
        config: Arc<dyn PolicyConfig>,
        options: Arc<dyn OptionResolver>,
        policy: Arc<dyn ExpirationPolicy>,
        executor: ClaimRemovalExecutor,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        sweep_config: SweepConfig,
    ) -> Self {
        Self {
            registry,
            config,
            options,
            policy,
            executor,
            clock,
            ids,
            sweep_config,
        }
    }

    pub fn sweep_config(&self) -> &SweepConfig {
        &self.sweep_config
    }

    /// スイープを 1 回、最後まで実行
    pub async fn sweep_once(&self) -> Result<SweepReport, ReclaimError> {
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);
        self.sweep(&shutdown_rx).await
    }

    /// スイープを 1 回実行（`shutdown` が立ったらクレームの合間で止まる）
    pub async fn sweep(&self, shutdown: &watch::Receiver<bool>) -> Result<SweepReport, ReclaimError> {
        let sweep_id = self.ids.generate_sweep_id();
        let mut report = SweepReport::new(sweep_id, self.clock.now());

        let worlds = self.registry.list_worlds().await?;
        for world_id in worlds {
            if *shutdown.borrow() {
                report.interrupted = true;
                break;
            }
            let flow = self
                .sweep_world(sweep_id, world_id, shutdown, &mut report)
                .instrument(tracing::debug_span!("world", %sweep_id, %world_id))
                .await;
            if flow == Flow::StopSweep {
                break;
            }
        }

        tracing::info!(
            %sweep_id,
            worlds = report.worlds_visited,
            removed_inactivity = report.removed_inactivity,
            removed_tax_arrears = report.removed_tax_arrears,
            delete_failures = report.delete_failures,
            interrupted = report.interrupted,
            "claim sweep finished"
        );
        Ok(report)
    }

    async fn sweep_world(
        &self,
        sweep_id: SweepId,
        world_id: WorldId,
        shutdown: &watch::Receiver<bool>,
        report: &mut SweepReport,
    ) -> Flow {
        // snapshot はコピー: 削除しても反復は壊れない
        let claims = match self.registry.snapshot_claims(world_id).await {
            Ok(claims) => claims,
            Err(err) => {
                tracing::warn!(error = %err, kind = ?err.kind(), "skipping world: snapshot unavailable");
                report.worlds_failed += 1;
                return Flow::Next;
            }
        };
        if claims.is_empty() {
            report.worlds_skipped += 1;
            return Flow::Next;
        }
        report.worlds_visited += 1;

        let world = self.config.world_config(&world_id);
        for claim in &claims {
            if *shutdown.borrow() {
                report.interrupted = true;
                return Flow::StopSweep;
            }

            let ctx = ClaimContext {
                sweep_id,
                world_id,
                claim_id: claim.id,
            };
            let flow = self
                .process_claim(&ctx, claim, &world, report)
                .instrument(tracing::debug_span!("claim", claim_id = %claim.id))
                .await;
            match flow {
                Flow::Next => {}
                Flow::StopWorld => return Flow::Next,
                Flow::StopSweep => return Flow::StopSweep,
            }
        }
        Flow::Next
    }

    async fn process_claim(
        &self,
        ctx: &ClaimContext,
        claim: &Claim,
        world: &WorldPolicyConfig,
        report: &mut SweepReport,
    ) -> Flow {
        let Some(owner) = self
            .config
            .owner_settings(&claim.owner_id)
            .filter(|owner| owner.initialized)
        else {
            tracing::debug!(owner_id = %claim.owner_id, "owner settings not loaded");
            report.claims_exempt += 1;
            return Flow::Next;
        };

        let evaluation = self.policy.evaluate(
            claim,
            Some(&owner),
            world,
            self.options.as_ref(),
            self.clock.now(),
        );
        if evaluation.tier == Tier::Exempt {
            report.claims_exempt += 1;
            return Flow::Next;
        }

        match self
            .executor
            .execute(ctx, claim, &owner, world, evaluation.decision)
            .await
        {
            RemovalResult::NotExpired => {
                tracing::debug!(tier = ?evaluation.tier, "claim kept");
                report.claims_kept += 1;
            }
            RemovalResult::Removed { reason, .. } => report.record_removal(reason),
            RemovalResult::AlreadyAbsent => report.already_absent += 1,
            RemovalResult::Failed(_) => report.delete_failures += 1,
        }

        if evaluation.tier != Tier::Chest {
            return Flow::Next;
        }
        match self.sweep_config.chest_tier_match {
            ChestTierMatch::Continue => Flow::Next,
            ChestTierMatch::StopWorld => {
                report.chest_tier_stops += 1;
                Flow::StopWorld
            }
            ChestTierMatch::StopSweep => {
                report.chest_tier_stops += 1;
                Flow::StopSweep
            }
        }
    }

    /// `sweep_config.period()` ごとにバックグラウンドタスクでスイープを実行
    ///
    /// 最初のスイープは即時。周期を超えたスイープは次の tick を遅らせる
    /// （スイープは重ならない）。
    pub fn spawn(self: Arc<Self>) -> SweepHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (report_tx, report_rx) = watch::channel(None);
        let period = self.sweep_config.period();

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                        continue;
                    }
                    _ = ticker.tick() => {}
                }

                match self.sweep(&shutdown_rx).await {
                    Ok(report) => {
                        let interrupted = report.interrupted;
                        // receivers may already be dropped
                        let _ = report_tx.send(Some(report));
                        if interrupted {
                            break;
                        }
                    }
                    Err(err) => tracing::warn!(error = %err, kind = ?err.kind(), "claim sweep failed"),
                }
            }
            tracing::info!("claim sweep scheduler stopped");
        });

        SweepHandle {
            shutdown_tx,
            reports: report_rx,
            join,
        }
    }
}

/// SweepHandle は spawn したスケジューラのハンドル
/// - `request_shutdown()` で停止を要求（処理中のクレームは完了させる）
/// - `shutdown_and_join()` で停止を待つ
pub struct SweepHandle {
    shutdown_tx: watch::Sender<bool>,
    reports: watch::Receiver<Option<SweepReport>>,
    join: JoinHandle<()>,
}

impl SweepHandle {
    /// 直近に完了したスイープのレポート
    pub fn reports(&self) -> watch::Receiver<Option<SweepReport>> {
        self.reports.clone()
    }

    pub fn request_shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }

    pub async fn shutdown_and_join(self) -> Result<(), ReclaimError> {
        self.request_shutdown();
        self.join.await.map_err(|_| ReclaimError::SchedulerStopped)
    }
}
