//! Decision model: whether a claim is kept or expired.
//!
//! This module defines the Decision type (what to do with a claim) and the
//! ExpirationPolicy trait (how to decide it from the claim, its owner's
//! settings, the world's configuration and the current time).
//!
//! Policies are pure: they never delete anything. Committing a decision is the
//! job of [`crate::app::ClaimRemovalExecutor`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::claim::Claim;
use super::settings::{OwnerSettings, WorldPolicyConfig};
use crate::ports::{OptionKey, OptionResolver};

/// ExpirationReason は削除理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpirationReason {
    Inactivity,
    TaxArrears,
}

impl std::fmt::Display for ExpirationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpirationReason::Inactivity => f.write_str("inactivity"),
            ExpirationReason::TaxArrears => f.write_str("tax arrears"),
        }
    }
}

/// Decision は 1 スイープにおける 1 クレームの判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Keep,
    ExpireInactivity,
    ExpireTaxArrears,
}

impl Decision {
    /// `Keep` なら `None`
    pub fn reason(&self) -> Option<ExpirationReason> {
        match self {
            Decision::Keep => None,
            Decision::ExpireInactivity => Some(ExpirationReason::Inactivity),
            Decision::ExpireTaxArrears => Some(ExpirationReason::TaxArrears),
        }
    }
}

/// Tier は判定を下した段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Admin・期限切れ無効・オーナー設定未ロード
    Exempt,
    /// デフォルトサイズ以下の小さなクレーム（オーナー単位の閾値）
    Chest,
    /// chest tier に一致しなかったもの全て
    Basic,
}

/// Evaluation は Decision とそれを下した Tier の組
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub decision: Decision,
    pub tier: Tier,
}

impl Evaluation {
    fn exempt() -> Self {
        Self {
            decision: Decision::Keep,
            tier: Tier::Exempt,
        }
    }

    fn chest(decision: Decision) -> Self {
        Self {
            decision,
            tier: Tier::Chest,
        }
    }

    fn basic(decision: Decision) -> Self {
        Self {
            decision,
            tier: Tier::Basic,
        }
    }
}

/// ExpirationPolicy はクレームの期限切れを判定する trait
///
/// # 設計原則
/// - 純粋関数（同じ入力なら同じ結果、副作用なし）
/// - claim と設定は 1 回の呼び出しの間だけ借用する
pub trait ExpirationPolicy: Send + Sync {
    fn evaluate(
        &self,
        claim: &Claim,
        owner: Option<&OwnerSettings>,
        world: &WorldPolicyConfig,
        options: &dyn OptionResolver,
        now: DateTime<Utc>,
    ) -> Evaluation;
}

/// DefaultExpirationPolicy は chest tier / basic tier / 税滞納の判定
///
/// 判定順序:
/// 1. Admin・期限切れ無効・オーナー設定未ロード → Keep
/// 2. chest tier（面積 <= default tier area かつ chest 日数 > 0）→ ここで確定
/// 3. basic tier（Basic のみ）→ 非アクティブ or 税滞納
///
/// 比較はすべて strict（ちょうど閾値のクレームは Keep）。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExpirationPolicy;

impl DefaultExpirationPolicy {
    pub fn new() -> Self {
        Self
    }

    fn tax_arrears(
        &self,
        claim: &Claim,
        world: &WorldPolicyConfig,
        options: &dyn OptionResolver,
        now: DateTime<Utc>,
    ) -> Decision {
        if !world.tax_system_enabled || !claim.economically_expired {
            return Decision::Keep;
        }
        // 経済側のフラグと日付が食い違っている場合は「まだ期限前」扱い
        let Some(past_due_at) = claim.tax_past_due_at else {
            return Decision::Keep;
        };

        let tax_days = options.int_option(&claim.owner_id, claim, OptionKey::TaxExpiration);
        let grace_days = options.int_option(&claim.owner_id, claim, OptionKey::TaxExpirationGrace);
        let allowed = days(tax_days.saturating_add(grace_days));

        if now - past_due_at > allowed {
            Decision::ExpireTaxArrears
        } else {
            Decision::Keep
        }
    }
}

impl ExpirationPolicy for DefaultExpirationPolicy {
    fn evaluate(
        &self,
        claim: &Claim,
        owner: Option<&OwnerSettings>,
        world: &WorldPolicyConfig,
        options: &dyn OptionResolver,
        now: DateTime<Utc>,
    ) -> Evaluation {
        if claim.is_permanently_exempt() {
            return Evaluation::exempt();
        }
        let Some(owner) = owner.filter(|o| o.initialized) else {
            return Evaluation::exempt();
        };

        let idle = now - claim.last_active_at;

        // chest tier: 条件に一致したら basic tier には進まない
        let chest_days = owner.chest_claim_expiration_days;
        if claim.area <= world.default_tier_area() && chest_days > 0 {
            return if idle > days(chest_days) {
                Evaluation::chest(Decision::ExpireInactivity)
            } else {
                Evaluation::chest(Decision::Keep)
            };
        }

        if !claim.is_basic() {
            return Evaluation::basic(Decision::Keep);
        }

        let basic_days = options.int_option(&claim.owner_id, claim, OptionKey::BasicExpiration);
        if basic_days <= 0 {
            return Evaluation::basic(Decision::Keep);
        }
        if idle > days(basic_days) {
            return Evaluation::basic(Decision::ExpireInactivity);
        }

        Evaluation::basic(self.tax_arrears(claim, world, options, now))
    }
}

/// `Duration::days` は極端な値で panic するので先に clamp する
fn days(n: i64) -> Duration {
    const MAX_DAYS: i64 = 365 * 100_000;
    Duration::days(n.clamp(-MAX_DAYS, MAX_DAYS))
}
