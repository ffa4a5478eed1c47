//! Claim model: the spatial ownership region the sweep reasons about.
//!
//! Claims are owned by the host's claim subsystem. This crate only ever sees
//! point-in-time copies (snapshots) and never mutates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ClaimId, OwnerId};

/// ClaimKind はクレームの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    /// サーバー管理のクレーム（常に期限切れ対象外）
    Admin,
    /// プレイヤーが明示的に作ったクレーム
    Basic,
    /// 他のクレームの内側にある子クレーム
    Subdivision,
}

/// Claim はクレーム 1 件の snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub owner_id: OwnerId,

    /// ブロック数（または同等の単位）。実在するクレームでは常に正
    pub area: u64,

    pub kind: ClaimKind,

    #[serde(default = "default_allow_expiration")]
    pub allow_expiration: bool,

    pub last_active_at: DateTime<Utc>,

    /// 税が未払いのとき経済サブシステムが立てる
    #[serde(default)]
    pub economically_expired: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_past_due_at: Option<DateTime<Utc>>,
}

fn default_allow_expiration() -> bool {
    true
}

impl Claim {
    /// 期限切れ対象・税滞納なしのクレームを作成
    pub fn new(
        id: ClaimId,
        owner_id: OwnerId,
        kind: ClaimKind,
        area: u64,
        last_active_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            area,
            kind,
            allow_expiration: true,
            last_active_at,
            economically_expired: false,
            tax_past_due_at: None,
        }
    }

    pub fn with_allow_expiration(mut self, allow: bool) -> Self {
        self.allow_expiration = allow;
        self
    }

    /// 税滞納（economically expired）として期日を設定
    pub fn with_tax_arrears(mut self, past_due_at: Option<DateTime<Utc>>) -> Self {
        self.economically_expired = true;
        self.tax_past_due_at = past_due_at;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.kind == ClaimKind::Admin
    }

    pub fn is_basic(&self) -> bool {
        self.kind == ClaimKind::Basic
    }

    /// Admin と期限切れ無効のクレームは一切触らない
    pub fn is_permanently_exempt(&self) -> bool {
        self.is_admin() || !self.allow_expiration
    }
}
