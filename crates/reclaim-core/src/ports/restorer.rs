//! Restorer port - 地形の復元（ベストエフォート）
//!
//! 失敗しても削除は取り消さない。

use async_trait::async_trait;

use crate::domain::{Claim, ClaimContext, CollaboratorError};

#[async_trait]
pub trait Restorer: Send + Sync {
    /// クレーム範囲の自然地形を復元
    async fn restore(&self, ctx: &ClaimContext, claim: &Claim) -> Result<(), CollaboratorError>;
}
