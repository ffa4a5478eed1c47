//! PermissionCleaner port - クレームスコープの権限エントリの削除

use async_trait::async_trait;

use crate::domain::{Claim, ClaimContext, CollaboratorError};

#[async_trait]
pub trait PermissionCleaner: Send + Sync {
    /// クレームのコンテキストに紐づく権限・オプションを全て削除
    async fn clear_context(&self, ctx: &ClaimContext, claim: &Claim) -> Result<(), CollaboratorError>;
}
