//! ClaimRegistry port - ホストが持つクレームの正本（source of truth）
//!
//! # 設計原則
//! - snapshot はコピーを返す（生きたコレクションへの参照は渡さない）
//! - registry は自前のロック/トランザクションで整合性を守る
//! - このクレートが registry に書くのは delete だけ

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Claim, ClaimId, RegistryError, WorldId};

/// DeleteRequest は削除要求 1 件
///
/// 復元方法の指定はリクエストに載せる（オーナー側のフラグを前後で切り替えない）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub world_id: WorldId,
    pub claim_id: ClaimId,
    /// 削除時に schematic から範囲を復元する
    pub restore_schematic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// snapshot 後に他者が削除済み
    AlreadyAbsent,
}

#[async_trait]
pub trait ClaimRegistry: Send + Sync {
    /// アクティブなワールド一覧
    async fn list_worlds(&self) -> Result<Vec<WorldId>, RegistryError>;

    /// ワールドのクレームのある時点でのコピー
    async fn snapshot_claims(&self, world_id: WorldId) -> Result<Vec<Claim>, RegistryError>;

    /// クレームを削除（終端: 削除したクレームは以降の snapshot に現れない）
    async fn delete(&self, request: DeleteRequest) -> Result<DeleteOutcome, RegistryError>;
}
