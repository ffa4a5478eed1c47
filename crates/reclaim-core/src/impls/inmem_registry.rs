//! InMemoryClaimRegistry - 開発・テスト用のクレームストア
//!
//! # 学習ポイント
//! - tokio::sync::Mutex でワールドごとのクレームを保持
//! - snapshot は clone を返す（ロックはメソッド内で完結、await を跨がない）
//! - 失敗注入（delete / snapshot）でエラー経路をテストできる

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Claim, ClaimId, RegistryError, WorldId};
use crate::ports::{ClaimRegistry, DeleteOutcome, DeleteRequest};

#[derive(Default)]
struct RegistryState {
    /// world -> claim_id -> claim（BTreeMap なので snapshot の順序は ULID 順）
    worlds: BTreeMap<WorldId, BTreeMap<ClaimId, Claim>>,
    /// 受け付けた delete 要求（失敗したものも含む）
    delete_log: Vec<DeleteRequest>,
    /// 次の N 件の delete を拒否する
    failing_deletes: usize,
    /// snapshot が失敗するワールド
    broken_worlds: HashSet<WorldId>,
    /// ストレージ全体が落ちている（list_worlds が失敗する）
    unavailable: bool,
}

/// InMemoryClaimRegistry は開発用のクレームストア
///
/// # 使用例
/// ```ignore
/// let registry = InMemoryClaimRegistry::new();
/// registry.insert(world_id, claim).await;
/// let snapshot = registry.snapshot_claims(world_id).await?;
/// ```
#[derive(Default)]
pub struct InMemoryClaimRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// クレームなしでワールドを登録
    pub async fn add_world(&self, world_id: WorldId) {
        self.state.lock().await.worlds.entry(world_id).or_default();
    }

    pub async fn insert(&self, world_id: WorldId, claim: Claim) {
        let mut state = self.state.lock().await;
        state.worlds.entry(world_id).or_default().insert(claim.id, claim);
    }

    pub async fn contains(&self, world_id: WorldId, claim_id: ClaimId) -> bool {
        let state = self.state.lock().await;
        state
            .worlds
            .get(&world_id)
            .is_some_and(|claims| claims.contains_key(&claim_id))
    }

    pub async fn claim_count(&self, world_id: WorldId) -> usize {
        let state = self.state.lock().await;
        state.worlds.get(&world_id).map_or(0, BTreeMap::len)
    }

    /// スイープの外から削除（別のアクターを模擬）
    pub async fn remove_externally(&self, world_id: WorldId, claim_id: ClaimId) -> Option<Claim> {
        let mut state = self.state.lock().await;
        state.worlds.get_mut(&world_id)?.remove(&claim_id)
    }

    /// 次の `n` 件の delete を拒否
    pub async fn fail_next_deletes(&self, n: usize) {
        self.state.lock().await.failing_deletes = n;
    }

    /// `world_id` の snapshot を常に失敗させる
    pub async fn break_world(&self, world_id: WorldId) {
        self.state.lock().await.broken_worlds.insert(world_id);
    }

    /// ストレージ全体の障害を模擬
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
    }

    pub async fn delete_requests(&self) -> Vec<DeleteRequest> {
        self.state.lock().await.delete_log.clone()
    }
}

#[async_trait]
impl ClaimRegistry for InMemoryClaimRegistry {
    async fn list_worlds(&self) -> Result<Vec<WorldId>, RegistryError> {
        let state = self.state.lock().await;
        if state.unavailable {
            return Err(RegistryError::Unavailable("claim storage offline".to_string()));
        }
        Ok(state.worlds.keys().copied().collect())
    }

    async fn snapshot_claims(&self, world_id: WorldId) -> Result<Vec<Claim>, RegistryError> {
        let state = self.state.lock().await;
        if state.broken_worlds.contains(&world_id) {
            return Err(RegistryError::SnapshotUnavailable {
                world_id,
                message: "world storage not loaded".to_string(),
            });
        }
        Ok(state
            .worlds
            .get(&world_id)
            .map(|claims| claims.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn delete(&self, request: DeleteRequest) -> Result<DeleteOutcome, RegistryError> {
        let mut state = self.state.lock().await;
        state.delete_log.push(request);

        if state.failing_deletes > 0 {
            state.failing_deletes -= 1;
            return Err(RegistryError::DeleteRejected {
                claim_id: request.claim_id,
                message: "claim is locked".to_string(),
            });
        }

        let removed = state
            .worlds
            .get_mut(&request.world_id)
            .and_then(|claims| claims.remove(&request.claim_id));
        match removed {
            Some(_) => Ok(DeleteOutcome::Deleted),
            None => Ok(DeleteOutcome::AlreadyAbsent),
        }
    }
}
