//! PolicyConfig port - ワールド設定とオーナー設定の参照

use crate::domain::{OwnerId, OwnerSettings, WorldId, WorldPolicyConfig};

/// PolicyConfig はホストがロード済みの設定を返すだけ（読み込みはホストの責務）
pub trait PolicyConfig: Send + Sync {
    fn world_config(&self, world_id: &WorldId) -> WorldPolicyConfig;

    /// `None`（または未初期化）は正常な状態でありエラーではない
    fn owner_settings(&self, owner_id: &OwnerId) -> Option<OwnerSettings>;
}
