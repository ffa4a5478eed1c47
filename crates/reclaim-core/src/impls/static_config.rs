//! StaticPolicyConfig / StaticOptionResolver - 固定値の設定
//!
//! ホストが設定をロード済みであることを前提に、値をそのまま返すだけの実装。
//! fixture（JSON）からも組み立てられる。

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Claim, OwnerId, OwnerSettings, WorldId, WorldPolicyConfig};
use crate::ports::{OptionKey, OptionResolver, PolicyConfig};

/// StaticPolicyConfig はワールド設定（フォールバック付き）とオーナー設定
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticPolicyConfig {
    /// 個別設定のないワールドに使う
    pub default_world: WorldPolicyConfig,
    pub worlds: HashMap<WorldId, WorldPolicyConfig>,
    pub owners: HashMap<OwnerId, OwnerSettings>,
}

impl StaticPolicyConfig {
    pub fn new(default_world: WorldPolicyConfig) -> Self {
        Self {
            default_world,
            ..Self::default()
        }
    }

    pub fn with_world(mut self, world_id: WorldId, config: WorldPolicyConfig) -> Self {
        self.worlds.insert(world_id, config);
        self
    }

    pub fn with_owner(mut self, owner_id: OwnerId, settings: OwnerSettings) -> Self {
        self.owners.insert(owner_id, settings);
        self
    }
}

impl PolicyConfig for StaticPolicyConfig {
    fn world_config(&self, world_id: &WorldId) -> WorldPolicyConfig {
        self.worlds.get(world_id).copied().unwrap_or(self.default_world)
    }

    fn owner_settings(&self, owner_id: &OwnerId) -> Option<OwnerSettings> {
        self.owners.get(owner_id).cloned()
    }
}

/// StaticOptionResolver はサーバー既定値 + オーナー単位の上書き
///
/// 未設定のキーは 0（= 無効）を返す。
#[derive(Debug, Clone, Default)]
pub struct StaticOptionResolver {
    defaults: HashMap<OptionKey, i64>,
    overrides: HashMap<(OwnerId, OptionKey), i64>,
}

impl StaticOptionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, key: OptionKey, value: i64) -> Self {
        self.defaults.insert(key, value);
        self
    }

    pub fn with_owner_override(mut self, owner_id: OwnerId, key: OptionKey, value: i64) -> Self {
        self.overrides.insert((owner_id, key), value);
        self
    }
}

impl OptionResolver for StaticOptionResolver {
    fn int_option(&self, owner_id: &OwnerId, _claim: &Claim, key: OptionKey) -> i64 {
        self.overrides
            .get(&(*owner_id, key))
            .or_else(|| self.defaults.get(&key))
            .copied()
            .unwrap_or(0)
    }
}
