//! Settings - オーナー単位・ワールド単位・スイープ単位の設定
//!
//! 設定ファイルの読み込みはホスト側の責務です。ここでは値の形と
//! デフォルトだけを定義します（serde で fixture からも読める）。

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// OwnerSettings はオーナー単位の設定
///
/// ホストがロードを終えるまで（`initialized`）は意味を持たない。
/// 未初期化のオーナーのクレームはすべて対象外。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSettings {
    /// 削除記録に載せる表示名
    pub display_name: String,

    /// chest tier の非アクティブ日数の閾値（0 で無効）
    #[serde(default)]
    pub chest_claim_expiration_days: i64,

    #[serde(default = "default_initialized")]
    pub initialized: bool,
}

fn default_initialized() -> bool {
    true
}

impl OwnerSettings {
    pub fn new(display_name: impl Into<String>, chest_claim_expiration_days: i64) -> Self {
        Self {
            display_name: display_name.into(),
            chest_claim_expiration_days,
            initialized: true,
        }
    }

    /// ホストがまだロードを終えていない設定
    pub fn uninitialized(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            chest_claim_expiration_days: 0,
            initialized: false,
        }
    }
}

/// WorldPolicyConfig はワールド単位の設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldPolicyConfig {
    /// 自動チェストクレームの半径（-1 で chest tier を無効化）
    pub chest_claim_radius: i32,
    pub auto_nature_restore: bool,
    pub auto_schematic_restore: bool,
    pub tax_system_enabled: bool,
}

impl Default for WorldPolicyConfig {
    fn default() -> Self {
        Self {
            chest_claim_radius: 4,
            auto_nature_restore: false,
            auto_schematic_restore: false,
            tax_system_enabled: false,
        }
    }
}

impl WorldPolicyConfig {
    /// デフォルト（chest）クレームの面積: `(2r + 1)^2`、無効なら 0
    ///
    /// radius=0 は 1 ブロック、負の値は chest tier を無効化する。
    pub fn default_tier_area(&self) -> u64 {
        if self.chest_claim_radius < 0 {
            return 0;
        }
        let side = 2 * u64::from(self.chest_claim_radius.unsigned_abs()) + 1;
        side.saturating_mul(side)
    }

    /// 自然復元は schematic 復元が無効なときだけ
    pub fn wants_nature_restore(&self) -> bool {
        !self.auto_schematic_restore && self.auto_nature_restore
    }
}

/// ChestTierMatch は chest tier の条件に一致した後のスイープの振る舞い
///
/// 旧来のクリーンアップタスクは、削除の有無にかかわらず最初の一致でループを
/// 抜けていた。`Continue` が修正後の振る舞いで、残り 2 つはその打ち切りを
/// ワールド単位・スイープ単位で再現する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChestTierMatch {
    #[default]
    Continue,
    /// 現在のワールドの残りのクレームを飛ばす
    StopWorld,
    /// 現在のスイープの残りのクレームとワールドを飛ばす
    StopSweep,
}

/// SweepConfig はスケジューラの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub period_secs: u64,
    pub chest_tier_match: ChestTierMatch,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            period_secs: 60 * 60,
            chest_tier_match: ChestTierMatch::Continue,
        }
    }
}

impl SweepConfig {
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::disabled(-1, 0)]
    #[case::single_block(0, 1)]
    #[case::radius_one(1, 9)]
    #[case::radius_four(4, 81)]
    fn default_tier_area_follows_radius(#[case] radius: i32, #[case] expected: u64) {
        let config = WorldPolicyConfig {
            chest_claim_radius: radius,
            ..WorldPolicyConfig::default()
        };
        assert_eq!(config.default_tier_area(), expected);
    }

    #[test]
    fn nature_restore_yields_to_schematic_restore() {
        let mut config = WorldPolicyConfig {
            auto_nature_restore: true,
            ..WorldPolicyConfig::default()
        };
        assert!(config.wants_nature_restore());

        config.auto_schematic_restore = true;
        assert!(!config.wants_nature_restore());
    }

    #[test]
    fn sweep_config_without_fields_then_get_defaults() {
        let config: SweepConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config.period(), Duration::from_secs(3600));
        assert_eq!(config.chest_tier_match, ChestTierMatch::Continue);

        let config: SweepConfig =
            serde_json::from_str(r#"{ "chest_tier_match": "stop_world" }"#).expect("deserialize");
        assert_eq!(config.chest_tier_match, ChestTierMatch::StopWorld);
    }

    #[test]
    fn owner_settings_default_to_initialized() {
        let settings: OwnerSettings =
            serde_json::from_str(r#"{ "display_name": "alice" }"#).expect("deserialize");
        assert!(settings.initialized);
        assert_eq!(settings.chest_claim_expiration_days, 0);
    }
}
