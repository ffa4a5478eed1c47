//! OptionResolver port - 権限スコープ付きの整数オプション

use serde::{Deserialize, Serialize};

use crate::domain::{Claim, OwnerId};

/// OptionKey は期限切れ判定が読むオプション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKey {
    /// basic クレームの非アクティブ日数の閾値（`<= 0` で無効）
    #[serde(rename = "expiration")]
    BasicExpiration,
    /// 税滞納から期限切れまでの日数
    #[serde(rename = "tax-expiration")]
    TaxExpiration,
    /// 税の期限後に猶予する日数
    #[serde(rename = "tax-expiration-days-keep")]
    TaxExpirationGrace,
}

impl OptionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::BasicExpiration => "expiration",
            OptionKey::TaxExpiration => "tax-expiration",
            OptionKey::TaxExpirationGrace => "tax-expiration-days-keep",
        }
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OptionResolver はクレームの文脈でオーナーの整数オプションを解決
///
/// 解決順序（ユーザー > グループ > サーバー既定）はホスト側の実装に任せる。
pub trait OptionResolver: Send + Sync {
    fn int_option(&self, owner_id: &OwnerId, claim: &Claim, key: OptionKey) -> i64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_keys_have_stable_names() {
        assert_eq!(OptionKey::BasicExpiration.to_string(), "expiration");
        assert_eq!(OptionKey::TaxExpiration.as_str(), "tax-expiration");
        assert_eq!(
            serde_json::to_string(&OptionKey::TaxExpirationGrace).unwrap(),
            "\"tax-expiration-days-keep\""
        );
    }
}
