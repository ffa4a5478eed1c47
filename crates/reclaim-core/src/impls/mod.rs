//! Impls - ports の実装
//!
//! 開発・テスト・CLI デモ用。本番ではホストアプリケーションが
//! 自前の ClaimRegistry などを実装して差し込む。

pub mod cleanup;
pub mod inmem_registry;
pub mod notifier;
pub mod static_config;

pub use self::cleanup::{NoopPermissionCleaner, NoopRestorer, RecordingCollaborator};
pub use self::inmem_registry::InMemoryClaimRegistry;
pub use self::notifier::{RecordingNotifier, TracingNotifier};
pub use self::static_config::{StaticOptionResolver, StaticPolicyConfig};
