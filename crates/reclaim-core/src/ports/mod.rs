//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! 各 trait はホストアプリケーション側のサブシステム（クレームストレージ、
//! 権限、地形復元、ログ）へのインターフェースです。
//!
//! # 同期 / 非同期
//! - 参照系（PolicyConfig, OptionResolver, Clock）と Notifier は同期
//! - 書き込み・重い処理（ClaimRegistry, Restorer, PermissionCleaner）は async

pub mod claim_registry;
pub mod clock;
pub mod id_generator;
pub mod notifier;
pub mod option_resolver;
pub mod permission_cleaner;
pub mod policy_config;
pub mod restorer;

// 主要な trait を再エクスポート
pub use self::claim_registry::{ClaimRegistry, DeleteOutcome, DeleteRequest};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::notifier::Notifier;
pub use self::option_resolver::{OptionKey, OptionResolver};
pub use self::permission_cleaner::PermissionCleaner;
pub use self::policy_config::PolicyConfig;
pub use self::restorer::Restorer;
