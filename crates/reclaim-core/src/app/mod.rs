//! App - アプリケーション層
//!
//! このモジュールは、ports を組み合わせてスイープを実装します。
//!
//! # 主要コンポーネント
//! - **SweepBuilder**: スケジューラの構築とワイヤリング
//! - **ClaimRemovalExecutor**: 削除の確定（delete→record→restore→permissions）
//! - **SweepScheduler**: 定期スイープ（worlds→snapshot→evaluate→execute）
//! - **SweepReport**: スイープ 1 回分の集計

pub mod builder;
pub mod executor;
pub mod status;
pub mod sweep_loop;

// 主要な型を再エクスポート
pub use self::builder::{BuildError, SweepBuilder};
pub use self::executor::{CleanupStatus, ClaimRemovalExecutor, RemovalResult};
pub use self::status::SweepReport;
pub use self::sweep_loop::{SweepHandle, SweepScheduler};
