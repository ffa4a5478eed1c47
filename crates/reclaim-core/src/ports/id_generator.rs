//! IdGenerator port - ID 生成の抽象化
//!
//! スイープごとに SweepId を 1 つ発行し、そのスイープの全ログに載せます。
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use ulid::Ulid;

use crate::domain::SweepId;
use crate::ports::Clock;

/// IdGenerator はスイープ ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（スケジューラのタスクから使う）
pub trait IdGenerator: Send + Sync {
    fn generate_sweep_id(&self) -> SweepId;
}

/// UlidGenerator は Clock の時刻をタイムスタンプ部に使う ULID 生成器
///
/// FixedClock を渡せば、タイムスタンプ部分が決定的になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_sweep_id(&self) -> SweepId {
        let timestamp_ms = self.clock.now().timestamp_millis().max(0) as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        SweepId::from(ulid)
    }
}
