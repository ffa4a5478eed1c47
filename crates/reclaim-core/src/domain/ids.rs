//! Domain identifiers (strongly-typed IDs).
//!
//! # ULID ベースの ID + Phantom type
//! Claim / Owner / World / Sweep はすべて ULID で識別します。
//! `Id<T>` というジェネリック型で共通実装を提供し、`T` はコンパイル時の
//! 型安全性のためだけのマーカー型（PhantomData）です。
//!
//! ClaimId と OwnerId を取り違えて registry に渡す、といったミスは
//! コンパイルエラーになります。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use ulid::Ulid;

/// IdMarker は各 ID 型のマーカー trait
///
/// Display で使うプレフィックス（"claim-", "owner-" など）を提供します。
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// ジェネリック ID 型
///
/// # 例
/// ```ignore
/// let claim_id: ClaimId = Id::from(Ulid::new());
/// let owner_id: OwnerId = Id::from(Ulid::new());
/// // claim_id と owner_id は異なる型なので、混同できない
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    ulid: Ulid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self {
            ulid,
            _marker: PhantomData,
        }
    }

    /// 新しいランダムな ID（fixture・テスト用）
    pub fn generate() -> Self {
        Self::from_ulid(Ulid::new())
    }

    pub fn as_ulid(&self) -> Ulid {
        self.ulid
    }
}

impl<T: IdMarker> From<Ulid> for Id<T> {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.ulid)
    }
}

// ========================================
// マーカー型の定義
// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimMarker {}

impl IdMarker for ClaimMarker {
    fn prefix() -> &'static str {
        "claim-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OwnerMarker {}

impl IdMarker for OwnerMarker {
    fn prefix() -> &'static str {
        "owner-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorldMarker {}

impl IdMarker for WorldMarker {
    fn prefix() -> &'static str {
        "world-"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SweepMarker {}

impl IdMarker for SweepMarker {
    fn prefix() -> &'static str {
        "sweep-"
    }
}

// ========================================
// Type Alias（使いやすさのため）
// ========================================

/// Identifier of a land claim.
pub type ClaimId = Id<ClaimMarker>;

/// Identifier of a claim owner (player / permission holder).
pub type OwnerId = Id<OwnerMarker>;

/// Identifier of a world.
pub type WorldId = Id<WorldMarker>;

/// Identifier of one sweep pass (trace id for log records).
pub type SweepId = Id<SweepMarker>;
