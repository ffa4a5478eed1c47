//! Domain model (IDs, claims, settings, decisions, records, errors).
//!
//! ここにあるものはすべて副作用を持ちません。
//! 削除などの副作用は app 層（executor）だけが起こします。

pub mod claim;
pub mod decision;
pub mod errors;
pub mod events;
pub mod ids;
pub mod settings;

pub use claim::{Claim, ClaimKind};
pub use decision::{Decision, DefaultExpirationPolicy, Evaluation, ExpirationPolicy, ExpirationReason, Tier};
pub use errors::{CollaboratorError, ErrorKind, ReclaimError, RegistryError};
pub use events::{ClaimContext, RemovalRecord};
pub use ids::{ClaimId, OwnerId, SweepId, WorldId};
pub use settings::{ChestTierMatch, OwnerSettings, SweepConfig, WorldPolicyConfig};
