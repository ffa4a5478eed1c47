//! Errors - エラー型と分類
//!
//! どのエラーも「1 クレーム」または「1 ワールド」に局所化されます。
//! スイープ全体を止めるのは world 一覧の取得失敗だけです。

use thiserror::Error;

use super::ids::{ClaimId, WorldId};

/// ErrorKind は運用上の分類
///
/// - Transient: 一時的なエラー（次回スイープで再評価される）
/// - Permanent: 恒久的なエラー（設定ミスなど）
/// - Infrastructure: ホスト側ストレージ等の障害
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transient,
    Permanent,
    Infrastructure,
}

/// RegistryError は ClaimRegistry が返すエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("registry rejected deletion of {claim_id}: {message}")]
    DeleteRejected { claim_id: ClaimId, message: String },

    #[error("snapshot of {world_id} unavailable: {message}")]
    SnapshotUnavailable { world_id: WorldId, message: String },

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::DeleteRejected { .. } => ErrorKind::Transient,
            RegistryError::SnapshotUnavailable { .. } | RegistryError::Unavailable(_) => {
                ErrorKind::Infrastructure
            }
        }
    }
}

/// CollaboratorError はベストエフォートなコラボレーター（復元・権限削除）の失敗
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{collaborator} failed for {claim_id}: {message}")]
pub struct CollaboratorError {
    pub collaborator: &'static str,
    pub claim_id: ClaimId,
    pub message: String,
}

impl CollaboratorError {
    pub fn new(collaborator: &'static str, claim_id: ClaimId, message: impl Into<String>) -> Self {
        Self {
            collaborator,
            claim_id,
            message: message.into(),
        }
    }
}

/// ReclaimError はクレート全体のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReclaimError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("sweep scheduler already stopped")]
    SchedulerStopped,
}

impl ReclaimError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReclaimError::Registry(e) => e.kind(),
            ReclaimError::SchedulerStopped => ErrorKind::Permanent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_rejection_is_transient() {
        let err = RegistryError::DeleteRejected {
            claim_id: ClaimId::generate(),
            message: "locked".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Transient);
        assert!(err.to_string().contains("locked"));

        let wrapped: ReclaimError = err.into();
        assert_eq!(wrapped.kind(), ErrorKind::Transient);
    }

    #[test]
    fn unavailable_registry_is_infrastructure() {
        let err: ReclaimError = RegistryError::Unavailable("db down".to_string()).into();
        assert_eq!(err.kind(), ErrorKind::Infrastructure);
        assert_eq!(err.to_string(), "registry unavailable: db down");
    }

    #[test]
    fn collaborator_error_names_the_collaborator() {
        let claim_id = ClaimId::generate();
        let err = CollaboratorError::new("restorer", claim_id, "chunk not loaded");
        assert_eq!(
            err.to_string(),
            format!("restorer failed for {claim_id}: chunk not loaded")
        );
    }
}
