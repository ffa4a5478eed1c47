//! Restorer / PermissionCleaner 実装
//!
//! 地形復元と権限削除はホスト側のサブシステム。ここには
//! 何もしない実装と、呼び出しを記録するテスト用実装だけを置く。

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Claim, ClaimContext, ClaimId, CollaboratorError};
use crate::ports::{PermissionCleaner, Restorer};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRestorer;

#[async_trait]
impl Restorer for NoopRestorer {
    async fn restore(&self, _ctx: &ClaimContext, _claim: &Claim) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPermissionCleaner;

#[async_trait]
impl PermissionCleaner for NoopPermissionCleaner {
    async fn clear_context(&self, _ctx: &ClaimContext, _claim: &Claim) -> Result<(), CollaboratorError> {
        Ok(())
    }
}

/// RecordingCollaborator は呼び出しを記録（`failing()` なら全て失敗させる）
#[derive(Debug, Default)]
pub struct RecordingCollaborator {
    calls: Mutex<Vec<ClaimId>>,
    failing: bool,
}

impl RecordingCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn calls(&self) -> Vec<ClaimId> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn call(&self, name: &'static str, claim: &Claim) -> Result<(), CollaboratorError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(claim.id);
        if self.failing {
            return Err(CollaboratorError::new(name, claim.id, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl Restorer for RecordingCollaborator {
    async fn restore(&self, _ctx: &ClaimContext, claim: &Claim) -> Result<(), CollaboratorError> {
        self.call("restorer", claim)
    }
}

#[async_trait]
impl PermissionCleaner for RecordingCollaborator {
    async fn clear_context(&self, _ctx: &ClaimContext, claim: &Claim) -> Result<(), CollaboratorError> {
        self.call("permission cleaner", claim)
    }
}
