//! SweepBuilder - スケジューラの構築とワイヤリング
//!
//! # Fail-fast 設計
//! - 必須のコラボレーター（registry, policy_config, options, restorer,
//!   permissions）が揃っていなければ build() で BuildError を返す
//! - 省略可能なもの: clock（SystemClock）、policy（DefaultExpirationPolicy）、
//!   notifier（TracingNotifier）

use std::sync::Arc;

use super::executor::ClaimRemovalExecutor;
use super::sweep_loop::SweepScheduler;
use crate::domain::{DefaultExpirationPolicy, ExpirationPolicy, SweepConfig};
use crate::impls::TracingNotifier;
use crate::ports::{
    ClaimRegistry, Clock, IdGenerator, Notifier, OptionResolver, PermissionCleaner, PolicyConfig,
    Restorer, SystemClock, UlidGenerator,
};

/// BuildError はスケジューラ構築時のエラー
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Missing collaborators: {0:?}. These must be supplied before build().")]
    MissingCollaborators(Vec<&'static str>),
}

/// # 使用例
/// ```ignore
/// let scheduler = SweepBuilder::new()
///     .registry(registry)
///     .policy_config(config)
///     .options(options)
///     .restorer(restorer)
///     .permissions(permissions)
///     .build()?;
/// ```
#[derive(Default)]
pub struct SweepBuilder {
    registry: Option<Arc<dyn ClaimRegistry>>,
    config: Option<Arc<dyn PolicyConfig>>,
    options: Option<Arc<dyn OptionResolver>>,
    restorer: Option<Arc<dyn Restorer>>,
    permissions: Option<Arc<dyn PermissionCleaner>>,
    notifier: Option<Arc<dyn Notifier>>,
    clock: Option<Arc<dyn Clock>>,
    policy: Option<Arc<dyn ExpirationPolicy>>,
    sweep_config: SweepConfig,
}

impl SweepBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(mut self, registry: Arc<dyn ClaimRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn policy_config(mut self, config: Arc<dyn PolicyConfig>) -> Self {
        self.config = Some(config);
        self
    }

    pub fn options(mut self, options: Arc<dyn OptionResolver>) -> Self {
        self.options = Some(options);
        self
    }

    pub fn restorer(mut self, restorer: Arc<dyn Restorer>) -> Self {
        self.restorer = Some(restorer);
        self
    }

    pub fn permissions(mut self, permissions: Arc<dyn PermissionCleaner>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn policy(mut self, policy: Arc<dyn ExpirationPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn sweep_config(mut self, sweep_config: SweepConfig) -> Self {
        self.sweep_config = sweep_config;
        self
    }

    pub fn build(self) -> Result<SweepScheduler, BuildError> {
        let required = [
            ("registry", self.registry.is_none()),
            ("policy_config", self.config.is_none()),
            ("options", self.options.is_none()),
            ("restorer", self.restorer.is_none()),
            ("permissions", self.permissions.is_none()),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, absent)| *absent)
            .map(|(name, _)| *name)
            .collect();

        let (Some(registry), Some(config), Some(options), Some(restorer), Some(permissions)) = (
            self.registry,
            self.config,
            self.options,
            self.restorer,
            self.permissions,
        ) else {
            return Err(BuildError::MissingCollaborators(missing));
        };

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let notifier = self.notifier.unwrap_or_else(|| Arc::new(TracingNotifier));
        let policy = self
            .policy
            .unwrap_or_else(|| Arc::new(DefaultExpirationPolicy::new()));
        let ids: Arc<dyn IdGenerator> = Arc::new(UlidGenerator::new(clock.clone()));

        let executor = ClaimRemovalExecutor::new(
            registry.clone(),
            restorer,
            permissions,
            notifier,
            clock.clone(),
        );
        Ok(SweepScheduler::new(
            registry,
            config,
            options,
            policy,
            executor,
            clock,
            ids,
            self.sweep_config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::{InMemoryClaimRegistry, NoopPermissionCleaner, NoopRestorer, StaticOptionResolver, StaticPolicyConfig};

    #[test]
    fn test_build_success() {
        let scheduler = SweepBuilder::new()
            .registry(Arc::new(InMemoryClaimRegistry::new()))
            .policy_config(Arc::new(StaticPolicyConfig::default()))
            .options(Arc::new(StaticOptionResolver::new()))
            .restorer(Arc::new(NoopRestorer))
            .permissions(Arc::new(NoopPermissionCleaner))
            .build();
        assert!(scheduler.is_ok());
    }

    #[test]
    fn test_build_missing_collaborators() {
        let scheduler = SweepBuilder::new()
            .registry(Arc::new(InMemoryClaimRegistry::new()))
            .options(Arc::new(StaticOptionResolver::new()))
            .build();
        assert!(matches!(
            scheduler,
            Err(BuildError::MissingCollaborators(missing))
                if missing == vec!["policy_config", "restorer", "permissions"]
        ));
    }

    #[test]
    fn test_build_keeps_sweep_config() {
        let config = SweepConfig {
            period_secs: 5,
            chest_tier_match: crate::domain::ChestTierMatch::StopWorld,
        };
        let scheduler = SweepBuilder::new()
            .registry(Arc::new(InMemoryClaimRegistry::new()))
            .policy_config(Arc::new(StaticPolicyConfig::default()))
            .options(Arc::new(StaticOptionResolver::new()))
            .restorer(Arc::new(NoopRestorer))
            .permissions(Arc::new(NoopPermissionCleaner))
            .sweep_config(config.clone())
            .build()
            .unwrap();
        assert_eq!(scheduler.sweep_config(), &config);
    }
}
