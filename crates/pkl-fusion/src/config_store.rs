//! Versioned, swappable configuration.
//!
//! Each classification call takes one `Arc<ConfigSnapshot>` and uses it
//! throughout, so a concurrent update can never produce a torn read.
//! Updates replace the whole snapshot; the last writer wins.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use pkl_analysis::SessionAnalyzer;
use pkl_core::config::{FusionConfig, PklConfig, ResolvedConfig, ToggleFacet};
use pkl_core::errors::ConfigError;
use tracing::info;

/// Immutable view of the configuration at one version.
pub struct ConfigSnapshot {
    pub version: u64,
    pub config: PklConfig,
    pub resolved: ResolvedConfig,
    /// Local analysis pipeline built for this version's facet weights.
    pub analyzer: Arc<SessionAnalyzer>,
}

impl ConfigSnapshot {
    fn build(version: u64, config: PklConfig) -> Self {
        let resolved = config.resolve();
        let analyzer = Arc::new(SessionAnalyzer::new(&resolved));
        Self {
            version,
            config,
            resolved,
            analyzer,
        }
    }
}

/// Owner of the current configuration snapshot.
pub struct ConfigStore {
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(ConfigSnapshot::build(1, PklConfig::default()))),
        }
    }
}

impl ConfigStore {
    /// Create a store at version 1.
    pub fn new(config: PklConfig) -> Result<Self, ConfigError> {
        PklConfig::validate(&config)?;
        Ok(Self {
            current: RwLock::new(Arc::new(ConfigSnapshot::build(1, config))),
        })
    }

    /// The snapshot in effect right now.
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn version(&self) -> u64 {
        self.snapshot().version
    }

    /// Replace the whole configuration. Returns the new version.
    pub fn replace(&self, config: PklConfig) -> Result<u64, ConfigError> {
        PklConfig::validate(&config)?;
        Ok(self.swap(|_| config))
    }

    /// Replace the facet weight table wholesale.
    pub fn update_facet_weights(&self, weights: BTreeMap<String, f64>) -> u64 {
        self.swap(|current| {
            let mut next = current.clone();
            next.facets.weights = weights;
            next
        })
    }

    /// Replace one toggle-percentage table wholesale.
    pub fn update_toggles(&self, facet: ToggleFacet, table: BTreeMap<String, f64>) -> u64 {
        self.swap(|current| {
            let mut next = current.clone();
            *next.toggles.table_mut(facet) = table;
            next
        })
    }

    /// Replace the fusion proportions.
    pub fn update_fusion(&self, fusion: FusionConfig) -> u64 {
        self.swap(|current| {
            let mut next = current.clone();
            next.fusion = fusion;
            next
        })
    }

    fn swap(&self, f: impl FnOnce(&PklConfig) -> PklConfig) -> u64 {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let next = f(&guard.config);
        let version = guard.version + 1;
        let snapshot = ConfigSnapshot::build(version, next);
        if !snapshot.resolved.adjusted_tables.is_empty() {
            info!(
                version,
                adjusted = ?snapshot.resolved.adjusted_tables,
                "configuration tables normalized on update"
            );
        }
        *guard = Arc::new(snapshot);
        version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn updates_bump_version() {
        let store = ConfigStore::default();
        assert_eq!(store.version(), 1);
        let v = store.update_fusion(FusionConfig {
            clio: Some(0.5),
            ast: Some(0.5),
            auto_adjust: None,
        });
        assert_eq!(v, 2);
        assert_eq!(store.snapshot().resolved.fusion.clio, 0.5);
    }

    #[test]
    fn old_snapshot_is_unaffected_by_update() {
        let store = ConfigStore::default();
        let before = store.snapshot();
        let mut table = BTreeMap::new();
        table.insert("debug".to_string(), 2.0);
        store.update_toggles(ToggleFacet::Intent, table);

        assert_eq!(before.resolved.toggle(ToggleFacet::Intent, "implement"), Some(0.2));
        let after = store.snapshot();
        assert_eq!(after.resolved.toggle(ToggleFacet::Intent, "debug"), Some(1.0));
        assert_eq!(after.resolved.toggle(ToggleFacet::Intent, "implement"), None);
    }

    #[test]
    fn invalid_replace_is_rejected() {
        let store = ConfigStore::default();
        let mut config = PklConfig::default();
        config.engine.timeout_secs = Some(0);
        assert!(store.replace(config).is_err());
        assert_eq!(store.version(), 1);
    }
}
