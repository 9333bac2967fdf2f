//! Optional snapshot/restore for process-restart continuity.
//!
//! Not part of the load-bearing contract and never written automatically.
//! The snapshot carries exactly the statistical summaries the stores
//! already hold; restoring it reveals nothing an attacker could not read
//! from the live process.

use crate::clock::{Clock, SystemClock};
use crate::config::{IdentityConfig, PatternConfig};
use crate::error::Result;
use crate::identity::{EntityProfile, EntityRegistry};
use crate::patterns::{ActivityPattern, PatternStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub taken_at: DateTime<Utc>,
    profiles: Vec<EntityProfile>,
    patterns: BTreeMap<String, ActivityPattern>,
    total_observations: u64,
}

impl AgentSnapshot {
    /// Capture the current state of both stores.
    pub fn capture(registry: &EntityRegistry, store: &PatternStore) -> Self {
        Self {
            taken_at: Utc::now(),
            profiles: registry.profiles().to_vec(),
            patterns: store.patterns().clone(),
            total_observations: store.total_observations(),
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Rebuild both stores from this snapshot with the system clock.
    pub fn restore(
        self,
        identity: IdentityConfig,
        patterns: PatternConfig,
    ) -> (EntityRegistry, PatternStore) {
        self.restore_with_clocks(identity, patterns, Box::new(SystemClock), Box::new(SystemClock))
    }

    /// Rebuild both stores with injected clocks (tests).
    pub fn restore_with_clocks(
        self,
        identity: IdentityConfig,
        patterns: PatternConfig,
        registry_clock: Box<dyn Clock>,
        store_clock: Box<dyn Clock>,
    ) -> (EntityRegistry, PatternStore) {
        let registry = EntityRegistry::from_profiles(identity, self.profiles, registry_clock);
        let store = PatternStore::from_parts(
            patterns,
            self.patterns,
            self.total_observations,
            store_clock,
        );
        (registry, store)
    }
}
