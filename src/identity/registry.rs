//! Entity registry: matches feature records against known profiles or
//! creates new ones; expires inactive profiles on explicit cleanup.

use super::{generate_entity_id, EntityId, EntityProfile};
use crate::clock::{Clock, SystemClock};
use crate::config::IdentityConfig;
use crate::features::{similarity, BehavioralFeatures};
use std::collections::HashMap;
use tracing::{debug, info};

/// Owns all entity profiles. Mutating operations take `&mut self`, so
/// single-writer discipline is enforced by the borrow checker; wrap the
/// registry in one exclusive lock to share it across threads.
pub struct EntityRegistry {
    config: IdentityConfig,
    /// Profiles in insertion order; `detect` iterates this directly so
    /// tie-breaks are deterministic (first inserted wins).
    profiles: Vec<EntityProfile>,
    index: HashMap<EntityId, usize>,
    clock: Box<dyn Clock>,
}

impl EntityRegistry {
    pub fn new(config: IdentityConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock))
    }

    pub fn with_clock(config: IdentityConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            profiles: Vec::new(),
            index: HashMap::new(),
            clock,
        }
    }

    /// Rebuild a registry from previously exported profiles (snapshot
    /// restore). Insertion order of the slice is preserved.
    pub(crate) fn from_profiles(
        config: IdentityConfig,
        profiles: Vec<EntityProfile>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let index = profiles
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id().clone(), slot))
            .collect();
        Self {
            config,
            profiles,
            index,
            clock,
        }
    }

    /// Match a feature record against known entities.
    ///
    /// Picks the non-expired profile with the highest similarity strictly
    /// above the threshold and updates it; otherwise creates a fresh
    /// profile. Never fails: an unmatched record is the normal new-entity
    /// branch. Returns the entity id and whether it was newly created.
    pub fn detect(&mut self, features: &BehavioralFeatures) -> (EntityId, bool) {
        let now = self.clock.now();

        let mut best: Option<(usize, f64)> = None;
        for (slot, profile) in self.profiles.iter().enumerate() {
            if profile.is_expired(now, self.config.expiry_days) {
                continue;
            }
            let score = similarity(features, profile.typical_features());
            if score > self.config.similarity_threshold
                && best.map_or(true, |(_, top)| score > top)
            {
                best = Some((slot, score));
            }
        }

        if let Some((slot, score)) = best {
            let profile = &mut self.profiles[slot];
            profile.record_observation(features, now);
            debug!(
                entity_id = %profile.id(),
                similarity = score,
                confidence = profile.confidence,
                "entity re-identified"
            );
            return (profile.id().clone(), false);
        }

        let id = generate_entity_id();
        let profile = EntityProfile::new(id.clone(), features, now);
        self.index.insert(id.clone(), self.profiles.len());
        self.profiles.push(profile);
        info!(entity_id = %id, total = self.profiles.len(), "new entity profile");
        (id, true)
    }

    /// Remove all expired profiles. Explicit only, never run on a timer.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expiry_days = self.config.expiry_days;
        let before = self.profiles.len();
        self.profiles.retain(|p| !p.is_expired(now, expiry_days));
        self.index = self
            .profiles
            .iter()
            .enumerate()
            .map(|(slot, p)| (p.id().clone(), slot))
            .collect();
        let removed = before - self.profiles.len();
        if removed > 0 {
            info!(removed, remaining = self.profiles.len(), "expired entities removed");
        }
        removed
    }

    /// Profile lookup. Absent if never created, removed, or past expiry.
    pub fn get_profile(&self, id: &EntityId) -> Option<&EntityProfile> {
        let now = self.clock.now();
        self.index
            .get(id)
            .map(|&slot| &self.profiles[slot])
            .filter(|p| !p.is_expired(now, self.config.expiry_days))
    }

    /// All stored profiles in insertion order (read-only; includes profiles
    /// that are past expiry but not yet cleaned up).
    pub fn profiles(&self) -> &[EntityProfile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }
}
