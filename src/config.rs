//! Agent configuration. Thresholds are fixed at construction time; the
//! stores never reconfigure themselves while running.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Entity registry parameters
    pub identity: IdentityConfig,
    /// Pattern memory parameters
    pub patterns: PatternConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Minimum behavioral similarity (0.0–1.0) to re-identify an entity
    pub similarity_threshold: f64,
    /// Days of inactivity after which an entity id expires
    pub expiry_days: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Multiplicative forgetting constant (<1) applied on every observation
    pub decay_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            identity: IdentityConfig::default(),
            patterns: PatternConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            expiry_days: 30,
        }
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self { decay_factor: 0.95 }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: true,
        }
    }
}

impl AgentConfig {
    /// Load from JSON file if present; otherwise return default
    pub fn load(path: &std::path::Path) -> Self {
        if path.exists() {
            if let Ok(data) = std::fs::read_to_string(path) {
                if let Ok(c) = serde_json::from_str::<AgentConfig>(&data) {
                    return c;
                }
            }
        }
        Self::default()
    }
}
