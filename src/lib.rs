//! Hearth Agent — privacy-preserving behavioral analytics core for home
//! robotics. Re-identifies residents from non-biometric movement features
//! and learns decaying statistical activity patterns, without storing raw
//! events, timestamps, or imagery.
//!
//! Modular structure:
//! - [`features`] — Behavioral feature records, encoding, similarity
//! - [`identity`] — Ephemeral entity registry with expiry-based forgetting
//! - [`patterns`] — Decaying pattern memory and anomaly scoring
//! - [`stats`] — Shared EMA mean/std accumulator
//! - [`clock`] — Injectable wall-clock for deterministic expiry tests
//! - [`snapshot`] — Optional process-restart continuity
//! - [`logging`] — Structured JSON logging

pub mod clock;
pub mod config;
pub mod error;
pub mod features;
pub mod identity;
pub mod logging;
pub mod patterns;
pub mod snapshot;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::AgentConfig;
pub use error::{AgentError, Result};
pub use features::{similarity, BehavioralFeatures, MovementPattern, TimeOfDay, Zone};
pub use identity::{EntityId, EntityProfile, EntityRegistry};
pub use logging::StructuredLogger;
pub use patterns::{ActivityPattern, ActivitySummary, PatternStore};
pub use snapshot::AgentSnapshot;
pub use stats::EmaStats;
