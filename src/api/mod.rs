//! Practice server boundary

pub mod client;
pub mod wire;

pub use client::{ApiClient, HealthCheck, OfflineSubmitter, PerformanceSubmitter};
pub use wire::{ConfirmedProgress, PerformanceSubmission, ServerResult};
