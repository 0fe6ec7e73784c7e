//! Identifier generation
//!
//! The generator is injected into the registry at construction instead
//! of living in hidden global counters. Production uses UUIDs; tests
//! inject the sequential generator for deterministic ids.

use bccms_types::TrackingCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of unique entity identifiers
pub trait IdGenerator: Send + Sync {
    /// Produce the next unique identifier
    fn next_id(&self) -> String;
}

/// UUID v4 backed generator
#[derive(Clone, Debug, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Monotonic counter generator with a fixed prefix
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{}", self.prefix, n)
    }
}

/// Default tracking code prefix
pub const DEFAULT_TRACKING_PREFIX: &str = "BCCMS";
/// Default first tracking sequence number
pub const DEFAULT_TRACKING_BASE: u64 = 1000;

/// Issues human-facing tracking codes: `{prefix}-{sequence}`.
///
/// The sequence is strictly increasing and codes are never reused.
#[derive(Debug)]
pub struct TrackingCodeIssuer {
    prefix: String,
    next: AtomicU64,
}

impl TrackingCodeIssuer {
    /// Create an issuer with a deployment prefix and starting sequence
    pub fn new(prefix: impl Into<String>, base: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(base),
        }
    }

    /// Issue the next tracking code
    pub fn issue(&self) -> TrackingCode {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        TrackingCode::compose(&self.prefix, n)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for TrackingCodeIssuer {
    fn default() -> Self {
        Self::new(DEFAULT_TRACKING_PREFIX, DEFAULT_TRACKING_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_uuid_generator_unique() {
        let gen = UuidIdGenerator;
        let ids: HashSet<_> = (0..100).map(|_| gen.next_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_sequential_generator() {
        let gen = SequentialIdGenerator::new("user");
        assert_eq!(gen.next_id(), "user-1");
        assert_eq!(gen.next_id(), "user-2");
        assert_eq!(gen.next_id(), "user-3");
    }

    #[test]
    fn test_tracking_codes_start_at_base() {
        let issuer = TrackingCodeIssuer::default();
        assert_eq!(issuer.issue().as_str(), "BCCMS-1000");
        assert_eq!(issuer.issue().as_str(), "BCCMS-1001");
    }

    #[test]
    fn test_tracking_codes_never_reused() {
        let issuer = TrackingCodeIssuer::new("BRGY", 1);
        let codes: HashSet<_> = (0..50).map(|_| issuer.issue()).collect();
        assert_eq!(codes.len(), 50);
    }
}
