//! Escalation and SLA policy
//!
//! Two deterministic decisions live here: how long a complaint of a
//! given urgency should take to resolve (advisory metadata, not an
//! enforced timer), and whether an escalated complaint stays within the
//! barangay or moves to municipal authority.

use bccms_types::{EscalationLevel, ResolutionScope, UrgencyLevel};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Target resolution time in days per urgency level.
///
/// Replace the whole table to change deployment policy; the defaults
/// match the standard barangay targets.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SlaTable {
    pub low_days: i64,
    pub medium_days: i64,
    pub high_days: i64,
    pub critical_days: i64,
}

impl SlaTable {
    /// Target days for a given urgency
    pub fn days_for(&self, urgency: UrgencyLevel) -> i64 {
        match urgency {
            UrgencyLevel::Low => self.low_days,
            UrgencyLevel::Medium => self.medium_days,
            UrgencyLevel::High => self.high_days,
            UrgencyLevel::Critical => self.critical_days,
        }
    }

    /// Estimated resolution deadline counted from `from`
    pub fn deadline_from(&self, urgency: UrgencyLevel, from: DateTime<Utc>) -> DateTime<Utc> {
        from + Duration::days(self.days_for(urgency))
    }
}

impl Default for SlaTable {
    fn default() -> Self {
        Self {
            low_days: 14,
            medium_days: 7,
            high_days: 3,
            critical_days: 1,
        }
    }
}

/// The captain's scope decision for an escalated complaint.
///
/// Pure function of the urgency and the escalation level: a complaint
/// already escalated to municipal authority is municipal scope, critical
/// urgency forces municipal scope, everything else stays in the
/// barangay.
pub fn decide_scope(urgency: UrgencyLevel, level: EscalationLevel) -> ResolutionScope {
    if level == EscalationLevel::Municipal || urgency == UrgencyLevel::Critical {
        ResolutionScope::Municipal
    } else {
        ResolutionScope::Barangay
    }
}
