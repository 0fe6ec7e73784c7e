//! Complaints and their append-only audit trail
//!
//! A [`Complaint`] is the central aggregate: the current lifecycle
//! status, the escalation markers, the evidence attachments, and an
//! ordered [`StatusUpdate`] history recording every transition. The
//! history is the audit trail — entries are only ever appended, never
//! reordered or removed.
//!
//! Complaints are created by a resident submission and mutated only
//! through the workflow engine; nothing else should write these fields.

use crate::{ComplaintId, EvidenceId, Feedback, Satisfaction, StatusUpdateId, TrackingCode, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Lifecycle enums ──────────────────────────────────────────────────

/// Lifecycle status of a complaint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    /// Newly submitted, awaiting officer verification
    Submitted,
    /// Verified as a valid complaint by an officer
    Verified,
    /// Being worked on by an assignee
    InProgress,
    /// Raised to captain or municipal authority
    Escalated,
    /// A resolution has been recorded; awaiting resident feedback
    Resolved,
    /// Resident was not satisfied; complaint goes back into work
    Reopened,
    /// Terminal: resolved to satisfaction, or rejected as invalid
    Closed,
}

impl ComplaintStatus {
    /// Closed is the only terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ComplaintStatus::Closed)
    }
}

impl std::fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComplaintStatus::Submitted => "Submitted",
            ComplaintStatus::Verified => "Verified",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Escalated => "Escalated",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Reopened => "Reopened",
            ComplaintStatus::Closed => "Closed",
        };
        write!(f, "{}", name)
    }
}

/// How urgent a complaint is; drives SLA targets and escalation scope
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UrgencyLevel::Low => "Low",
            UrgencyLevel::Medium => "Medium",
            UrgencyLevel::High => "High",
            UrgencyLevel::Critical => "Critical",
        };
        write!(f, "{}", name)
    }
}

/// Complaint category
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintCategory {
    Noise,
    Garbage,
    Infrastructure,
    Security,
    Other,
}

impl std::fmt::Display for ComplaintCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComplaintCategory::Noise => "Noise",
            ComplaintCategory::Garbage => "Garbage",
            ComplaintCategory::Infrastructure => "Infrastructure",
            ComplaintCategory::Security => "Security",
            ComplaintCategory::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// The authority tier a complaint has been escalated to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EscalationLevel {
    /// Not escalated
    #[default]
    None,
    /// Escalated to the barangay captain
    Captain,
    /// Escalated to municipal authority
    Municipal,
}

impl std::fmt::Display for EscalationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EscalationLevel::None => "None",
            EscalationLevel::Captain => "Captain",
            EscalationLevel::Municipal => "Municipal",
        };
        write!(f, "{}", name)
    }
}

/// Where the captain decided an escalated complaint is to be resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolutionScope {
    /// Resolvable within the barangay
    Barangay,
    /// Requires municipal authority
    Municipal,
}

impl std::fmt::Display for ResolutionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResolutionScope::Barangay => "Barangay",
            ResolutionScope::Municipal => "Municipal",
        };
        write!(f, "{}", name)
    }
}

// ── Audit records ────────────────────────────────────────────────────

/// One entry in a complaint's audit trail
///
/// Immutable once created. Records the status that resulted from an
/// operation (which may equal the previous status, e.g. an urgency
/// assessment), who acted, and when.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// Unique identifier for this audit record
    pub id: StatusUpdateId,
    /// The complaint this entry belongs to
    pub complaint_id: ComplaintId,
    /// The status the complaint held after the operation
    pub status: ComplaintStatus,
    /// Free-text notes from the acting user
    pub notes: String,
    /// Who performed the operation
    pub actor: UserId,
    /// When the operation happened
    pub timestamp: DateTime<Utc>,
}

/// Metadata for a file attached to a complaint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Evidence {
    /// Unique identifier for this attachment
    pub id: EvidenceId,
    /// The complaint this attachment belongs to
    pub complaint_id: ComplaintId,
    /// Reference to the stored file (name, URL — storage is external)
    pub file_reference: String,
    /// What the attachment shows
    pub description: String,
    /// Who uploaded it
    pub uploaded_by: UserId,
    /// When it was uploaded
    pub uploaded_at: DateTime<Utc>,
}

// ── Complaint ────────────────────────────────────────────────────────

/// A complaint filed by a resident
///
/// Never deleted; its lifecycle ends in the terminal Closed status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Complaint {
    /// Internal unique identifier
    pub id: ComplaintId,
    /// Human-facing tracking code, assigned at registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<TrackingCode>,
    /// Short summary
    pub title: String,
    /// Full description of the issue
    pub description: String,
    /// Category of the issue
    pub category: ComplaintCategory,
    /// Current urgency assessment
    pub urgency: UrgencyLevel,
    /// Current lifecycle status
    pub status: ComplaintStatus,
    /// Authority tier the complaint is escalated to
    pub escalation_level: EscalationLevel,
    /// Captain's scope decision, if one has been made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_scope: Option<ResolutionScope>,
    /// The resident who filed the complaint
    pub submitter: UserId,
    /// Who is currently working on it, if anyone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserId>,
    /// When the complaint was filed
    pub submitted_at: DateTime<Utc>,
    /// When the complaint was last touched
    pub updated_at: DateTime<Utc>,
    /// Advisory SLA deadline, stamped when processing starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_resolution_at: Option<DateTime<Utc>>,
    /// How the complaint was resolved; set only while Resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    /// When the current resolution was recorded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
    /// Append-only audit trail, in operation order
    pub history: Vec<StatusUpdate>,
    /// Attached evidence, in upload order
    pub evidence: Vec<Evidence>,
    /// Resident feedback on the (latest) resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    /// Whether the resident was satisfied; unset until feedback arrives
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<Satisfaction>,
}

impl Complaint {
    /// Create a new complaint in the Submitted status
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ComplaintCategory,
        urgency: UrgencyLevel,
        submitter: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ComplaintId::generate(),
            tracking_code: None,
            title: title.into(),
            description: description.into(),
            category,
            urgency,
            status: ComplaintStatus::Submitted,
            escalation_level: EscalationLevel::None,
            resolution_scope: None,
            submitter,
            assignee: None,
            submitted_at: now,
            updated_at: now,
            estimated_resolution_at: None,
            resolution: None,
            resolved_at: None,
            history: Vec::new(),
            evidence: Vec::new(),
            feedback: None,
            satisfaction: None,
        }
    }

    /// Replace the generated id. Only meaningful before any audit or
    /// evidence records reference the complaint.
    pub fn with_id(mut self, id: ComplaintId) -> Self {
        self.id = id;
        self
    }

    /// Set the complaint's status and append the matching audit entry.
    ///
    /// The only way status is ever written. Also used for operations
    /// that leave the status unchanged but must still be audited.
    pub fn record_transition(
        &mut self,
        status: ComplaintStatus,
        actor: &UserId,
        notes: impl Into<String>,
    ) {
        let now = Utc::now();
        self.status = status;
        self.updated_at = now;
        self.history.push(StatusUpdate {
            id: StatusUpdateId::generate(),
            complaint_id: self.id.clone(),
            status,
            notes: notes.into(),
            actor: actor.clone(),
            timestamp: now,
        });
    }

    /// Attach an evidence file
    pub fn attach_evidence(
        &mut self,
        file_reference: impl Into<String>,
        description: impl Into<String>,
        uploaded_by: &UserId,
    ) -> EvidenceId {
        let now = Utc::now();
        let id = EvidenceId::generate();
        self.evidence.push(Evidence {
            id: id.clone(),
            complaint_id: self.id.clone(),
            file_reference: file_reference.into(),
            description: description.into(),
            uploaded_by: uploaded_by.clone(),
            uploaded_at: now,
        });
        self.updated_at = now;
        id
    }

    /// Record a resolution. Does not transition; callers record the
    /// Resolved transition separately.
    pub fn set_resolution(&mut self, text: impl Into<String>) {
        let now = Utc::now();
        self.resolution = Some(text.into());
        self.resolved_at = Some(now);
        self.updated_at = now;
    }

    /// Clear resolution fields when a complaint is reopened, keeping the
    /// invariant that resolution data exists only for a Resolved (or
    /// subsequently Closed) complaint.
    pub fn clear_resolution(&mut self) {
        self.resolution = None;
        self.resolved_at = None;
        self.updated_at = Utc::now();
    }

    /// Attach resident feedback, replacing any feedback from an earlier
    /// resolution cycle, and record the satisfaction flag.
    pub fn attach_feedback(&mut self, feedback: Feedback) {
        self.satisfaction = Some(feedback.satisfaction());
        self.feedback = Some(feedback);
        self.updated_at = Utc::now();
    }

    /// Whether feedback has already been submitted for the *current*
    /// resolution. Feedback carried over from a previous resolve/reopen
    /// cycle does not count.
    pub fn has_feedback_for_current_resolution(&self) -> bool {
        match (&self.feedback, self.resolved_at) {
            (Some(feedback), Some(resolved_at)) => feedback.submitted_at >= resolved_at,
            _ => false,
        }
    }

    /// Whether the complaint has reached its terminal status
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// The status recorded by the most recent audit entry
    pub fn last_recorded_status(&self) -> Option<ComplaintStatus> {
        self.history.last().map(|u| u.status)
    }

    /// Number of audit entries
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_complaint() -> Complaint {
        Complaint::new(
            "Noise Complaint",
            "Loud music at night from neighbor",
            ComplaintCategory::Noise,
            UrgencyLevel::High,
            UserId::new("resident-1"),
        )
    }

    #[test]
    fn test_new_complaint_is_submitted() {
        let complaint = make_complaint();
        assert_eq!(complaint.status, ComplaintStatus::Submitted);
        assert_eq!(complaint.escalation_level, EscalationLevel::None);
        assert!(complaint.history.is_empty());
        assert!(complaint.tracking_code.is_none());
        assert!(!complaint.is_terminal());
    }

    #[test]
    fn test_record_transition_appends_history() {
        let mut complaint = make_complaint();
        let officer = UserId::new("officer-1");

        complaint.record_transition(ComplaintStatus::Verified, &officer, "Verified on site");
        complaint.record_transition(ComplaintStatus::InProgress, &officer, "Crew dispatched");

        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.history_len(), 2);
        assert_eq!(complaint.history[0].status, ComplaintStatus::Verified);
        assert_eq!(complaint.history[1].status, ComplaintStatus::InProgress);
        assert_eq!(
            complaint.last_recorded_status(),
            Some(ComplaintStatus::InProgress)
        );
    }

    #[test]
    fn test_history_timestamps_non_decreasing() {
        let mut complaint = make_complaint();
        let actor = UserId::new("officer-1");
        for status in [
            ComplaintStatus::Verified,
            ComplaintStatus::InProgress,
            ComplaintStatus::Resolved,
        ] {
            complaint.record_transition(status, &actor, "");
        }
        let timestamps: Vec<_> = complaint.history.iter().map(|u| u.timestamp).collect();
        assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_status_unchanged_still_audited() {
        let mut complaint = make_complaint();
        let officer = UserId::new("officer-1");
        complaint.record_transition(ComplaintStatus::Verified, &officer, "Verified");
        complaint.record_transition(ComplaintStatus::Verified, &officer, "Urgency kept at High");
        assert_eq!(complaint.status, ComplaintStatus::Verified);
        assert_eq!(complaint.history_len(), 2);
    }

    #[test]
    fn test_attach_evidence() {
        let mut complaint = make_complaint();
        let uploader = UserId::new("resident-1");
        complaint.attach_evidence("proof.jpg", "Photo of the scene", &uploader);
        complaint.attach_evidence("video.mp4", "Recording", &uploader);

        assert_eq!(complaint.evidence.len(), 2);
        assert_eq!(complaint.evidence[0].file_reference, "proof.jpg");
        assert_eq!(complaint.evidence[0].complaint_id, complaint.id);
    }

    #[test]
    fn test_resolution_set_and_cleared() {
        let mut complaint = make_complaint();
        complaint.set_resolution("Talked to the neighbor");
        assert!(complaint.resolution.is_some());
        assert!(complaint.resolved_at.is_some());

        complaint.clear_resolution();
        assert!(complaint.resolution.is_none());
        assert!(complaint.resolved_at.is_none());
    }

    #[test]
    fn test_feedback_duplicate_detection_per_cycle() {
        let mut complaint = make_complaint();
        assert!(!complaint.has_feedback_for_current_resolution());

        // First cycle: resolve, then feedback
        complaint.set_resolution("Fixed");
        let feedback = Feedback::new(
            complaint.id.clone(),
            4,
            "Resolved promptly",
            UserId::new("resident-1"),
            Satisfaction::Unsatisfied,
        );
        complaint.attach_feedback(feedback);
        assert!(complaint.has_feedback_for_current_resolution());
        assert_eq!(complaint.satisfaction, Some(Satisfaction::Unsatisfied));

        // Reopen cycle: a new resolution makes the old feedback stale
        complaint.clear_resolution();
        complaint.set_resolution("Fixed again");
        assert!(!complaint.has_feedback_for_current_resolution());
    }

    #[test]
    fn test_serde_round_trip_preserves_history() {
        let mut complaint = make_complaint();
        let officer = UserId::new("officer-1");
        complaint.record_transition(ComplaintStatus::Verified, &officer, "ok");
        complaint.record_transition(ComplaintStatus::Escalated, &officer, "to captain");
        complaint.escalation_level = EscalationLevel::Captain;

        let json = serde_json::to_string(&complaint).unwrap();
        let restored: Complaint = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, complaint.id);
        assert_eq!(restored.status, ComplaintStatus::Escalated);
        assert_eq!(restored.escalation_level, EscalationLevel::Captain);
        assert_eq!(restored.history_len(), complaint.history_len());
        for (a, b) in restored.history.iter().zip(complaint.history.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.status, b.status);
            assert_eq!(a.timestamp, b.timestamp);
        }
    }
}
