//! The workflow engine: the only mutator of complaints
//!
//! Every operation follows the same discipline: resolve the actor,
//! check the role gate, take the complaint's per-id lock, check the
//! state table, validate fields, then mutate and append exactly one
//! audit entry per transition. Validation completes fully before any
//! mutation, so a failed operation leaves the complaint untouched.
//!
//! Notifications are produced after the mutation and handed to the
//! dispatcher fire-and-forget; a dropped notification is logged and
//! never rolls a transition back.

use crate::dispatcher::{DeliveryResult, NotificationDispatcher};
use crate::policy::{decide_scope, SlaTable};
use crate::state_machine::{check_role, check_state, Operation};
use bccms_registry::Registry;
use bccms_types::{
    BccmsError, BccmsResult, Complaint, ComplaintCategory, ComplaintId, ComplaintStatus,
    EscalationLevel, EventKind, Feedback, Notification, Role, Satisfaction, UrgencyLevel, User,
    UserId,
};
use chrono::Utc;
use std::sync::Arc;

/// Input for filing a new complaint
#[derive(Clone, Debug)]
pub struct NewComplaint {
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub urgency: UrgencyLevel,
}

impl NewComplaint {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ComplaintCategory,
        urgency: UrgencyLevel,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category,
            urgency,
        }
    }
}

/// The complaint workflow engine
pub struct WorkflowEngine {
    registry: Arc<Registry>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    sla: SlaTable,
}

impl WorkflowEngine {
    pub fn new(registry: Arc<Registry>, dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self {
            registry,
            dispatcher,
            sla: SlaTable::default(),
        }
    }

    /// Replace the SLA table (deployment policy)
    pub fn with_sla_table(mut self, sla: SlaTable) -> Self {
        self.sla = sla;
        self
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    // ── Resident operations ──────────────────────────────────────────

    /// File a new complaint. The complaint starts in Submitted with one
    /// audit entry, gets a tracking code from the registry, and the
    /// submitter receives a confirmation notification.
    pub fn submit_complaint(
        &self,
        actor_id: &UserId,
        input: NewComplaint,
    ) -> BccmsResult<Complaint> {
        let actor = self.registry.get_user(actor_id)?;
        check_role(Operation::Submit, actor.role, true)?;

        if input.title.trim().is_empty() {
            return Err(BccmsError::ValidationError("title must not be empty".into()));
        }
        if input.description.trim().is_empty() {
            return Err(BccmsError::ValidationError(
                "description must not be empty".into(),
            ));
        }

        let mut complaint = Complaint::new(
            input.title,
            input.description,
            input.category,
            input.urgency,
            actor.id.clone(),
        )
        .with_id(self.registry.next_complaint_id());
        complaint.record_transition(ComplaintStatus::Submitted, actor_id, "Complaint submitted");

        let id = complaint.id.clone();
        let code = self.registry.register_complaint(complaint)?;

        tracing::info!(complaint_id = %id, tracking_code = %code, "Complaint submitted");
        self.notify(
            EventKind::Confirmation,
            actor_id,
            format!("Your complaint has been received. Tracking code: {}", code),
        );

        self.registry.get_complaint(&id)
    }

    /// Attach an evidence file. Allowed for the submitter and any
    /// official while the complaint is open.
    pub fn add_evidence(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        file_reference: impl Into<String>,
        description: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let file_reference = file_reference.into();
        let description = description.into();

        self.transition(actor_id, complaint_id, Operation::AddEvidence, |complaint, actor| {
            if file_reference.trim().is_empty() {
                return Err(BccmsError::ValidationError(
                    "evidence file reference must not be empty".into(),
                ));
            }
            complaint.attach_evidence(file_reference.clone(), description.clone(), &actor.id);
            complaint.record_transition(
                complaint.status,
                &actor.id,
                format!("Evidence attached: {}", file_reference),
            );
            Ok(None)
        })
    }

    /// Resident verdict on a resolution. Satisfied feedback closes the
    /// complaint; unsatisfied feedback reopens it and puts it back into
    /// work.
    pub fn submit_feedback(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        rating: u8,
        comment: impl Into<String>,
        satisfied: bool,
    ) -> BccmsResult<Complaint> {
        let comment = comment.into();

        self.transition(actor_id, complaint_id, Operation::SubmitFeedback, |complaint, actor| {
            if !Feedback::rating_in_range(rating) {
                return Err(BccmsError::ValidationError(format!(
                    "rating {} is out of range 1-5",
                    rating
                )));
            }
            if complaint.has_feedback_for_current_resolution() {
                return Err(BccmsError::DuplicateFeedback(complaint.id.clone()));
            }

            let satisfaction = if satisfied {
                Satisfaction::Satisfied
            } else {
                Satisfaction::Unsatisfied
            };
            complaint.attach_feedback(Feedback::new(
                complaint.id.clone(),
                rating,
                comment.clone(),
                actor.id.clone(),
                satisfaction,
            ));

            if satisfied {
                complaint.record_transition(
                    ComplaintStatus::Closed,
                    &actor.id,
                    format!("Closed with satisfied feedback (rating {})", rating),
                );
                Ok(Some((EventKind::Closed, "is now closed".to_string())))
            } else {
                complaint.record_transition(
                    ComplaintStatus::Reopened,
                    &actor.id,
                    format!("Unsatisfied feedback (rating {}); reopening", rating),
                );
                complaint.clear_resolution();
                complaint.record_transition(
                    ComplaintStatus::InProgress,
                    &actor.id,
                    "Reopened for further work",
                );
                Ok(Some((EventKind::Reopened, "has been reopened".to_string())))
            }
        })
    }

    /// Resident asks for more work on a resolved complaint without
    /// submitting a rating.
    pub fn request_further_action(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        details: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let details = details.into();

        self.transition(
            actor_id,
            complaint_id,
            Operation::RequestFurtherAction,
            |complaint, actor| {
                if details.trim().is_empty() {
                    return Err(BccmsError::ValidationError(
                        "further action request needs details".into(),
                    ));
                }
                complaint.record_transition(
                    ComplaintStatus::Reopened,
                    &actor.id,
                    format!("Further action requested: {}", details),
                );
                complaint.clear_resolution();
                complaint.record_transition(
                    ComplaintStatus::InProgress,
                    &actor.id,
                    "Reopened for further work",
                );
                Ok(Some((EventKind::Reopened, "has been reopened".to_string())))
            },
        )
    }

    // ── Officer operations ───────────────────────────────────────────

    /// Verify a submitted complaint as valid, or dismiss it.
    ///
    /// `valid = false` closes the complaint as invalid and requires a
    /// reason.
    pub fn verify(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        valid: bool,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();
        let operation = if valid {
            Operation::Verify
        } else {
            Operation::Reject
        };

        self.transition(actor_id, complaint_id, operation, |complaint, actor| {
            if valid {
                let notes = if notes.trim().is_empty() {
                    "Complaint verified".to_string()
                } else {
                    notes.clone()
                };
                complaint.record_transition(ComplaintStatus::Verified, &actor.id, notes);
                Ok(None)
            } else {
                if notes.trim().is_empty() {
                    return Err(BccmsError::ValidationError(
                        "a reason is required to dismiss a complaint".into(),
                    ));
                }
                complaint.record_transition(
                    ComplaintStatus::Closed,
                    &actor.id,
                    format!("Dismissed as invalid: {}", notes),
                );
                Ok(Some((
                    EventKind::Closed,
                    format!("has been closed: {}", notes),
                )))
            }
        })
    }

    /// Record an urgency assessment. The status stays Verified but the
    /// assessment is audited.
    pub fn assess_urgency(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        urgency: UrgencyLevel,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();

        self.transition(actor_id, complaint_id, Operation::AssessUrgency, |complaint, actor| {
            complaint.urgency = urgency;
            let notes = if notes.trim().is_empty() {
                format!("Urgency assessed as {}", urgency)
            } else {
                notes.clone()
            };
            complaint.record_transition(complaint.status, &actor.id, notes);
            Ok(None)
        })
    }

    /// Escalate to captain or municipal authority.
    pub fn escalate(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        level: EscalationLevel,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();

        self.transition(actor_id, complaint_id, Operation::Escalate, |complaint, actor| {
            if level == EscalationLevel::None {
                return Err(BccmsError::ValidationError(
                    "escalation must name an authority tier".into(),
                ));
            }
            complaint.escalation_level = level;
            let notes = if notes.trim().is_empty() {
                format!("Escalated to {}", level)
            } else {
                notes.clone()
            };
            complaint.record_transition(ComplaintStatus::Escalated, &actor.id, notes);
            Ok(Some((
                EventKind::Escalation,
                format!("has been escalated to {}", level),
            )))
        })
    }

    /// Captain/municipal takeover of an escalated complaint. Decides
    /// the resolution scope and puts the complaint back into work.
    /// A complaint escalated to municipal authority can only be taken
    /// over by a municipal official.
    pub fn handle_escalation(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();

        self.transition(
            actor_id,
            complaint_id,
            Operation::HandleEscalation,
            |complaint, actor| {
                if complaint.escalation_level == EscalationLevel::Municipal
                    && actor.role != Role::MunicipalOfficial
                {
                    return Err(BccmsError::PermissionDenied {
                        role: actor.role,
                        operation: Operation::HandleEscalation.name().to_string(),
                    });
                }

                let scope = decide_scope(complaint.urgency, complaint.escalation_level);
                complaint.resolution_scope = Some(scope);
                let notes = if notes.trim().is_empty() {
                    format!("Escalation handled; resolution scope {}", scope)
                } else {
                    notes.clone()
                };
                complaint.record_transition(ComplaintStatus::InProgress, &actor.id, notes);
                Ok(None)
            },
        )
    }

    /// Assign the complaint and start (or continue) work. Stamps the
    /// advisory SLA deadline from the current urgency.
    pub fn process(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        assignee_id: &UserId,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();
        let assignee = self.registry.get_user(assignee_id)?;

        self.transition(actor_id, complaint_id, Operation::Process, |complaint, actor| {
            if !assignee.role.is_official() {
                return Err(BccmsError::ValidationError(format!(
                    "assignee {} is not an official",
                    assignee.id
                )));
            }
            complaint.assignee = Some(assignee.id.clone());
            complaint.estimated_resolution_at =
                Some(self.sla.deadline_from(complaint.urgency, Utc::now()));
            let notes = if notes.trim().is_empty() {
                format!("Assigned to {}", assignee.name)
            } else {
                notes.clone()
            };
            complaint.record_transition(ComplaintStatus::InProgress, &actor.id, notes);
            Ok(None)
        })
    }

    /// Administrative status change. Submitted, Escalated, Resolved and
    /// Closed are owned by dedicated operations and cannot be reached
    /// this way.
    pub fn update_status(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        status: ComplaintStatus,
        notes: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let notes = notes.into();

        self.transition(actor_id, complaint_id, Operation::UpdateStatus, |complaint, actor| {
            if !matches!(
                status,
                ComplaintStatus::Verified
                    | ComplaintStatus::InProgress
                    | ComplaintStatus::Reopened
            ) {
                return Err(BccmsError::ValidationError(format!(
                    "status {} cannot be set directly",
                    status
                )));
            }
            complaint.record_transition(status, &actor.id, notes.clone());
            Ok(Some((
                EventKind::StatusUpdate,
                format!("status has been updated to: {}", status),
            )))
        })
    }

    /// Record a resolution and move the complaint to Resolved.
    pub fn resolve(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        resolution: impl Into<String>,
    ) -> BccmsResult<Complaint> {
        let resolution = resolution.into();

        self.transition(actor_id, complaint_id, Operation::Resolve, |complaint, actor| {
            if resolution.trim().is_empty() {
                return Err(BccmsError::ValidationError(
                    "resolution text must not be empty".into(),
                ));
            }
            complaint.set_resolution(resolution.clone());
            complaint.record_transition(
                ComplaintStatus::Resolved,
                &actor.id,
                format!("Resolved: {}", resolution),
            );
            Ok(Some((EventKind::Resolution, "has been resolved".to_string())))
        })
    }

    // ── Internal plumbing ────────────────────────────────────────────

    /// Shared transition skeleton: actor lookup, role gate, per-id lock,
    /// state table check, then the operation body. The body returns an
    /// optional (kind, phrase) notification for the submitter.
    fn transition(
        &self,
        actor_id: &UserId,
        complaint_id: &ComplaintId,
        operation: Operation,
        apply: impl FnOnce(&mut Complaint, &User) -> BccmsResult<Option<(EventKind, String)>>,
    ) -> BccmsResult<Complaint> {
        let actor = self.registry.get_user(actor_id)?;
        let handle = self.registry.complaint_handle(complaint_id)?;
        let mut complaint = handle.lock().map_err(|_| BccmsError::LockPoisoned)?;

        check_role(operation, actor.role, complaint.submitter == actor.id)?;
        check_state(complaint.status, operation)?;

        let notification = apply(&mut complaint, &actor)?;

        tracing::info!(
            complaint_id = %complaint.id,
            operation = %operation,
            status = %complaint.status,
            actor = %actor.id,
            "Complaint transition"
        );

        // Release the per-complaint lock before dispatching; a slow
        // dispatcher must not extend the critical section.
        let snapshot = complaint.clone();
        drop(complaint);

        if let Some((kind, phrase)) = notification {
            let code = snapshot
                .tracking_code
                .as_ref()
                .map(|c| c.to_string())
                .unwrap_or_else(|| snapshot.id.to_string());
            self.notify(
                kind,
                &snapshot.submitter,
                format!("Your complaint ({}) {}", code, phrase),
            );
        }

        Ok(snapshot)
    }

    /// Hand a notification to the dispatcher. Fire-and-forget: a drop is
    /// logged and the transition stands.
    fn notify(&self, kind: EventKind, recipient: &UserId, content: String) {
        let notification = Notification::new(kind, recipient.clone(), content);
        match self.dispatcher.notify(notification) {
            DeliveryResult::Queued => {}
            DeliveryResult::Dropped(reason) => {
                tracing::warn!(kind = %kind, recipient = %recipient, %reason, "Notification dropped");
            }
        }
    }
}
