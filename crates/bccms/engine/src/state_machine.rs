//! The complaint state machine: which operation is legal from which
//! status, and who may perform it
//!
//! Pure decision logic with no storage access. The engine consults the
//! role gate first and the state table second, so a role violation is
//! reported as `PermissionDenied` even when the state would also have
//! been wrong.

use bccms_types::{BccmsError, BccmsResult, ComplaintStatus, Role};

/// A workflow operation on a complaint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// File a new complaint (creation; no source state)
    Submit,
    /// Attach an evidence file
    AddEvidence,
    /// Confirm the complaint as valid
    Verify,
    /// Dismiss the complaint as invalid
    Reject,
    /// Record an urgency assessment; status is unchanged but audited
    AssessUrgency,
    /// Raise the complaint to captain or municipal authority
    Escalate,
    /// Captain/municipal takeover of an escalated complaint
    HandleEscalation,
    /// Assign the complaint and start (or continue) work
    Process,
    /// Administrative status change with notes
    UpdateStatus,
    /// Record a resolution
    Resolve,
    /// Resident verdict on the resolution
    SubmitFeedback,
    /// Resident asks for more work after a resolution
    RequestFurtherAction,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Submit => "submit",
            Operation::AddEvidence => "add_evidence",
            Operation::Verify => "verify",
            Operation::Reject => "reject",
            Operation::AssessUrgency => "assess_urgency",
            Operation::Escalate => "escalate",
            Operation::HandleEscalation => "handle_escalation",
            Operation::Process => "process",
            Operation::UpdateStatus => "update_status",
            Operation::Resolve => "resolve",
            Operation::SubmitFeedback => "submit_feedback",
            Operation::RequestFurtherAction => "request_further_action",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The statuses an operation may be invoked from
pub fn allowed_sources(operation: Operation) -> &'static [ComplaintStatus] {
    use ComplaintStatus::*;
    match operation {
        Operation::Submit => &[],
        Operation::AddEvidence => &[Submitted, Verified, InProgress, Escalated, Resolved, Reopened],
        Operation::Verify => &[Submitted],
        Operation::Reject => &[Submitted, Verified],
        Operation::AssessUrgency => &[Verified],
        Operation::Escalate => &[Verified, InProgress],
        Operation::HandleEscalation => &[Escalated],
        Operation::Process => &[Verified, InProgress, Escalated],
        Operation::UpdateStatus => &[Submitted, Verified, InProgress, Escalated, Resolved, Reopened],
        Operation::Resolve => &[InProgress, Escalated],
        Operation::SubmitFeedback => &[Resolved],
        Operation::RequestFurtherAction => &[Resolved],
    }
}

/// Check that `operation` is legal from `status`.
///
/// Fails with `InvalidTransition` and names the offending operation;
/// nothing is mutated on failure.
pub fn check_state(status: ComplaintStatus, operation: Operation) -> BccmsResult<()> {
    if allowed_sources(operation).contains(&status) {
        Ok(())
    } else {
        Err(BccmsError::InvalidTransition {
            status,
            operation: operation.name().to_string(),
        })
    }
}

/// Check that an actor with `role` may perform `operation`.
///
/// `is_submitter` is whether the actor filed the complaint; resident
/// operations are restricted to the original submitter.
pub fn check_role(operation: Operation, role: Role, is_submitter: bool) -> BccmsResult<()> {
    let permitted = match operation {
        Operation::Submit => role == Role::Resident,
        // The submitter and any official may attach evidence
        Operation::AddEvidence => role.is_official() || is_submitter,
        Operation::Verify | Operation::Reject | Operation::AssessUrgency => {
            role == Role::BarangayOfficer
        }
        Operation::Escalate | Operation::Process => role.can_process(),
        Operation::HandleEscalation => role.can_handle_escalation(),
        Operation::UpdateStatus | Operation::Resolve => role.is_official(),
        Operation::SubmitFeedback | Operation::RequestFurtherAction => {
            role == Role::Resident && is_submitter
        }
    };

    if permitted {
        Ok(())
    } else {
        Err(BccmsError::PermissionDenied {
            role,
            operation: operation.name().to_string(),
        })
    }
}
