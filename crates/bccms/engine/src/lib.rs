//! BCCMS Workflow Engine
//!
//! Enforces the complaint lifecycle:
//!
//! ```text
//! Submitted -> Verified -> InProgress <-> Escalated -> Resolved -> Closed
//!                                          (Resolved -> Reopened -> InProgress)
//! ```
//!
//! with an invalid-complaint shortcut from Submitted/Verified straight
//! to Closed.
//!
//! # Key Concepts
//!
//! - **StateMachine** (`state_machine`): the pure transition table and
//!   role gate. Role violations are reported before state violations.
//! - **Policy** (`policy`): advisory SLA deadlines per urgency and the
//!   deterministic captain scope decision.
//! - **NotificationDispatcher** (`dispatcher`): where transition events
//!   go. Dispatch is a non-blocking enqueue; delivery failures never
//!   roll back a transition.
//! - **WorkflowEngine** (`engine`): the facade. The only code that
//!   mutates complaints, one per-complaint critical section at a time.
//!
//! # Design Principles
//!
//! 1. Validation (role, then state, then fields) completes fully before
//!    any mutation; a failed operation leaves the complaint untouched.
//! 2. Every transition appends exactly one audit entry, including
//!    status-preserving operations like an urgency assessment.
//! 3. Operations on different complaints proceed in parallel; two
//!    operations on the same complaint are serialized.

#![deny(unsafe_code)]

mod dispatcher;
mod engine;
mod policy;
mod state_machine;

pub use dispatcher::*;
pub use engine::*;
pub use policy::*;
pub use state_machine::*;
