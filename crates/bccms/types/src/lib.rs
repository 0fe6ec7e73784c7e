//! Domain types for the Barangay Complaint and Case Management System
//!
//! # Key Concepts
//!
//! - **Complaint**: the central aggregate — lifecycle status, escalation
//!   markers, evidence attachments, and an append-only audit trail.
//! - **StatusUpdate**: one immutable audit entry per workflow operation;
//!   the complaint's history is never reordered or truncated.
//! - **User / Role**: a single user record with a role enumeration
//!   instead of an actor class hierarchy. Roles gate workflow operations.
//! - **Feedback**: the resident's verdict on a resolution; satisfied
//!   feedback closes the complaint, unsatisfied feedback reopens it.
//! - **Notification / Message**: ephemeral output events handed to a
//!   dispatcher, never part of complaint state.
//!
//! # Design Principles
//!
//! 1. Complaints are mutated only through the workflow engine; these
//!    types provide the shapes and the audit plumbing, not the rules.
//! 2. Every transition leaves an audit entry, including ones that keep
//!    the status unchanged.
//! 3. Complaints are never deleted, only closed.

#![deny(unsafe_code)]

mod complaint;
mod errors;
mod feedback;
mod ids;
mod notification;
mod user;

pub use complaint::*;
pub use errors::*;
pub use feedback::*;
pub use ids::*;
pub use notification::*;
pub use user::*;
