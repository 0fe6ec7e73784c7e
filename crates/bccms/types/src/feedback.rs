//! Resident feedback on a resolved complaint

use crate::{ComplaintId, FeedbackId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valid rating bounds, inclusive
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Whether the resident considered the resolution adequate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Satisfaction {
    Satisfied,
    Unsatisfied,
}

impl std::fmt::Display for Satisfaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Satisfaction::Satisfied => "Satisfied",
            Satisfaction::Unsatisfied => "Unsatisfied",
        };
        write!(f, "{}", name)
    }
}

/// Feedback submitted by the original complainant after a resolution.
///
/// At most one per complaint at a time; a fresh submission after a
/// reopen cycle replaces the previous record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feedback {
    /// Unique identifier
    pub id: FeedbackId,
    /// The complaint this feedback is about
    pub complaint_id: ComplaintId,
    /// Rating between [`MIN_RATING`] and [`MAX_RATING`]
    pub rating: u8,
    /// Free-text comment
    pub comment: String,
    /// The resident who submitted it
    pub submitted_by: UserId,
    /// When it was submitted
    pub submitted_at: DateTime<Utc>,
    /// Whether the resolution was adequate
    pub satisfaction: Satisfaction,
}

impl Feedback {
    pub fn new(
        complaint_id: ComplaintId,
        rating: u8,
        comment: impl Into<String>,
        submitted_by: UserId,
        satisfaction: Satisfaction,
    ) -> Self {
        Self {
            id: FeedbackId::generate(),
            complaint_id,
            rating,
            comment: comment.into(),
            submitted_by,
            submitted_at: Utc::now(),
            satisfaction,
        }
    }

    pub fn satisfaction(&self) -> Satisfaction {
        self.satisfaction
    }

    /// Whether a rating is within the accepted bounds
    pub fn rating_in_range(rating: u8) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&rating)
    }
}
