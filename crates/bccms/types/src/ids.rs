//! Typed identifiers for BCCMS entities
//!
//! Every entity gets its own identifier newtype so a complaint id can
//! never be passed where a user id is expected. Tracking codes are a
//! separate, human-facing concept issued by the registry.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn short(&self) -> String {
                self.0.chars().take(8).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user
    UserId
);

entity_id!(
    /// Unique identifier for a complaint (internal; see [`TrackingCode`]
    /// for the human-facing identifier)
    ComplaintId
);

entity_id!(
    /// Unique identifier for an evidence attachment
    EvidenceId
);

entity_id!(
    /// Unique identifier for a status update audit record
    StatusUpdateId
);

entity_id!(
    /// Unique identifier for a feedback record
    FeedbackId
);

entity_id!(
    /// Unique identifier for a notification or message
    NotificationId
);

/// Human-facing complaint tracking code, e.g. `BCCMS-1000`.
///
/// Issued once at registration and stable for the complaint's lifetime.
/// Codes are sequential per deployment and never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingCode(pub String);

impl TrackingCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Compose a code from a deployment prefix and a sequence number
    pub fn compose(prefix: &str, sequence: u64) -> Self {
        Self(format!("{}-{}", prefix, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TrackingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
