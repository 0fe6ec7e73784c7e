//! Users and roles
//!
//! A user is a single record with a [`Role`]; everything role-specific
//! is expressed as predicates here or as gate checks in the workflow
//! engine.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authority level of a user within the barangay hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// A resident of the barangay; submits complaints and feedback
    Resident,
    /// Barangay officer; verifies, assesses and processes complaints
    BarangayOfficer,
    /// Barangay captain; handles escalated complaints and decides scope
    BarangayCaptain,
    /// Municipal official; handles complaints escalated past the barangay
    MunicipalOfficial,
}

impl Role {
    /// Any role other than Resident
    pub fn is_official(&self) -> bool {
        !matches!(self, Role::Resident)
    }

    /// Roles allowed to escalate or process a complaint
    pub fn can_process(&self) -> bool {
        matches!(self, Role::BarangayOfficer | Role::BarangayCaptain)
    }

    /// Roles allowed to take over an escalated complaint
    pub fn can_handle_escalation(&self) -> bool {
        matches!(self, Role::BarangayCaptain | Role::MunicipalOfficial)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::Resident => "Resident",
            Role::BarangayOfficer => "Barangay Officer",
            Role::BarangayCaptain => "Barangay Captain",
            Role::MunicipalOfficial => "Municipal Official",
        };
        write!(f, "{}", name)
    }
}

/// A registered user of the system
///
/// Owned by the registry; complaints and status updates reference users
/// by id only. The role is fixed at creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Contact information (phone, email, address — free-form)
    pub contact_info: String,
    /// Authority level; immutable after creation
    pub role: Role,
    /// When the user was registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record
    pub fn new(name: impl Into<String>, contact_info: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            contact_info: contact_info.into(),
            role,
            created_at: Utc::now(),
        }
    }

    /// Replace the generated id, e.g. with one minted by the registry's
    /// identifier generator
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// Apply a profile update. Only whitelisted fields change; the role
    /// and id never do.
    pub fn apply_profile_update(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(contact_info) = update.contact_info {
            self.contact_info = contact_info;
        }
    }
}

/// The set of user fields that may change after creation
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub contact_info: Option<String>,
}

impl ProfileUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn contact_info(mut self, contact_info: impl Into<String>) -> Self {
        self.contact_info = Some(contact_info.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_predicates() {
        assert!(!Role::Resident.is_official());
        assert!(Role::BarangayOfficer.is_official());
        assert!(Role::BarangayCaptain.can_process());
        assert!(!Role::MunicipalOfficial.can_process());
        assert!(Role::MunicipalOfficial.can_handle_escalation());
        assert!(!Role::BarangayOfficer.can_handle_escalation());
    }

    #[test]
    fn test_profile_update_whitelist() {
        let mut user = User::new("John Doe", "123456789", Role::Resident);
        let original_id = user.id.clone();

        user.apply_profile_update(
            ProfileUpdate::default()
                .name("Juan Dela Cruz")
                .contact_info("987654321"),
        );

        assert_eq!(user.name, "Juan Dela Cruz");
        assert_eq!(user.contact_info, "987654321");
        assert_eq!(user.id, original_id);
        assert_eq!(user.role, Role::Resident);
    }

    #[test]
    fn test_partial_profile_update() {
        let mut user = User::new("Officer Smith", "555-0001", Role::BarangayOfficer);
        user.apply_profile_update(ProfileUpdate::default().contact_info("555-0002"));
        assert_eq!(user.name, "Officer Smith");
        assert_eq!(user.contact_info, "555-0002");
    }
}
