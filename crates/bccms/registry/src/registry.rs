//! The directory: id → entity maps for users and complaints
//!
//! The registry owns user records and complaint storage and answers
//! lookups, including by tracking code. It performs no role checks —
//! that is the workflow engine's job. Each complaint sits behind its own
//! mutex so the engine can serialize transitions per complaint while
//! operations on different complaints proceed in parallel.

use crate::{IdGenerator, TrackingCodeIssuer, UuidIdGenerator};
use bccms_types::{
    BccmsError, BccmsResult, Complaint, ComplaintId, ProfileUpdate, Role, TrackingCode, User,
    UserId,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// A complaint guarded by its per-id critical section
pub type ComplaintHandle = Arc<Mutex<Complaint>>;

/// In-memory directory of users and complaints
pub struct Registry {
    users: RwLock<HashMap<UserId, User>>,
    complaints: RwLock<HashMap<ComplaintId, ComplaintHandle>>,
    /// Tracking code → complaint id index
    by_code: RwLock<HashMap<TrackingCode, ComplaintId>>,
    ids: Arc<dyn IdGenerator>,
    tracking: TrackingCodeIssuer,
}

impl Registry {
    /// Create a registry with UUID identifiers and the default
    /// tracking-code sequence
    pub fn new() -> Self {
        Self::with_generators(Arc::new(UuidIdGenerator), TrackingCodeIssuer::default())
    }

    /// Create a registry with an injected identifier generator and
    /// tracking-code issuer
    pub fn with_generators(ids: Arc<dyn IdGenerator>, tracking: TrackingCodeIssuer) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            complaints: RwLock::new(HashMap::new()),
            by_code: RwLock::new(HashMap::new()),
            ids,
            tracking,
        }
    }

    /// Mint a fresh complaint id from the injected generator
    pub fn next_complaint_id(&self) -> ComplaintId {
        ComplaintId::new(self.ids.next_id())
    }

    // ── Users ────────────────────────────────────────────────────────

    /// Create and store a user record, minting its id
    pub fn register_user(
        &self,
        name: impl Into<String>,
        contact_info: impl Into<String>,
        role: Role,
    ) -> BccmsResult<User> {
        let user =
            User::new(name, contact_info, role).with_id(UserId::new(self.ids.next_id()));

        let mut users = self.users.write().map_err(|_| BccmsError::LockPoisoned)?;
        users.insert(user.id.clone(), user.clone());

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Look up a user by id
    pub fn get_user(&self, id: &UserId) -> BccmsResult<User> {
        let users = self.users.read().map_err(|_| BccmsError::LockPoisoned)?;
        users
            .get(id)
            .cloned()
            .ok_or_else(|| BccmsError::UserNotFound(id.clone()))
    }

    /// Apply a whitelisted profile update and return the updated record
    pub fn update_profile(&self, id: &UserId, update: ProfileUpdate) -> BccmsResult<User> {
        let mut users = self.users.write().map_err(|_| BccmsError::LockPoisoned)?;
        let user = users
            .get_mut(id)
            .ok_or_else(|| BccmsError::UserNotFound(id.clone()))?;
        user.apply_profile_update(update);
        Ok(user.clone())
    }

    /// Number of registered users
    pub fn user_count(&self) -> usize {
        self.users.read().map(|u| u.len()).unwrap_or(0)
    }

    // ── Complaints ───────────────────────────────────────────────────

    /// Store a complaint, assigning its tracking code.
    ///
    /// The code is issued here, indexed, and stable for the complaint's
    /// lifetime.
    pub fn register_complaint(&self, mut complaint: Complaint) -> BccmsResult<TrackingCode> {
        let code = self.tracking.issue();
        complaint.tracking_code = Some(code.clone());
        let id = complaint.id.clone();

        {
            let mut complaints = self
                .complaints
                .write()
                .map_err(|_| BccmsError::LockPoisoned)?;
            complaints.insert(id.clone(), Arc::new(Mutex::new(complaint)));
        }
        {
            let mut by_code = self.by_code.write().map_err(|_| BccmsError::LockPoisoned)?;
            by_code.insert(code.clone(), id.clone());
        }

        tracing::info!(complaint_id = %id, tracking_code = %code, "Complaint registered");
        Ok(code)
    }

    /// Get the lock handle for a complaint. Holding the lock is the
    /// per-complaint critical section; all mutation goes through it.
    pub fn complaint_handle(&self, id: &ComplaintId) -> BccmsResult<ComplaintHandle> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| BccmsError::LockPoisoned)?;
        complaints
            .get(id)
            .cloned()
            .ok_or_else(|| BccmsError::ComplaintNotFound(id.to_string()))
    }

    /// Snapshot a complaint's current state by id
    pub fn get_complaint(&self, id: &ComplaintId) -> BccmsResult<Complaint> {
        let handle = self.complaint_handle(id)?;
        let complaint = handle.lock().map_err(|_| BccmsError::LockPoisoned)?;
        Ok(complaint.clone())
    }

    /// Resolve a tracking code to the internal complaint id
    pub fn resolve_tracking_code(&self, code: &TrackingCode) -> BccmsResult<ComplaintId> {
        let by_code = self.by_code.read().map_err(|_| BccmsError::LockPoisoned)?;
        by_code
            .get(code)
            .cloned()
            .ok_or_else(|| BccmsError::ComplaintNotFound(code.to_string()))
    }

    /// Snapshot a complaint's current state by tracking code
    pub fn get_by_tracking_code(&self, code: &TrackingCode) -> BccmsResult<Complaint> {
        let id = self.resolve_tracking_code(code)?;
        self.get_complaint(&id)
    }

    /// All complaints filed by a given resident, in submission order
    pub fn list_by_submitter(&self, user_id: &UserId) -> BccmsResult<Vec<Complaint>> {
        self.filter_complaints(|c| &c.submitter == user_id)
    }

    /// All complaints currently assigned to a given user, in submission
    /// order
    pub fn list_by_assignee(&self, user_id: &UserId) -> BccmsResult<Vec<Complaint>> {
        self.filter_complaints(|c| c.assignee.as_ref() == Some(user_id))
    }

    /// Number of registered complaints
    pub fn complaint_count(&self) -> usize {
        self.complaints.read().map(|c| c.len()).unwrap_or(0)
    }

    fn filter_complaints(
        &self,
        predicate: impl Fn(&Complaint) -> bool,
    ) -> BccmsResult<Vec<Complaint>> {
        let complaints = self
            .complaints
            .read()
            .map_err(|_| BccmsError::LockPoisoned)?;
        let mut matching = Vec::new();
        for handle in complaints.values() {
            let complaint = handle.lock().map_err(|_| BccmsError::LockPoisoned)?;
            if predicate(&complaint) {
                matching.push(complaint.clone());
            }
        }
        matching.sort_by_key(|c| c.submitted_at);
        Ok(matching)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
