use std::sync::{PoisonError, RwLock};

use tracing::{debug, info, warn};

use shared_models::entities::User;
use shared_models::error::SchedulingError;

use crate::models::NewUser;
use crate::services::credentials;

#[derive(Debug)]
struct IdentityState {
    users: Vec<User>,
    next_id: i64,
}

/// Holds every user record (patients, practitioners, administrators) and
/// verifies credentials against the stored digests.
#[derive(Debug)]
pub struct IdentityStore {
    state: RwLock<IdentityState>,
}

impl IdentityStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(IdentityState {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Insert a new user. Usernames are unique under case-insensitive
    /// comparison; the check and the insert happen under one write lock.
    pub fn register(&self, new_user: NewUser) -> Result<User, SchedulingError> {
        let password_hash = credentials::hash_secret(&new_user.secret)
            .map_err(|e| SchedulingError::Credential(e.to_string()))?;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state
            .users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&new_user.username))
        {
            warn!("Rejecting registration for taken username {}", new_user.username);
            return Err(SchedulingError::DuplicateUsername(new_user.username));
        }

        let id = state.next_id;
        state.next_id += 1;

        let user = User {
            id,
            username: new_user.username,
            password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            email: new_user.email,
            role: new_user.role,
        };
        state.users.push(user.clone());

        info!("Registered user {} (id {})", user.username, user.id);
        Ok(user)
    }

    /// Case-insensitive exact match on username.
    pub fn find_by_username(&self, username: &str) -> Option<User> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned()
    }

    pub fn find_by_id(&self, id: i64) -> Option<User> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.users.iter().find(|u| u.id == id).cloned()
    }

    /// Recompute a digest from the supplied secret and compare to the stored
    /// one. Side-effect-free.
    pub fn verify_credential(&self, user: &User, secret: &str) -> Result<bool, SchedulingError> {
        credentials::verify_secret(secret, &user.password_hash)
            .map_err(|e| SchedulingError::Credential(e.to_string()))
    }

    /// Lookup plus verification. Unknown usernames and wrong secrets produce
    /// the same error so callers cannot tell which factor failed.
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<User, SchedulingError> {
        debug!("Authenticating {}", username);

        let user = self
            .find_by_username(username)
            .ok_or(SchedulingError::AuthenticationFailed)?;

        if self.verify_credential(&user, secret)? {
            Ok(user)
        } else {
            Err(SchedulingError::AuthenticationFailed)
        }
    }

    /// Defensive snapshot copy, insertion order.
    pub fn users(&self) -> Vec<User> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.users.clone()
    }

    /// Replace the store contents from a loaded snapshot. The id counter is
    /// reinitialized to one past the maximum id seen, so later allocations
    /// cannot collide.
    pub fn restore(&self, users: Vec<User>) {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.users = users;
        state.next_id = next_id;
    }
}

impl Default for IdentityStore {
    fn default() -> Self {
        Self::new()
    }
}
