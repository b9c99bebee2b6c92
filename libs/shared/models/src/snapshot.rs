use serde::{Deserialize, Serialize};

use crate::entities::{Appointment, Practitioner, User};

/// Bumped whenever the snapshot layout changes shape; the persistence
/// gateway rejects artifacts written with a different version.
pub const SCHEMA_VERSION: u32 = 1;

/// The complete system state as one durable unit. Id counters are not
/// stored; each store reinitializes its counter to max-seen + 1 on restore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSnapshot {
    pub schema_version: u32,
    pub users: Vec<User>,
    pub practitioners: Vec<Practitioner>,
    pub appointments: Vec<Appointment>,
}

impl SystemSnapshot {
    pub fn new(
        users: Vec<User>,
        practitioners: Vec<Practitioner>,
        appointments: Vec<Appointment>,
    ) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            users,
            practitioners,
            appointments,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}
