use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// USER MODEL
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The practitioner-scoped id when this user is a practitioner.
    pub fn practitioner_id(&self) -> Option<i64> {
        match self.role {
            Role::Practitioner { practitioner_id } => Some(practitioner_id),
            _ => None,
        }
    }

    pub fn is_patient(&self) -> bool {
        matches!(self.role, Role::Patient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Administrator,
    Practitioner { practitioner_id: i64 },
}

// ==============================================================================
// PRACTITIONER MODEL
// ==============================================================================

/// Directory-owned practitioner record. The matching user record carries
/// `Role::Practitioner { practitioner_id }` as the cross-reference key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Practitioner {
    pub practitioner_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    /// Fixed slot catalogue generated at creation, never replenished.
    /// Availability is computed against the ledger, not by mutating this list.
    pub offered_slots: Vec<NaiveDateTime>,
}

impl Practitioner {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ==============================================================================
// APPOINTMENT MODEL
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub practitioner_id: i64,
    pub scheduled_at: NaiveDateTime,
    pub reason: String,
    pub status: AppointmentStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Cancelled and completed appointments never leave those states.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}
