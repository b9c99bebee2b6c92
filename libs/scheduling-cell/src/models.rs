use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use shared_models::entities::AppointmentStatus;

/// Request to create a practitioner: a user registration plus the
/// directory-facing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPractitioner {
    pub username: String,
    pub secret: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub specialization: String,
    /// First day of the generated slot catalogue.
    pub schedule_from: NaiveDate,
}

/// Optional filters over the full ledger. All present filters must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentSearchQuery {
    pub patient_id: Option<i64>,
    pub practitioner_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    /// Case-insensitive match against the reason, the practitioner's full
    /// name, or the appointment id.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStats {
    pub total: usize,
    pub scheduled: usize,
    pub cancelled: usize,
    pub completed: usize,
}

/// One catalogue slot cross-referenced against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub starts_at: NaiveDateTime,
    pub taken: bool,
}
