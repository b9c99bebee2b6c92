use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Directory entry under construction. The practitioner id is allocated by
/// the directory ahead of time (`PractitionerDirectory::next_id`) so the
/// matching user record can carry it before the entry is inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PractitionerRecord {
    pub practitioner_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialization: String,
    /// First day of the generated slot catalogue.
    pub schedule_from: NaiveDate,
}
