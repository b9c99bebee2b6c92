use thiserror::Error;

use crate::entities::AppointmentStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("User not found")]
    UserNotFound,

    #[error("Practitioner not found")]
    PractitionerNotFound,

    #[error("Appointment not found")]
    AppointmentNotFound,

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Practitioner already has an appointment at that time")]
    SlotConflict,

    #[error("Appointment cannot be modified in current status: {0}")]
    InvalidTransition(AppointmentStatus),

    #[error("Practitioner still has scheduled appointments")]
    PractitionerHasScheduledAppointments,

    #[error("Invalid username or password")]
    AuthenticationFailed,

    #[error("Credential hashing failed: {0}")]
    Credential(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}
