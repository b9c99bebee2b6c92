use tracing::{debug, warn};

use shared_models::entities::AppointmentStatus;
use shared_models::error::SchedulingError;

/// All valid next statuses for a given current status.
pub fn valid_transitions(current: AppointmentStatus) -> Vec<AppointmentStatus> {
    match current {
        AppointmentStatus::Scheduled => vec![
            AppointmentStatus::Cancelled,
            AppointmentStatus::Completed,
        ],
        // Terminal states - no transitions allowed
        AppointmentStatus::Cancelled => vec![],
        AppointmentStatus::Completed => vec![],
    }
}

/// Validate that a status transition is allowed.
pub fn validate_transition(
    current: AppointmentStatus,
    next: AppointmentStatus,
) -> Result<(), SchedulingError> {
    debug!("Validating status transition from {} to {}", current, next);

    if !valid_transitions(current).contains(&next) {
        warn!("Invalid status transition attempted: {} -> {}", current, next);
        return Err(SchedulingError::InvalidTransition(current));
    }

    Ok(())
}
