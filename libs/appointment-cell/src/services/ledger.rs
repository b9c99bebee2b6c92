use std::sync::{PoisonError, RwLock};

use chrono::NaiveDateTime;
use tracing::{info, warn};

use shared_models::entities::{Appointment, AppointmentStatus};
use shared_models::error::SchedulingError;

use crate::services::lifecycle;

#[derive(Debug)]
struct LedgerState {
    appointments: Vec<Appointment>,
    next_id: i64,
}

/// Append-only ledger of appointments. Records are created only through
/// `book` and mutated only through the cancel/complete transitions; nothing
/// is ever deleted.
#[derive(Debug)]
pub struct AppointmentLedger {
    state: RwLock<LedgerState>,
}

impl AppointmentLedger {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerState {
                appointments: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Book a slot. The conflict scan and the insert run under one write
    /// lock so two racing callers cannot both pass the scan. Equality on the
    /// timestamp is exact; the requested time is deliberately not checked
    /// against the practitioner's catalogue or the clock.
    pub fn book(
        &self,
        patient_id: i64,
        practitioner_id: i64,
        scheduled_at: NaiveDateTime,
        reason: &str,
    ) -> Result<Appointment, SchedulingError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let conflict = state.appointments.iter().any(|a| {
            a.status == AppointmentStatus::Scheduled
                && a.practitioner_id == practitioner_id
                && a.scheduled_at == scheduled_at
        });
        if conflict {
            warn!(
                "Booking conflict for practitioner {} at {}",
                practitioner_id, scheduled_at
            );
            return Err(SchedulingError::SlotConflict);
        }

        let id = state.next_id;
        state.next_id += 1;

        let appointment = Appointment {
            id,
            patient_id,
            practitioner_id,
            scheduled_at,
            reason: reason.to_string(),
            status: AppointmentStatus::Scheduled,
        };
        state.appointments.push(appointment.clone());

        info!(
            "Appointment {} booked with practitioner {} at {}",
            id, practitioner_id, scheduled_at
        );
        Ok(appointment)
    }

    /// SCHEDULED -> CANCELLED. The freed slot becomes bookable again.
    pub fn cancel(&self, id: i64) -> Result<Appointment, SchedulingError> {
        self.transition(id, AppointmentStatus::Cancelled)
    }

    /// SCHEDULED -> COMPLETED.
    pub fn complete(&self, id: i64) -> Result<Appointment, SchedulingError> {
        self.transition(id, AppointmentStatus::Completed)
    }

    fn transition(
        &self,
        id: i64,
        next: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let appointment = state
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(SchedulingError::AppointmentNotFound)?;

        lifecycle::validate_transition(appointment.status, next)?;
        appointment.status = next;

        info!("Appointment {} is now {}", id, next);
        Ok(appointment.clone())
    }

    pub fn find_by_id(&self, id: i64) -> Option<Appointment> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.appointments.iter().find(|a| a.id == id).cloned()
    }

    /// Linear filter over the full ledger, insertion order.
    pub fn for_patient(&self, patient_id: i64) -> Vec<Appointment> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }

    /// Linear filter over the full ledger, insertion order.
    pub fn for_practitioner(&self, practitioner_id: i64) -> Vec<Appointment> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .appointments
            .iter()
            .filter(|a| a.practitioner_id == practitioner_id)
            .cloned()
            .collect()
    }

    /// Whether any SCHEDULED appointment still references the practitioner.
    pub fn has_scheduled_for_practitioner(&self, practitioner_id: i64) -> bool {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.appointments.iter().any(|a| {
            a.practitioner_id == practitioner_id && a.status == AppointmentStatus::Scheduled
        })
    }

    /// Defensive snapshot copy, insertion order.
    pub fn all(&self) -> Vec<Appointment> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.appointments.clone()
    }

    /// Replace the ledger contents from a loaded snapshot, reinitializing
    /// the id counter past the highest id seen.
    pub fn restore(&self, appointments: Vec<Appointment>) {
        let next_id = appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.appointments = appointments;
        state.next_id = next_id;
    }
}

impl Default for AppointmentLedger {
    fn default() -> Self {
        Self::new()
    }
}
