use std::path::Path;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use appointment_cell::services::ledger::AppointmentLedger;
use identity_cell::models::NewUser;
use identity_cell::services::store::IdentityStore;
use practitioner_cell::models::PractitionerRecord;
use practitioner_cell::services::directory::PractitionerDirectory;
use shared_config::AppConfig;
use shared_models::entities::{Appointment, AppointmentStatus, Practitioner, Role, User};
use shared_models::error::SchedulingError;
use shared_models::snapshot::SystemSnapshot;

use crate::models::{AppointmentSearchQuery, AppointmentStats, NewPractitioner, SlotView};
use crate::services::notifications::NotificationCenter;

/// Facade over the identity store, practitioner directory, and appointment
/// ledger. Callers (any UI or API layer) go through here; the stores are not
/// reachable individually.
#[derive(Debug, Default)]
pub struct SchedulingService {
    identity: IdentityStore,
    directory: PractitionerDirectory,
    ledger: AppointmentLedger,
    notifications: NotificationCenter,
}

impl SchedulingService {
    pub fn new() -> Self {
        Self {
            identity: IdentityStore::new(),
            directory: PractitionerDirectory::new(),
            ledger: AppointmentLedger::new(),
            notifications: NotificationCenter::new(),
        }
    }

    // --------------------------------------------------------------------
    // Identity
    // --------------------------------------------------------------------

    pub fn register_user(&self, new_user: NewUser) -> Result<User, SchedulingError> {
        self.identity.register(new_user)
    }

    pub fn find_user(&self, username: &str) -> Option<User> {
        self.identity.find_by_username(username)
    }

    pub fn verify_credential(&self, user: &User, secret: &str) -> Result<bool, SchedulingError> {
        self.identity.verify_credential(user, secret)
    }

    pub fn authenticate(&self, username: &str, secret: &str) -> Result<User, SchedulingError> {
        self.identity.authenticate(username, secret)
    }

    pub fn users(&self) -> Vec<User> {
        self.identity.users()
    }

    // --------------------------------------------------------------------
    // Practitioners
    // --------------------------------------------------------------------

    /// Register a practitioner as both a user and a directory entry. The
    /// directory id is allocated first so the user record can carry it; the
    /// entry itself is only inserted once registration has succeeded, so a
    /// duplicate username leaves no directory residue.
    pub fn add_practitioner(
        &self,
        request: NewPractitioner,
    ) -> Result<Practitioner, SchedulingError> {
        let practitioner_id = self.directory.next_id();

        let user = self.identity.register(NewUser {
            username: request.username,
            secret: request.secret,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
            email: request.email,
            role: Role::Practitioner { practitioner_id },
        })?;

        let practitioner = self.directory.add(PractitionerRecord {
            practitioner_id,
            user_id: user.id,
            first_name: request.first_name,
            last_name: request.last_name,
            specialization: request.specialization,
            schedule_from: request.schedule_from,
        });

        Ok(practitioner)
    }

    /// Remove a practitioner by practitioner-scoped id. Refused while any
    /// SCHEDULED appointment still references them; cancel those first.
    /// Returns false when no such practitioner exists.
    pub fn remove_practitioner(&self, practitioner_id: i64) -> Result<bool, SchedulingError> {
        if self.ledger.has_scheduled_for_practitioner(practitioner_id) {
            warn!(
                "Refusing to remove practitioner {} with scheduled appointments",
                practitioner_id
            );
            return Err(SchedulingError::PractitionerHasScheduledAppointments);
        }

        Ok(self.directory.remove(practitioner_id))
    }

    pub fn find_practitioner(&self, practitioner_id: i64) -> Option<Practitioner> {
        self.directory.find(practitioner_id)
    }

    pub fn list_practitioners(&self) -> Vec<Practitioner> {
        self.directory.list()
    }

    /// The practitioner's fixed catalogue cross-referenced against the
    /// ledger: a slot is taken while a SCHEDULED appointment sits on its
    /// exact timestamp. Availability is computed, never stored.
    pub fn practitioner_schedule(
        &self,
        practitioner_id: i64,
    ) -> Result<Vec<SlotView>, SchedulingError> {
        let practitioner = self
            .directory
            .find(practitioner_id)
            .ok_or(SchedulingError::PractitionerNotFound)?;

        let booked: Vec<Appointment> = self
            .ledger
            .for_practitioner(practitioner_id)
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .collect();

        Ok(practitioner
            .offered_slots
            .iter()
            .map(|slot| SlotView {
                starts_at: *slot,
                taken: booked.iter().any(|a| a.scheduled_at == *slot),
            })
            .collect())
    }

    // --------------------------------------------------------------------
    // Appointments
    // --------------------------------------------------------------------

    /// Book an appointment for a patient with a practitioner. The actors are
    /// validated here; the conflict check and insert are atomic inside the
    /// ledger. Any timestamp is accepted, including ones outside the
    /// practitioner's catalogue.
    pub fn book_appointment(
        &self,
        patient_id: i64,
        practitioner_id: i64,
        scheduled_at: NaiveDateTime,
        reason: &str,
    ) -> Result<Appointment, SchedulingError> {
        let patient = self
            .identity
            .find_by_id(patient_id)
            .filter(User::is_patient)
            .ok_or(SchedulingError::UserNotFound)?;

        let practitioner = self
            .directory
            .find(practitioner_id)
            .ok_or(SchedulingError::PractitionerNotFound)?;

        let appointment = self
            .ledger
            .book(patient.id, practitioner_id, scheduled_at, reason)?;

        self.notifications.record(&format!(
            "New appointment #{}: {} with {} at {}",
            appointment.id,
            patient.full_name(),
            practitioner.full_name(),
            scheduled_at.format("%Y-%m-%d %H:%M")
        ));
        Ok(appointment)
    }

    pub fn cancel_appointment(&self, id: i64) -> Result<Appointment, SchedulingError> {
        let appointment = self.ledger.cancel(id)?;
        self.notifications
            .record(&format!("Appointment #{} cancelled", id));
        Ok(appointment)
    }

    pub fn complete_appointment(&self, id: i64) -> Result<Appointment, SchedulingError> {
        let appointment = self.ledger.complete(id)?;
        self.notifications
            .record(&format!("Appointment #{} marked completed", id));
        Ok(appointment)
    }

    pub fn find_appointment(&self, id: i64) -> Option<Appointment> {
        self.ledger.find_by_id(id)
    }

    pub fn appointments_for_patient(&self, patient_id: i64) -> Vec<Appointment> {
        self.ledger.for_patient(patient_id)
    }

    pub fn appointments_for_practitioner(&self, practitioner_id: i64) -> Vec<Appointment> {
        self.ledger.for_practitioner(practitioner_id)
    }

    pub fn search_appointments(&self, query: &AppointmentSearchQuery) -> Vec<Appointment> {
        self.ledger
            .all()
            .into_iter()
            .filter(|a| {
                query.patient_id.map_or(true, |id| a.patient_id == id)
                    && query
                        .practitioner_id
                        .map_or(true, |id| a.practitioner_id == id)
                    && query.status.map_or(true, |s| a.status == s)
                    && query
                        .text
                        .as_deref()
                        .map_or(true, |text| self.matches_text(a, text))
            })
            .collect()
    }

    fn matches_text(&self, appointment: &Appointment, text: &str) -> bool {
        let needle = text.to_lowercase();

        if appointment.reason.to_lowercase().contains(&needle)
            || appointment.id.to_string() == needle
        {
            return true;
        }

        self.directory
            .find(appointment.practitioner_id)
            .is_some_and(|p| p.full_name().to_lowercase().contains(&needle))
    }

    pub fn stats(&self) -> AppointmentStats {
        let appointments = self.ledger.all();
        let count = |status: AppointmentStatus| {
            appointments.iter().filter(|a| a.status == status).count()
        };

        AppointmentStats {
            total: appointments.len(),
            scheduled: count(AppointmentStatus::Scheduled),
            cancelled: count(AppointmentStatus::Cancelled),
            completed: count(AppointmentStatus::Completed),
        }
    }

    /// The next `limit` SCHEDULED appointments, soonest first.
    pub fn upcoming(&self, limit: usize) -> Vec<Appointment> {
        let mut scheduled: Vec<Appointment> = self
            .ledger
            .all()
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .collect();

        scheduled.sort_by_key(|a| a.scheduled_at);
        scheduled.truncate(limit);
        scheduled
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.all()
    }

    // --------------------------------------------------------------------
    // Persistence
    // --------------------------------------------------------------------

    /// Capture the whole system state as one snapshot.
    pub fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::new(
            self.identity.users(),
            self.directory.list(),
            self.ledger.all(),
        )
    }

    /// Replace all store contents from a snapshot. Each store reinitializes
    /// its id counter past the highest id it is handed.
    pub fn restore(&self, snapshot: SystemSnapshot) {
        self.identity.restore(snapshot.users);
        self.directory.restore(snapshot.practitioners);
        self.ledger.restore(snapshot.appointments);
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SchedulingError> {
        shared_persistence::save_snapshot(&self.snapshot(), path)
            .map_err(|e| SchedulingError::Persistence(e.to_string()))
    }

    pub fn load_from(path: &Path) -> Result<Self, SchedulingError> {
        let snapshot = shared_persistence::load_snapshot(path)
            .map_err(|e| SchedulingError::Persistence(e.to_string()))?;

        let service = Self::new();
        service.restore(snapshot);
        Ok(service)
    }

    /// Process-startup entry point: load the configured artifact, or fall
    /// back to a freshly seeded system when it is absent or unusable. Load
    /// failure is never fatal here.
    pub fn bootstrap(config: &AppConfig) -> Result<Self, SchedulingError> {
        match Self::load_from(&config.data_file) {
            Ok(service) => {
                info!(
                    "Restored system from {}",
                    config.data_file.display()
                );
                Ok(service)
            }
            Err(e) => {
                warn!("Could not load snapshot ({}), starting from seed data", e);
                let service = Self::new();
                service.seed()?;
                Ok(service)
            }
        }
    }

    // --------------------------------------------------------------------
    // Seed data
    // --------------------------------------------------------------------

    /// Populate a fresh system with the fixed starter dataset so it is
    /// immediately usable. Does nothing when any data already exists.
    pub fn seed(&self) -> Result<(), SchedulingError> {
        if !self.users().is_empty() || !self.list_practitioners().is_empty() {
            debug!("Skipping seed, system already has data");
            return Ok(());
        }

        let today = Local::now().date_naive();
        let practitioners = [
            ("emilysmith", "Emily", "Smith", "emily.smith@careconnect.example", "Cardiology"),
            ("rajiv", "Rajiv", "Patel", "rajiv.patel@careconnect.example", "Orthopedics"),
            ("sarab", "Sara", "Brown", "sara.brown@careconnect.example", "Pediatrics"),
        ];
        for (username, first, last, email, specialization) in practitioners {
            self.add_practitioner(NewPractitioner {
                username: username.to_string(),
                secret: "docpass".to_string(),
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: email.to_string(),
                specialization: specialization.to_string(),
                schedule_from: today,
            })?;
        }

        self.register_user(NewUser {
            username: "dharshini".to_string(),
            secret: "3612".to_string(),
            first_name: "Dharshini".to_string(),
            last_name: "M".to_string(),
            email: "dharshini@careconnect.example".to_string(),
            role: Role::Patient,
        })?;
        self.register_user(NewUser {
            username: "admin".to_string(),
            secret: "admin123".to_string(),
            first_name: "Super".to_string(),
            last_name: "Admin".to_string(),
            email: "admin@careconnect.example".to_string(),
            role: Role::Administrator,
        })?;
        self.register_user(NewUser {
            username: "rogith".to_string(),
            secret: "1234".to_string(),
            first_name: "Rogith".to_string(),
            last_name: "M".to_string(),
            email: "rogith@careconnect.example".to_string(),
            role: Role::Patient,
        })?;

        info!("Seeded starter dataset");
        Ok(())
    }
}
