use std::sync::{PoisonError, RwLock};

use tracing::{debug, info};

use shared_models::entities::Practitioner;

use crate::models::PractitionerRecord;
use crate::services::catalogue;

#[derive(Debug)]
struct DirectoryState {
    practitioners: Vec<Practitioner>,
    next_id: i64,
}

/// Ordered directory of practitioners. Each entry owns its fixed slot
/// catalogue, generated as a side effect of insertion.
#[derive(Debug)]
pub struct PractitionerDirectory {
    state: RwLock<DirectoryState>,
}

impl PractitionerDirectory {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(DirectoryState {
                practitioners: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Allocate the next practitioner-scoped id. Separate from insertion so
    /// the matching user record can be registered first, carrying the id.
    pub fn next_id(&self) -> i64 {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let id = state.next_id;
        state.next_id += 1;
        id
    }

    /// Insert a directory entry, generating its slot catalogue.
    pub fn add(&self, record: PractitionerRecord) -> Practitioner {
        let practitioner = Practitioner {
            practitioner_id: record.practitioner_id,
            user_id: record.user_id,
            first_name: record.first_name,
            last_name: record.last_name,
            specialization: record.specialization,
            offered_slots: catalogue::slot_catalogue(record.schedule_from),
        };

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.practitioners.push(practitioner.clone());

        info!(
            "Added practitioner {} ({}) with {} offered slots",
            practitioner.full_name(),
            practitioner.specialization,
            practitioner.offered_slots.len()
        );
        practitioner
    }

    /// Remove by practitioner-scoped id. Returns false when absent. Existing
    /// appointments are untouched; the scheduling layer guards against
    /// removing a practitioner who still has scheduled ones.
    pub fn remove(&self, practitioner_id: i64) -> bool {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let before = state.practitioners.len();
        state
            .practitioners
            .retain(|p| p.practitioner_id != practitioner_id);

        let removed = state.practitioners.len() < before;
        if removed {
            info!("Removed practitioner {}", practitioner_id);
        } else {
            debug!("No practitioner {} to remove", practitioner_id);
        }
        removed
    }

    pub fn find(&self, practitioner_id: i64) -> Option<Practitioner> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .practitioners
            .iter()
            .find(|p| p.practitioner_id == practitioner_id)
            .cloned()
    }

    /// Defensive snapshot copy, insertion order.
    pub fn list(&self) -> Vec<Practitioner> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.practitioners.clone()
    }

    /// Replace the directory contents from a loaded snapshot, reinitializing
    /// the id counter past the highest id seen.
    pub fn restore(&self, practitioners: Vec<Practitioner>) {
        let next_id = practitioners
            .iter()
            .map(|p| p.practitioner_id)
            .max()
            .unwrap_or(0)
            + 1;

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.practitioners = practitioners;
        state.next_id = next_id;
    }
}

impl Default for PractitionerDirectory {
    fn default() -> Self {
        Self::new()
    }
}
