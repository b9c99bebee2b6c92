//! Whole-snapshot persistence gateway. Every save rewrites the complete
//! system state; there is no incremental update path.

use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, warn};

use shared_models::snapshot::{SystemSnapshot, SCHEMA_VERSION};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("No snapshot artifact at the given path")]
    Missing,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed snapshot artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Snapshot schema version {found} is not supported (expected {expected})")]
    IncompatibleSchema { found: u32, expected: u32 },
}

/// Serialize the whole system state to `path`, overwriting any prior artifact.
pub fn save_snapshot(snapshot: &SystemSnapshot, path: &Path) -> Result<(), SnapshotError> {
    debug!("Saving system snapshot to {}", path.display());

    let body = serde_json::to_vec_pretty(snapshot)?;
    fs::write(path, body)?;

    info!(
        "Saved snapshot: {} users, {} practitioners, {} appointments",
        snapshot.users.len(),
        snapshot.practitioners.len(),
        snapshot.appointments.len()
    );
    Ok(())
}

/// Read a previously saved artifact back into memory. Absent, unreadable,
/// malformed, and version-incompatible artifacts each fail distinctly so the
/// caller can decide to start from seed data instead.
pub fn load_snapshot(path: &Path) -> Result<SystemSnapshot, SnapshotError> {
    debug!("Loading system snapshot from {}", path.display());

    if !path.exists() {
        return Err(SnapshotError::Missing);
    }

    let body = fs::read(path)?;
    let snapshot: SystemSnapshot = serde_json::from_slice(&body)?;

    if snapshot.schema_version != SCHEMA_VERSION {
        warn!(
            "Rejecting snapshot with schema version {}",
            snapshot.schema_version
        );
        return Err(SnapshotError::IncompatibleSchema {
            found: snapshot.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    info!(
        "Loaded snapshot: {} users, {} practitioners, {} appointments",
        snapshot.users.len(),
        snapshot.practitioners.len(),
        snapshot.appointments.len()
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use shared_models::entities::{Appointment, AppointmentStatus, Role, User};

    fn sample_snapshot() -> SystemSnapshot {
        let at = NaiveDate::from_ymd_opt(2025, 1, 6)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        SystemSnapshot::new(
            vec![User {
                id: 1,
                username: "alice".to_string(),
                password_hash: "$argon2id$stub".to_string(),
                first_name: "Alice".to_string(),
                last_name: "Ward".to_string(),
                email: "alice@example.com".to_string(),
                role: Role::Patient,
            }],
            vec![],
            vec![Appointment {
                id: 1,
                patient_id: 1,
                practitioner_id: 1,
                scheduled_at: at,
                reason: "check-up".to_string(),
                status: AppointmentStatus::Scheduled,
            }],
        )
    }

    #[test]
    fn round_trips_a_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");

        save_snapshot(&sample_snapshot(), &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();

        assert_eq!(loaded.users.len(), 1);
        assert_eq!(loaded.users[0].username, "alice");
        assert_eq!(loaded.appointments.len(), 1);
        assert_eq!(loaded.appointments[0].status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn save_overwrites_prior_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");

        save_snapshot(&sample_snapshot(), &path).unwrap();
        save_snapshot(&SystemSnapshot::empty(), &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert!(loaded.users.is_empty());
        assert!(loaded.appointments.is_empty());
    }

    #[test]
    fn missing_artifact_is_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_snapshot(&dir.path().join("nope.json"));
        assert_matches!(result, Err(SnapshotError::Missing));
    }

    #[test]
    fn malformed_artifact_is_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");
        std::fs::write(&path, b"not json at all").unwrap();

        assert_matches!(load_snapshot(&path), Err(SnapshotError::Malformed(_)));
    }

    #[test]
    fn rejects_unknown_schema_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.json");

        let mut snapshot = SystemSnapshot::empty();
        snapshot.schema_version = 99;
        let body = serde_json::to_vec(&snapshot).unwrap();
        std::fs::write(&path, body).unwrap();

        assert_matches!(
            load_snapshot(&path),
            Err(SnapshotError::IncompatibleSchema { found: 99, .. })
        );
    }
}
