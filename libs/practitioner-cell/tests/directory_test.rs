use chrono::NaiveDate;

use practitioner_cell::models::PractitionerRecord;
use practitioner_cell::services::directory::PractitionerDirectory;

fn record(directory: &PractitionerDirectory, user_id: i64, name: &str, spec: &str) -> PractitionerRecord {
    PractitionerRecord {
        practitioner_id: directory.next_id(),
        user_id,
        first_name: name.to_string(),
        last_name: "Smith".to_string(),
        specialization: spec.to_string(),
        schedule_from: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
    }
}

#[test]
fn adding_generates_the_fixed_catalogue() {
    let directory = PractitionerDirectory::new();
    let emily = directory.add(record(&directory, 1, "Emily", "Cardiology"));

    assert_eq!(emily.practitioner_id, 1);
    assert_eq!(emily.offered_slots.len(), 28);

    let first = NaiveDate::from_ymd_opt(2025, 1, 6)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    assert_eq!(emily.offered_slots[0], first);
}

#[test]
fn listing_preserves_insertion_order() {
    let directory = PractitionerDirectory::new();
    directory.add(record(&directory, 1, "Emily", "Cardiology"));
    directory.add(record(&directory, 2, "Rajiv", "Orthopedics"));
    directory.add(record(&directory, 3, "Sara", "Pediatrics"));

    let specs: Vec<String> = directory
        .list()
        .into_iter()
        .map(|p| p.specialization)
        .collect();
    assert_eq!(specs, ["Cardiology", "Orthopedics", "Pediatrics"]);
}

#[test]
fn removal_is_by_practitioner_id_and_silent_when_absent() {
    let directory = PractitionerDirectory::new();
    let emily = directory.add(record(&directory, 1, "Emily", "Cardiology"));

    assert!(directory.remove(emily.practitioner_id));
    assert!(!directory.remove(emily.practitioner_id));
    assert!(directory.list().is_empty());
}

#[test]
fn restore_continues_ids_past_the_high_water_mark() {
    let directory = PractitionerDirectory::new();
    directory.add(record(&directory, 1, "Emily", "Cardiology"));
    directory.add(record(&directory, 2, "Rajiv", "Orthopedics"));

    let fresh = PractitionerDirectory::new();
    fresh.restore(directory.list());

    assert_eq!(fresh.next_id(), 3);
}
