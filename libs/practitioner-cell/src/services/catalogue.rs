use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Offered times on every catalogue day.
pub const SLOT_TIMES: [(u32, u32); 4] = [(9, 0), (11, 0), (14, 0), (16, 0)];

/// Days covered by a freshly generated catalogue.
pub const CATALOGUE_DAYS: i64 = 7;

/// The fixed slot catalogue a practitioner offers: four times a day for
/// seven consecutive days starting at `from`. Generated once at creation
/// and never replenished.
pub fn slot_catalogue(from: NaiveDate) -> Vec<NaiveDateTime> {
    let mut slots = Vec::with_capacity(SLOT_TIMES.len() * CATALOGUE_DAYS as usize);

    for day in 0..CATALOGUE_DAYS {
        let date = from + Duration::days(day);
        for (hour, minute) in SLOT_TIMES {
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
            slots.push(NaiveDateTime::new(date, time));
        }
    }

    slots
}
