pub mod ledger;
pub mod lifecycle;

pub use ledger::AppointmentLedger;
