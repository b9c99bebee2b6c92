pub mod services;

// Re-export services for external use
pub use services::*;
