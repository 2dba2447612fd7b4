pub mod appraisal;
pub mod config;
pub mod error;
pub mod exchange;
pub mod history;
pub mod rent_index;
pub mod rentals;
pub mod repository;
pub mod telemetry;
pub mod validation;
