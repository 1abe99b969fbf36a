pub mod events;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod profile;
pub mod queries;
pub mod reminders;
pub mod stats;
