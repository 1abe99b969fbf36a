pub mod day_summary;
pub mod intake;
pub mod profile;
