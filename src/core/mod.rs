pub mod history;
pub mod ledger;
pub mod live;
pub mod log;
pub mod reminder;
