// Domain layer - Raw backend records and the dashboard view model
pub mod account;
pub mod autonomous_log;
pub mod dashboard;
pub mod fixture;
pub mod pagination;
pub mod timestamp;
pub mod usage_log;
