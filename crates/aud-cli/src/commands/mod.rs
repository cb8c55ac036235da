pub mod classify;
pub mod dispatch;
pub mod permission;
pub mod plan;
pub mod report;
pub mod schedule;
pub mod schema;
pub mod shared;
pub mod users;
