pub mod permission;
pub mod project;
pub mod ticket;
pub mod ticket_status;
pub mod user;
