pub mod calendar_event;
pub mod leave_balance;
pub mod leave_request;
pub mod leave_type;
pub mod role;
pub mod user;
