//! Pure leave logic shared by every view. Nothing in here touches storage.

pub mod calendar;
pub mod days;
pub mod export;
pub mod filter;
pub mod stats;
pub mod users;
pub mod validate;
