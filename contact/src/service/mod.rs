pub mod notification;
pub mod submission;
