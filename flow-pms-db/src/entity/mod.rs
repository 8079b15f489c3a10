pub mod project;
pub mod status_message;
pub mod user;
