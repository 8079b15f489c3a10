mod project;
mod user;

pub mod result;
pub mod search;

pub use project::{CategoryCount, CreateProject, Project, ProjectStats, UpdateProject};
pub use user::{CreateUser, UpdateUser, UpdateUserStatus, User};
