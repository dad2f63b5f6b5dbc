pub mod config;
pub mod events;
pub mod projects;
pub mod timeline;
