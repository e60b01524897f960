pub mod component;
pub mod config;
pub mod show;
