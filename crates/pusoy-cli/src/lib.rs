pub mod config;
pub mod human;
pub mod logging;
pub mod render;
pub mod session;
