pub mod config;
pub mod errors;
pub mod models;
pub mod roster;
pub mod services;
