pub mod config;
pub mod errors;
pub mod extraction;
pub mod outline;
pub mod types;
