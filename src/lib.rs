pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod fs;
pub mod installer;
pub mod logging;
pub mod otp;
pub mod platform;
pub mod publish;
pub mod types;
pub mod utils;
