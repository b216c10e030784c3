pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod messaging;
pub mod osu;
pub mod utils;
