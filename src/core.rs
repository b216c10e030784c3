pub mod commands;
pub mod score;
pub mod templates;
