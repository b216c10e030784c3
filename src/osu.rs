pub mod auth;
pub mod client;
pub mod models;

use std::error::Error;
use std::fmt;

/// Failures of the osu! API pipeline. Every variant is rendered to the chat
/// user as the same generic message, the detail only reaches the logs.
#[derive(Debug)]
pub enum OsuError {
    TokenAcquisition(String),
    UserNotFound(String),
    NetworkFailure(String),
    MalformedResponse(String),
}

impl fmt::Display for OsuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OsuError::TokenAcquisition(s) => write!(f, "Could not acquire access token: {}", s),
            OsuError::UserNotFound(name) => write!(f, "User '{}' not found", name),
            OsuError::NetworkFailure(s) => write!(f, "Network failure: {}", s),
            OsuError::MalformedResponse(s) => write!(f, "Malformed response: {}", s),
        }
    }
}

impl Error for OsuError {}

impl From<reqwest::Error> for OsuError {
    fn from(error: reqwest::Error) -> Self {
        match error.is_decode() {
            true => OsuError::MalformedResponse(error.to_string()),
            false => OsuError::NetworkFailure(error.to_string()),
        }
    }
}
