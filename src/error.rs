use std::error::Error;
use std::fmt;

use crate::osu::OsuError;

/// Custom Error and Result types to unify errors from all sources.
pub type BotResult<T> = Result<T, BotError>;

#[derive(Debug)]
pub enum BotError {
    Config(String),
    Slack(String),
    Osu(OsuError),
    Template(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BotError::Config(s) => write!(f, "Config Error: {}", s),
            BotError::Slack(s) => write!(f, "Slack Error: {}", s),
            BotError::Osu(e) => write!(f, "osu! Error: {}", e),
            BotError::Template(s) => write!(f, "Template Error: {}", s),
        }
    }
}

impl Error for BotError {}

impl From<OsuError> for BotError {
    fn from(error: OsuError) -> Self {
        BotError::Osu(error)
    }
}

impl From<figment::Error> for BotError {
    fn from(error: figment::Error) -> Self {
        BotError::Config(error.to_string())
    }
}

impl From<minijinja::Error> for BotError {
    fn from(error: minijinja::Error) -> Self {
        BotError::Template(error.to_string())
    }
}

impl From<slack_morphism::errors::SlackClientError> for BotError {
    fn from(error: slack_morphism::errors::SlackClientError) -> Self {
        BotError::Slack(error.to_string())
    }
}
