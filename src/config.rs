use crate::{cli::Cli, error::BotResult};
use clap::Parser;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::Deserialize;
use std::path::Path;
use tracing::Level;

const TRACE_LEVELS: [&'static str; 5] = ["TRACE", "DEBUG", "INFO", "WARN", "ERROR"];
const LOCAL_SETTINGS_YAML_FILE: &str = ".env.local.yaml";

// All settings may be configured via environment variables. Example:
// SLACK_TOKEN="xxx" would set slack_token to the xxx value.
// Command line flags take precedence over the environment.
#[derive(Deserialize, Debug)]
pub struct Settings {
    #[serde(default = "default_trace_level")]
    trace_level: String,
    // Bot token, used to post replies
    pub slack_token: String,
    // App-level token, used to open the socket mode connection
    pub slack_app_token: String,
    pub osu_client_id: u64,
    pub osu_client_secret: String,
    #[serde(default = "default_osu_base_url")]
    pub osu_base_url: String,
    #[serde(default = "default_osu_api_timeout_sec")]
    pub osu_api_timeout_sec: u64,
}

impl Settings {
    pub fn new() -> BotResult<Self> {
        Settings::from_cli(Cli::parse())
    }

    pub fn from_cli(cli: Cli) -> BotResult<Self> {
        let mut figment = Figment::new();
        if Path::new(LOCAL_SETTINGS_YAML_FILE).exists() {
            println!(
                "\n######################################\n\
                   ##   Found '.env.local.yaml' file,  ##\n\
                   ##   loading local configuration.   ##\n\
                   ######################################\n\
                "
            );
            figment = figment.merge(Yaml::file(LOCAL_SETTINGS_YAML_FILE));
        }

        let settings = figment
            .merge(Env::raw())
            .merge(Serialized::defaults(cli))
            .extract()?;

        Ok(settings)
    }

    pub fn get_trace_level(&self) -> Level {
        get_trace_level(&self.trace_level)
    }
}

fn get_trace_level(level_str: &str) -> Level {
    match level_str.to_uppercase().as_str() {
        level if level == TRACE_LEVELS[0] => Level::TRACE,
        level if level == TRACE_LEVELS[1] => Level::DEBUG,
        level if level == TRACE_LEVELS[2] => Level::INFO,
        level if level == TRACE_LEVELS[3] => Level::WARN,
        level if level == TRACE_LEVELS[4] => Level::ERROR,
        // Default trace level
        _ => Level::INFO,
    }
}

fn default_trace_level() -> String {
    "INFO".to_string()
}

fn default_osu_base_url() -> String {
    "https://osu.ppy.sh".to_string()
}

fn default_osu_api_timeout_sec() -> u64 {
    10
}
