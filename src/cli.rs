use clap::Parser;
use serde::Serialize;

#[derive(Debug, Default, Parser, Serialize)]
pub struct Cli {
    /// Log verbosity, one of TRACE, DEBUG, INFO, WARN or ERROR
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_level: Option<String>,
}
