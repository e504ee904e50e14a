//! Command-line arguments

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use dexter_core::domain::{ActorStatus, AlertStatus, Level};
use dexter_core::resources::{ActorFilter, AlertAction, AlertFilter, ReportFilter};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "dexter")]
#[command(about = "Dexter - election misinformation monitoring client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (YAML or TOML)
    #[arg(long, global = true, env = "DEXTER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Issue a GET request
    Get(RawRequest),
    /// Issue a POST request
    Post(RawRequest),
    /// Issue a PUT request
    Put(RawRequest),
    /// Issue a PATCH request
    Patch(RawRequest),
    /// Issue a DELETE request
    Delete(RawRequest),

    /// List detected narratives
    Narratives,
    /// List actors
    Actors(ActorArgs),
    /// List alerts
    Alerts(AlertArgs),
    /// Investigate, resolve or dismiss an alert
    UpdateAlert {
        id: u64,
        /// investigate, resolve or dismiss
        action: AlertAction,
    },
    /// List reports
    Reports(ReportArgs),
    /// Export a report
    ExportReport { id: u64 },
    /// Delete a report
    DeleteReport { id: u64 },
    /// Show dashboard summary statistics
    Stats,

    /// Sign in and persist the session
    Login { email: String, password: String },
    /// Sign out and clear the persisted session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Reload the session from storage
    Refresh,
}

#[derive(Debug, Args)]
pub struct RawRequest {
    /// Endpoint path, e.g. /narratives
    pub endpoint: String,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "param", short = 'p', value_parser = parse_key_value::<'='>)]
    pub params: Vec<(String, String)>,

    /// Header as name:value (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_key_value::<':'>)]
    pub headers: Vec<(String, String)>,

    /// JSON request body
    #[arg(long)]
    pub body: Option<String>,

    /// Per-call timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Args)]
pub struct ActorArgs {
    #[arg(long = "type")]
    pub kind: Option<String>,

    #[arg(long, value_parser = parse_upper::<ActorStatus>)]
    pub status: Option<ActorStatus>,

    #[arg(long)]
    pub influence: Option<String>,

    /// Free-text search
    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

impl From<ActorArgs> for ActorFilter {
    fn from(args: ActorArgs) -> Self {
        ActorFilter {
            kind: args.kind,
            status: args.status,
            influence: args.influence,
            query: args.query,
        }
    }
}

#[derive(Debug, Args)]
pub struct AlertArgs {
    #[arg(long, value_delimiter = ',', value_parser = parse_upper::<Level>)]
    pub severity: Vec<Level>,

    #[arg(long, value_delimiter = ',', value_parser = parse_upper::<AlertStatus>)]
    pub status: Vec<AlertStatus>,

    #[arg(long = "type", value_delimiter = ',')]
    pub kind: Vec<String>,

    /// First day, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

impl From<AlertArgs> for AlertFilter {
    fn from(args: AlertArgs) -> Self {
        AlertFilter {
            severity: args.severity,
            status: args.status,
            kind: args.kind,
            start: args.start,
            end: args.end,
        }
    }
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[arg(long = "type")]
    pub kind: Option<String>,

    #[arg(long)]
    pub start: Option<NaiveDate>,

    #[arg(long)]
    pub end: Option<NaiveDate>,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long, short = 'q')]
    pub query: Option<String>,
}

impl From<ReportArgs> for ReportFilter {
    fn from(args: ReportArgs) -> Self {
        ReportFilter {
            kind: args.kind,
            start: args.start,
            end: args.end,
            status: args.status,
            query: args.query,
        }
    }
}

fn parse_key_value<const SEP: char>(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(SEP) {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("expected key{}value, got '{}'", SEP, raw)),
    }
}

/// Wire enums are upper-case; accept any casing on the command line
fn parse_upper<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_uppercase()))
        .map_err(|_| format!("unknown value '{}'", raw))
}
