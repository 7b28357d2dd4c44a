use clap::Parser;
use std::path::PathBuf;

use advisor_types::{Language, UserRole, DEFAULT_API_BASE};

/// CLI arguments for advisor-cli
#[derive(Parser, Debug)]
#[command(name = "advisor-cli")]
#[command(about = "Study-abroad advisor - submit a profile and chat with an AI admissions advisor")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Backend base URL (e.g., http://localhost:8080/api/v1)
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE, env = "ADVISOR_API_BASE")]
    pub api_base: String,

    /// Bearer token attached to every backend request
    #[arg(long, value_name = "TOKEN", env = "ADVISOR_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, value_name = "SECS", env = "ADVISOR_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Language for canned texts and advisor replies (zh, en)
    #[arg(long, value_name = "LANG", default_value = "zh", env = "ADVISOR_LANGUAGE")]
    pub language: Language,

    /// Who is chatting (student, parent)
    #[arg(long, value_name = "ROLE", env = "ADVISOR_ROLE")]
    pub role: Option<UserRole>,

    /// Directory for session state and transcripts
    #[arg(long, value_name = "DIR", default_value = "~/.advisor", env = "ADVISOR_DATA_DIR")]
    pub data_dir: PathBuf,

    /// Read the intake profile from a TOML file instead of prompting
    #[arg(long, value_name = "PATH")]
    pub profile_file: Option<PathBuf>,

    /// Ignore the stored session and start a new consultation
    #[arg(long)]
    pub fresh: bool,

    /// Enable verbose debug output (shows HTTP requests and storage activity)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
