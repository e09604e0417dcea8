//! Command-line arguments and the settings derived from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use gauge_engine::{ClientSettings, EngineSettings};
use log::LevelFilter;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

const AFTER_HELP: &str = "\
KEYS (interactive mode):
  type / paste      edit the text; counts refresh 500 ms after you stop
  Tab, Shift+Tab    next / previous model
  Ctrl+T            toggle full chat prompt counting
  Ctrl+U            clear the text
  Esc, Ctrl+C       quit

EXAMPLES:
  token-gauge                                   Interactive counter
  token-gauge --api-url http://localhost:8000   Use another counting service
  token-gauge count --chat -m claude \"hi\"       One-shot count of a chat prompt
  echo hello | token-gauge count -              Count text from stdin
  token-gauge models                            List model profiles
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Live token estimates for text and chat prompts",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the counting service
    #[arg(long, env = "TOKEN_GAUGE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// RON file with model profiles (defaults to the bundled catalog)
    #[arg(long, env = "TOKEN_GAUGE_MODELS")]
    pub models: Option<PathBuf>,

    /// Quiet period after the last edit before a count is requested
    #[arg(long, default_value_t = 500)]
    pub debounce_ms: u64,

    /// Request timeout for the counting service
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log file used while the interactive screen is active
    #[arg(long, default_value = "token_gauge.log")]
    pub log_file: PathBuf,

    /// Increase log verbosity (repeat for more)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count tokens once and exit
    Count {
        /// Count as a chat prompt (system + user turns)
        #[arg(long)]
        chat: bool,
        /// Model profile id (defaults to the first catalog entry)
        #[arg(short = 'm', long)]
        model: Option<String>,
        /// Text to count; `-` or nothing reads stdin
        text: Option<String>,
    },
    /// List model profiles and their context limits
    Models,
}

impl Args {
    pub fn level_filter(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Error
        } else {
            match self.verbose {
                0 => LevelFilter::Warn,
                1 => LevelFilter::Info,
                2 => LevelFilter::Debug,
                _ => LevelFilter::Trace,
            }
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            request_timeout: Duration::from_secs(self.timeout_secs),
            ..ClientSettings::new(self.api_url.clone())
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            client: self.client_settings(),
            quiet_interval: Duration::from_millis(self.debounce_ms),
        }
    }
}
