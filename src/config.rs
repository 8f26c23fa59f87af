//! Runtime configuration
//!
//! Native builds read command line arguments, web builds bake the backend URL
//! in at compile time through `FRAUDWATCH_API_URL`.

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_STATS_WINDOW_DAYS: u32 = 30;
const DEFAULT_TOKEN_FILE: &str = "fraudwatch-tokens.json";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Backend origin, without trailing slash.
    pub api_base_url: String,
    /// Day window requested for dashboard statistics.
    pub stats_window_days: u32,
    /// Where the desktop build keeps the credential pair.
    pub token_file: std::path::PathBuf,
    pub log_level: log::LevelFilter,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("FRAUDWATCH_API_URL")
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            stats_window_days: DEFAULT_STATS_WINDOW_DAYS,
            token_file: DEFAULT_TOKEN_FILE.into(),
            log_level: log::LevelFilter::Info,
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Backend base URL
    #[arg(long, default_value_t = String::from(DEFAULT_API_URL))]
    pub api_url: String,
    /// Dashboard statistics window, in days
    #[arg(long, default_value_t = DEFAULT_STATS_WINDOW_DAYS, value_parser = clap::value_parser!(u32).range(1..))]
    pub stats_days: u32,
    #[arg(long, default_value_t = String::from(DEFAULT_TOKEN_FILE))]
    pub token_file: String,
    #[arg(long, default_value_t = log::LevelFilter::Info)]
    pub log_level: log::LevelFilter,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            api_base_url: args.api_url.trim_end_matches('/').to_string(),
            stats_window_days: args.stats_days,
            token_file: args.token_file.into(),
            log_level: args.log_level,
        }
    }
}

impl AppConfig {
    /// Native builds take their configuration from the command line.
    #[cfg(not(feature = "web"))]
    pub fn load() -> Self {
        use clap::Parser;
        Args::parse().into()
    }

    #[cfg(feature = "web")]
    pub fn load() -> Self {
        Self::default()
    }
}
