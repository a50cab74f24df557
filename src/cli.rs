use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jrdb-sync", version, about = "Incrementally mirror JRDB data archives")]
pub struct Cli {
    /// JRDB member username
    #[arg(short = 'u', long, env = "JRDB_USER")]
    pub user: String,

    /// JRDB member password (if not provided, will prompt).
    /// WARNING: passing via --password is visible in process listings.
    /// Prefer the JRDB_PASS environment variable instead.
    #[arg(short = 'p', long, env = "JRDB_PASS")]
    pub password: Option<String>,

    /// Directory receiving downloaded archives
    #[arg(long, env = "JRDB_ZIP_DIR")]
    pub zip_dir: String,

    /// Directory receiving extracted data files
    #[arg(long, env = "JRDB_TXT_DIR")]
    pub txt_dir: String,

    /// Root of the member data area
    #[arg(long, default_value = "http://www.jrdb.com/member/datazip")]
    pub base_url: String,

    /// Sync only the named listing categories (repeatable)
    #[arg(long = "category")]
    pub categories: Vec<String>,

    /// Skip the master-data pass
    #[arg(long)]
    pub skip_masters: bool,

    /// Plan each cycle but download and extract nothing
    #[arg(long)]
    pub dry_run: bool,

    /// Total download attempts per archive
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Base retry delay in seconds; doubles after each failed attempt
    #[arg(long, default_value_t = 30)]
    pub retry_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Disable progress bar
    #[arg(long)]
    pub no_progress_bar: bool,
}
