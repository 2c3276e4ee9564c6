use std::path::PathBuf;

use clap::{Args, builder::FalseyValueParser};

/// Options shared by every command. Each can also be set from the environment.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Start with an empty store instead of the sample projects
    #[arg(
        long,
        global = true,
        env = "TASKFLOW_NO_SEED",
        value_parser = FalseyValueParser::new()
    )]
    pub no_seed: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, env = "TASKFLOW_LOG", default_value = "warn")]
    pub log_level: String,

    /// Write logs to this directory instead of stderr
    #[arg(long, global = true, env = "TASKFLOW_LOG_DIR", conflicts_with = "log_to_file")]
    pub log_dir: Option<PathBuf>,

    /// Write logs to the default data directory instead of stderr
    #[arg(long, global = true)]
    pub log_to_file: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: bool,
    pub json: bool,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_args(args: &GlobalArgs) -> Self {
        let log_dir = match (&args.log_dir, args.log_to_file) {
            (Some(dir), _) => Some(dir.clone()),
            (None, true) => Some(default_log_dir()),
            (None, false) => None,
        };

        Self {
            seed: !args.no_seed,
            json: args.json,
            log_level: args.log_level.clone(),
            log_dir,
        }
    }
}

pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskflow")
        .join("logs")
}
