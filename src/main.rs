use clap::Parser;
use log::info;

use crate::{
    commands::{CommandError, Commands},
    config::{AppConfig, GlobalArgs},
    storage::memory::MemStorage,
};

mod commands;
mod config;
mod logging;
mod models;
mod services;
mod shell;
mod storage;
mod ui;

#[derive(Parser)]
#[command(
    name = "taskflow",
    version,
    about = "Track projects and their tasks from your terminal"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let config = AppConfig::from_args(&cli.global);

    let logger = logging::init_logging(&config.log_level, config.log_dir.as_deref())
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    // The store lives for the whole process and is only lent out from here.
    let mut storage = if config.seed {
        MemStorage::with_sample_data().unwrap_or_else(|e| {
            eprintln!("Error: failed to seed the store: {}", e);
            logger.flush();
            std::process::exit(1);
        })
    } else {
        MemStorage::new()
    };
    info!("event=store_ready seeded={}", config.seed);

    let result = match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Shell => shell::run(&mut storage, std::io::stdin().lock(), config.json)
            .map_err(CommandError::from),
        command => commands::execute(command, &mut storage, config.json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        logger.flush();
        std::process::exit(1);
    }
}
