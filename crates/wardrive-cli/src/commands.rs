use super::args::{BuildArgs, Cli, Commands, VendorCommand};
use super::handlers;
use crate::types::LogLevel;
use anyhow::{Context, Result};
use wardrive_core::resolve_data_dir;
use wardrive_runtime::Config;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let config = Config::load(&data_dir).with_context(|| {
        format!(
            "Failed to load {}",
            Config::default_path(&data_dir).display()
        )
    })?;

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Build(BuildArgs::default()));

    match command {
        Commands::Build(args) => handlers::build::handle(&data_dir, config, args, cli.format),

        Commands::Vendor { command } => match command {
            VendorCommand::Lookup { address, offline } => {
                handlers::vendor::lookup(&data_dir, config, &address, offline, cli.format)
            }
            VendorCommand::Refresh => handlers::vendor::refresh(&data_dir, &config, cli.format),
        },
    }
}

/// `RUST_LOG` wins over `--log-level`.
fn init_logging(level: LogLevel) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
