use crate::types::{LogLevel, OutputFormat};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wardrive")]
#[command(about = "Aggregate wardriving captures into a GeoJSON map", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the capture CSVs [env: WARDRIVE_DATA] [default: ./data]
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Defaults to `build`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Process every capture file and write the GeoJSON map
    Build(BuildArgs),

    /// Query or update the OUI vendor registry
    Vendor {
        #[command(subcommand)]
        command: VendorCommand,
    },
}

#[derive(Args, Debug, Default, Clone)]
pub struct BuildArgs {
    /// Output path [default: <data-dir>/wardrive.geojson]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Seed for location jitter, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write exact access point positions
    #[arg(long)]
    pub no_jitter: bool,

    /// Never download the OUI registry
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum VendorCommand {
    /// Resolve the vendor of one hardware address
    Lookup {
        address: String,

        #[arg(long)]
        offline: bool,
    },

    /// Download the OUI registry now, regardless of its age
    Refresh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["wardrive", "--data-dir", "/tmp/caps"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/caps"));
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.format, OutputFormat::Plain);
    }

    #[test]
    fn test_build_flags() {
        let cli = Cli::try_parse_from([
            "wardrive", "build", "--seed", "7", "--no-jitter", "--offline", "--format", "json",
        ])
        .unwrap();
        let Some(Commands::Build(args)) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.seed, Some(7));
        assert!(args.no_jitter);
        assert!(args.offline);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_vendor_lookup() {
        let cli = Cli::try_parse_from(["wardrive", "vendor", "lookup", "02:aa:bb:cc:dd:ee"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Vendor {
                command: VendorCommand::Lookup { ref address, offline: false }
            }) if address == "02:aa:bb:cc:dd:ee"
        ));
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["wardrive", "--format", "xml"]).is_err());
    }
}
