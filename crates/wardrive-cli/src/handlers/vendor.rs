use crate::types::OutputFormat;
use anyhow::{Context, Result};
use std::path::Path;
use wardrive_runtime::{Config, lookup_vendor, refresh_vendors};

pub fn lookup(
    data_dir: &Path,
    mut config: Config,
    address: &str,
    offline: bool,
    format: OutputFormat,
) -> Result<()> {
    if offline {
        config.oui.offline = true;
    }

    let result = lookup_vendor(data_dir, &config, address);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Plain => {
            println!("{}  {}", result.address, result.vendor);
            if result.table_entries == 0 {
                eprintln!("(no OUI entries loaded; run `wardrive vendor refresh`)");
            }
        }
    }
    Ok(())
}

pub fn refresh(data_dir: &Path, config: &Config, format: OutputFormat) -> Result<()> {
    let report = refresh_vendors(data_dir, config).context("Failed to refresh OUI registry")?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Plain => println!(
            "Loaded {} OUI entries into {}",
            report.entries,
            report.path.display()
        ),
    }
    Ok(())
}
