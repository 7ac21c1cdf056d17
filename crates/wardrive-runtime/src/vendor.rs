use serde::Serialize;
use std::path::{Path, PathBuf};
use wardrive_core::{CacheStatus, VendorTable, is_locally_administered};

use crate::Result;
use crate::config::Config;

/// Answer to a single-address vendor query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorLookup {
    pub address: String,
    pub vendor: String,
    pub locally_administered: bool,
    pub table_entries: usize,
}

pub fn lookup_vendor(data_dir: &Path, config: &Config, address: &str) -> VendorLookup {
    let table = config.oui_cache(data_dir).ensure();
    lookup_in(&table, address)
}

pub fn lookup_in(table: &VendorTable, address: &str) -> VendorLookup {
    VendorLookup {
        address: address.to_string(),
        vendor: table.lookup(address).to_string(),
        locally_administered: is_locally_administered(address).unwrap_or(false),
        table_entries: table.len(),
    }
}

/// Result of a forced OUI registry download.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefreshReport {
    pub path: PathBuf,
    pub entries: usize,
}

/// Download the registry regardless of its age, ignoring offline mode.
pub fn refresh_vendors(data_dir: &Path, config: &Config) -> Result<RefreshReport> {
    let cache = config.oui_cache(data_dir);
    if let CacheStatus::Fresh { age_days } | CacheStatus::Stale { age_days } = cache.status() {
        log::debug!("Replacing OUI database that is {:.1} days old", age_days);
    }
    cache.refresh()?;

    let table = VendorTable::load(cache.path());
    Ok(RefreshReport {
        path: cache.path().to_path_buf(),
        entries: table.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_flags_randomized_addresses() {
        let table = VendorTable::from_entries([("02AABB", "Acme")]);
        let lookup = lookup_in(&table, "02:aa:bb:cc:dd:ee");
        assert_eq!(lookup.vendor, "Randomized");
        assert!(lookup.locally_administered);
        assert_eq!(lookup.table_entries, 1);
    }

    #[test]
    fn test_lookup_with_offline_missing_cache() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.oui.offline = true;

        let lookup = lookup_vendor(dir.path(), &config, "00:11:22:33:44:55");
        assert_eq!(lookup.vendor, "Unknown");
        assert_eq!(lookup.table_entries, 0);
        assert!(!lookup.locally_administered);
    }

    #[test]
    fn test_refresh_failure_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.oui.url = "http://127.0.0.1:9/oui.csv".to_string();

        let err = refresh_vendors(dir.path(), &config).unwrap_err();
        assert!(matches!(err, crate::Error::Core(_)));
    }
}
