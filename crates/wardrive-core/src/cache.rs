use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

use crate::oui::VendorTable;
use crate::{Error, Result};

pub const DEFAULT_OUI_URL: &str = "https://standards-oui.ieee.org/oui/oui.csv";
pub const DEFAULT_MAX_AGE_DAYS: u64 = 30;

const SECONDS_PER_DAY: f64 = 86_400.0;
const DOWNLOAD_TIMEOUT_SECS: u32 = 60;

/// Freshness of the on-disk OUI registry copy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CacheStatus {
    Missing,
    Stale { age_days: f64 },
    Fresh { age_days: f64 },
}

/// On-disk copy of the IEEE OUI registry, refreshed when it ages out.
#[derive(Debug, Clone)]
pub struct OuiCache {
    path: PathBuf,
    url: String,
    max_age: Duration,
    offline: bool,
}

impl OuiCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            url: DEFAULT_OUI_URL.to_string(),
            max_age: Duration::from_secs(DEFAULT_MAX_AGE_DAYS * 86_400),
            offline: false,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_age_days(mut self, days: u64) -> Self {
        self.max_age = Duration::from_secs(days.saturating_mul(86_400));
        self
    }

    /// Never touch the network; use whatever is cached.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn status(&self) -> CacheStatus {
        self.status_at(SystemTime::now())
    }

    pub fn status_at(&self, now: SystemTime) -> CacheStatus {
        let Ok(modified) = std::fs::metadata(&self.path).and_then(|m| m.modified()) else {
            return CacheStatus::Missing;
        };

        // A modification time in the future counts as brand new.
        let age = now.duration_since(modified).unwrap_or_default();
        let age_days = age.as_secs_f64() / SECONDS_PER_DAY;

        if age > self.max_age {
            CacheStatus::Stale { age_days }
        } else {
            CacheStatus::Fresh { age_days }
        }
    }

    /// Download the registry with `curl`, replacing the cached copy only on success.
    pub fn refresh(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let partial = self.path.with_extension("csv.part");
        let output = Command::new("curl")
            .arg("-sfL")
            .arg("--max-time")
            .arg(DOWNLOAD_TIMEOUT_SECS.to_string())
            .arg("-o")
            .arg(&partial)
            .arg(&self.url)
            .output()
            .map_err(|err| Error::Download(format!("could not run curl: {}", err)))?;

        if !output.status.success() {
            let _ = std::fs::remove_file(&partial);
            return Err(Error::Download(format!(
                "curl exited with {} fetching {}",
                output.status, self.url
            )));
        }

        std::fs::rename(&partial, &self.path)?;
        Ok(())
    }

    /// Make sure a usable table exists, downloading when missing or stale.
    ///
    /// Never fails: a missing registry that cannot be downloaded yields an
    /// empty table, a stale one that cannot be refreshed is used as-is.
    pub fn ensure(&self) -> VendorTable {
        match self.status() {
            CacheStatus::Missing if self.offline => {
                log::warn!(
                    "No OUI database at {} and offline mode is on; vendor lookups will show 'Unknown'",
                    self.path.display()
                );
                return VendorTable::empty();
            }
            CacheStatus::Missing => {
                log::info!("Downloading IEEE OUI database from {}", self.url);
                if let Err(err) = self.refresh() {
                    log::warn!(
                        "Could not download OUI database: {}; vendor lookups will show 'Unknown'",
                        err
                    );
                    return VendorTable::empty();
                }
            }
            CacheStatus::Stale { age_days } if !self.offline => {
                log::info!(
                    "OUI database is {:.0} days old, re-downloading from {}",
                    age_days,
                    self.url
                );
                if let Err(err) = self.refresh() {
                    log::warn!("Could not update OUI database ({}), using cached version", err);
                }
            }
            CacheStatus::Stale { .. } | CacheStatus::Fresh { .. } => {}
        }

        VendorTable::load(&self.path)
    }
}
