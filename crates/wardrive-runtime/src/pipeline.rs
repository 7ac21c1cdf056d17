use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use std::time::Instant;
use wardrive_core::VendorTable;
use wardrive_engine::{
    Aggregator, FeatureBuilder, FeatureCollection, Jitter, VendorShare, assemble,
    vendor_distribution,
};
use wardrive_providers::{CaptureDiscovery, CaptureFile, CaptureLog, RecordNormalizer};
use wardrive_types::SessionSummary;

use crate::config::Config;
use crate::events::{PROGRESS_INTERVAL, Reporter, RunEvent};
use crate::stats::{RunStats, rate};
use crate::{Error, Result};

/// Number of vendors kept in the run summary.
pub const TOP_VENDORS: usize = 10;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub document: FeatureCollection,
    pub stats: RunStats,
    /// Finished sessions in first-seen order.
    pub sessions: Vec<SessionSummary>,
    pub top_vendors: Vec<VendorShare>,
}

/// One batch run over a data directory.
pub struct Pipeline {
    data_dir: PathBuf,
    config: Config,
    seed: Option<u64>,
    vendors: Option<VendorTable>,
    generated: Option<NaiveDateTime>,
}

impl Pipeline {
    pub fn new(data_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            data_dir: data_dir.into(),
            config,
            seed: None,
            vendors: None,
            generated: None,
        }
    }

    /// Fixed jitter seed for reproducible output.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Use this table instead of consulting the OUI cache.
    pub fn with_vendors(mut self, vendors: VendorTable) -> Self {
        self.vendors = Some(vendors);
        self
    }

    /// Pin the `generated` timestamp (defaults to local now).
    pub fn with_generated(mut self, generated: NaiveDateTime) -> Self {
        self.generated = Some(generated);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run(&self, reporter: &mut dyn Reporter) -> Result<RunOutcome> {
        let started = Instant::now();

        if !self.data_dir.is_dir() {
            return Err(Error::InputDirMissing(self.data_dir.clone()));
        }

        let discovery = CaptureDiscovery::new(self.config.session_suffix.clone())
            .exclude(self.config.oui_cache_path(&self.data_dir));
        let files = discovery.scan(&self.data_dir);
        if files.is_empty() {
            return Err(Error::NoInputFiles(self.data_dir.clone()));
        }
        log::info!(
            "Found {} capture files in {}",
            files.len(),
            self.data_dir.display()
        );

        let loaded;
        let vendors = match &self.vendors {
            Some(table) => table,
            None => {
                loaded = self.config.oui_cache(&self.data_dir).ensure();
                &loaded
            }
        };

        let mut stats = RunStats {
            files_found: files.len(),
            ..Default::default()
        };
        let mut aggregator = Aggregator::new();

        for (idx, file) in files.iter().enumerate() {
            reporter.report(RunEvent::FileStarted {
                file_name: file.file_name.clone(),
                index: idx + 1,
                total: files.len(),
            });

            match self.process_file(file, vendors, &mut aggregator, &mut stats, reporter) {
                Ok(true) => stats.files_processed += 1,
                Ok(false) => {}
                Err(err) => {
                    if let Some(session) = aggregator.abandon_session() {
                        log::debug!("Abandoned session {}", session);
                    }
                    log::warn!("Skipping {}: {}", file.file_name, err);
                    reporter.report(RunEvent::FileFailed {
                        file_name: file.file_name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        let jitter = Jitter::new(self.config.jitter_degrees, self.seed);
        let mut builder = FeatureBuilder::new(jitter);
        let generated = self
            .generated
            .unwrap_or_else(|| Local::now().naive_local());
        let document = assemble(&aggregator, &mut builder, generated);

        stats.elapsed = started.elapsed();
        log::info!(
            "Processed {} of {} files, {} rows, {} access points",
            stats.files_processed,
            stats.files_found,
            stats.rows_read,
            aggregator.access_points().len()
        );

        Ok(RunOutcome {
            top_vendors: vendor_distribution(aggregator.access_points(), TOP_VENDORS),
            sessions: aggregator.sessions().to_vec(),
            document,
            stats,
        })
    }

    /// `Ok(false)` when the file has no header and was skipped.
    fn process_file(
        &self,
        file: &CaptureFile,
        vendors: &VendorTable,
        aggregator: &mut Aggregator,
        stats: &mut RunStats,
        reporter: &mut dyn Reporter,
    ) -> Result<bool> {
        let started = Instant::now();

        let capture = match CaptureLog::open(&file.path) {
            Ok(capture) => capture,
            Err(wardrive_providers::Error::MissingHeader(_)) => {
                log::warn!("No header row found in {}, skipping", file.file_name);
                reporter.report(RunEvent::HeaderMissing {
                    file_name: file.file_name.clone(),
                });
                return Ok(false);
            }
            Err(err) => return Err(err.into()),
        };

        log::debug!(
            "Header of {} found on line {}",
            file.file_name,
            capture.header_line()
        );
        reporter.report(RunEvent::HeaderFound {
            file_name: file.file_name.clone(),
            line: capture.header_line(),
        });

        aggregator.begin_session(file.session.clone());
        let normalizer = RecordNormalizer::new(capture.headers(), vendors, file.session.clone());

        let mut rows: u64 = 0;
        for row in capture.rows() {
            let row = row?;
            rows += 1;
            stats.rows_read += 1;

            match normalizer.normalize(&row) {
                Ok(obs) => aggregator.observe(obs),
                Err(reason) => {
                    log::trace!("{} row {}: skipped ({})", file.file_name, rows, reason);
                    stats.rejected.record(reason);
                }
            }

            if rows % PROGRESS_INTERVAL == 0 {
                reporter.report(RunEvent::Progress {
                    file_name: file.file_name.clone(),
                    rows,
                    rows_per_second: rate(rows, started.elapsed()),
                });
            }
        }

        let addresses = aggregator
            .finish_session()
            .map_or(0, |summary| summary.address_count);
        reporter.report(RunEvent::FileFinished {
            file_name: file.file_name.clone(),
            rows,
            addresses,
            elapsed: started.elapsed(),
        });

        Ok(true)
    }
}
