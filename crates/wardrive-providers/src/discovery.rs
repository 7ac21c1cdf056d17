use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use wardrive_types::SessionName;

/// Infix that capture apps append to exported file names.
pub const DEFAULT_SESSION_SUFFIX: &str = "_wardriving";

/// A capture file found in the data directory.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureFile {
    pub path: PathBuf,
    pub file_name: String,
    pub session: SessionName,
}

/// Finds `.csv` capture files directly inside a data directory.
#[derive(Debug, Clone)]
pub struct CaptureDiscovery {
    session_suffix: String,
    excluded: Vec<PathBuf>,
}

impl Default for CaptureDiscovery {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_SUFFIX)
    }
}

impl CaptureDiscovery {
    pub fn new(session_suffix: impl Into<String>) -> Self {
        Self {
            session_suffix: session_suffix.into(),
            excluded: Vec::new(),
        }
    }

    /// Skip a file that lives next to the captures (e.g. the OUI cache).
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded.push(path.into());
        self
    }

    pub fn probe(&self, path: &Path) -> bool {
        path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
            && !self.excluded.iter().any(|ex| same_file(ex, path))
    }

    /// List capture files sorted by file name.
    ///
    /// Entries that cannot be read are logged and skipped.
    pub fn scan(&self, data_dir: &Path) -> Vec<CaptureFile> {
        let mut captures = Vec::new();

        for entry in WalkDir::new(data_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping unreadable entry in {}: {}", data_dir.display(), err);
                    continue;
                }
            };
            let path = entry.path();
            if !self.probe(path) {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().to_string();
            captures.push(CaptureFile {
                path: path.to_path_buf(),
                session: SessionName::from_file_name(&file_name, &self.session_suffix),
                file_name,
            });
        }

        captures
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
