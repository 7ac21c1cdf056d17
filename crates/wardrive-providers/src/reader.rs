use std::path::{Path, PathBuf};

use crate::header::{HeaderMap, RawRow};
use crate::{Error, Result};

/// A capture file split into its column header and data body.
///
/// Anything above the header line (WiGLE writes a pre-header with app and
/// device metadata) is ignored.
#[derive(Debug, Clone)]
pub struct CaptureLog {
    path: PathBuf,
    /// 1-based line number of the header.
    header_line: usize,
    headers: HeaderMap,
    body: String,
}

impl CaptureLog {
    /// Read a capture from disk, replacing invalid UTF-8.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        Self::parse(path, &text)
    }

    /// Locate the header line in already-decoded text.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        for (idx, (line, body_start)) in lines_with_ends(text).enumerate() {
            let headers = HeaderMap::from_line(line);
            if headers.is_capture_header() {
                return Ok(Self {
                    path: path.to_path_buf(),
                    header_line: idx + 1,
                    headers,
                    body: text[body_start..].to_string(),
                });
            }
        }

        Err(Error::MissingHeader(path.to_path_buf()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header_line(&self) -> usize {
        self.header_line
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Data rows keyed to the header. Blank lines are skipped; rows may be
    /// shorter or longer than the header.
    pub fn rows(&self) -> impl Iterator<Item = Result<RawRow>> + '_ {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(self.body.as_bytes())
            .into_records()
            .map(|record| {
                let record = record?;
                Ok(RawRow::from_record(&self.headers, record.iter()))
            })
    }
}

/// Lines ended by `\r\n`, `\r` or `\n`, each paired with the offset just past its ending.
fn lines_with_ends(text: &str) -> impl Iterator<Item = (&str, usize)> {
    let bytes = text.as_bytes();
    let mut start = 0;

    std::iter::from_fn(move || {
        if start >= bytes.len() {
            return None;
        }

        let line_start = start;
        let mut end = start;
        while end < bytes.len() && bytes[end] != b'\n' && bytes[end] != b'\r' {
            end += 1;
        }
        let line = &text[line_start..end];

        start = match bytes.get(end) {
            Some(b'\r') if bytes.get(end + 1) == Some(&b'\n') => end + 2,
            Some(_) => end + 1,
            None => end,
        };
        Some((line, start))
    })
}
