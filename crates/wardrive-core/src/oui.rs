use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use wardrive_types::{RANDOMIZED_VENDOR, UNKNOWN_VENDOR};

const ASSIGNMENT_COLUMN: &str = "Assignment";
const ORGANIZATION_COLUMN: &str = "Organization Name";

/// Locally administered bit of the first octet.
const LOCAL_ADMIN_MASK: i32 = 0x02;

/// OUI prefix table mapping `AA:BB:CC` to an organization name.
///
/// Built once per run and read-only afterwards. An empty table resolves every
/// address to `Unknown`, including randomized ones.
#[derive(Debug, Clone, Default)]
pub struct VendorTable {
    entries: HashMap<String, String>,
}

impl VendorTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from `(assignment, organization)` pairs where `assignment` is six hex digits.
    ///
    /// Entries with a malformed assignment or an empty organization are dropped.
    pub fn from_entries<I, A, O>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, O)>,
        A: AsRef<str>,
        O: AsRef<str>,
    {
        let mut table = Self::default();
        for (assignment, organization) in entries {
            table.insert(assignment.as_ref(), organization.as_ref());
        }
        table
    }

    /// Parse an IEEE registry CSV (`Registry,Assignment,Organization Name,...`).
    ///
    /// Never fails: a decoding error stops the read and keeps the entries
    /// collected so far.
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut table = Self::default();
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = match csv_reader.byte_headers() {
            Ok(headers) => headers.clone(),
            Err(err) => {
                log::warn!("Could not read OUI header row: {}", err);
                return table;
            }
        };

        let column = |name: &str| {
            headers
                .iter()
                .position(|h| String::from_utf8_lossy(h).trim() == name)
        };
        let (Some(assignment_idx), Some(organization_idx)) =
            (column(ASSIGNMENT_COLUMN), column(ORGANIZATION_COLUMN))
        else {
            log::warn!("OUI registry is missing the Assignment/Organization Name columns");
            return table;
        };

        for record in csv_reader.byte_records() {
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    log::warn!("Could not parse OUI database: {}", err);
                    break;
                }
            };

            let field = |idx: usize| {
                record
                    .get(idx)
                    .map(|f| String::from_utf8_lossy(f).trim().to_string())
                    .unwrap_or_default()
            };
            table.insert(&field(assignment_idx), &field(organization_idx));
        }

        table
    }

    /// Load the registry from disk, degrading to an empty table when it is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        match File::open(path) {
            Ok(file) => {
                let table = Self::from_reader(file);
                log::info!("Loaded {} OUI entries from {}", table.len(), path.display());
                table
            }
            Err(err) => {
                log::warn!(
                    "OUI database unavailable at {} ({}); vendor lookups will show '{}'",
                    path.display(),
                    err,
                    UNKNOWN_VENDOR
                );
                Self::default()
            }
        }
    }

    fn insert(&mut self, assignment: &str, organization: &str) {
        let assignment = assignment.trim().to_uppercase();
        let organization = organization.trim();
        if assignment.len() != 6 || !assignment.is_ascii() || organization.is_empty() {
            return;
        }

        let prefix = format!(
            "{}:{}:{}",
            &assignment[0..2],
            &assignment[2..4],
            &assignment[4..6]
        );
        self.entries.insert(prefix, organization.to_string());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the vendor of a hardware address.
    ///
    /// Locally administered addresses resolve to `Randomized` before the
    /// table is consulted; unmatched prefixes resolve to `Unknown`.
    pub fn lookup(&self, address: &str) -> &str {
        if address.is_empty() || self.entries.is_empty() {
            return UNKNOWN_VENDOR;
        }

        let prefix: String = address.to_uppercase().chars().take(8).collect();

        if is_locally_administered(&prefix) == Some(true) {
            return RANDOMIZED_VENDOR;
        }

        self.entries
            .get(&prefix)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_VENDOR)
    }
}

/// Check the locally administered bit of the first octet.
///
/// Returns `None` when the first two characters are not hex.
pub fn is_locally_administered(address: &str) -> Option<bool> {
    let first_octet: String = address.chars().take(2).collect();
    i32::from_str_radix(first_octet.trim(), 16)
        .ok()
        .map(|octet| octet & LOCAL_ADMIN_MASK != 0)
}
