//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating an isolated data directory
//! - Placing capture files, OUI registries and configuration
//! - Executing CLI commands with proper context

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use crate::fixtures::{CaptureBuilder, SampleFiles, oui_registry};

/// Configuration written into every new world: never touch the network.
const OFFLINE_CONFIG: &str = "[oui]\noffline = true\n";

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use wardrive_testing::{CaptureBuilder, CaptureRow, TestWorld};
///
/// let world = TestWorld::new().with_capture(
///     "2024-06-01_wardriving.csv",
///     &CaptureBuilder::wigle().row(CaptureRow::wifi("aa:bb:cc:dd:ee:ff", -50, 51.5, -0.1)),
/// );
/// assert!(world.data_dir().join("2024-06-01_wardriving.csv").exists());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    env_vars: HashMap<String, String>,
    samples: SampleFiles,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment with an offline `config.toml`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("data");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::write(data_dir.join("config.toml"), OFFLINE_CONFIG)
            .expect("Failed to write config");

        Self {
            temp_dir,
            data_dir,
            env_vars: HashMap::new(),
            samples: SampleFiles::new(),
        }
    }

    /// Get the capture data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Get the temp directory root.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Default output location inside the data directory.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join("wardrive.geojson")
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Write a capture file into the data directory.
    pub fn with_capture(self, file_name: &str, capture: &CaptureBuilder) -> Self {
        capture
            .write_to(&self.data_dir.join(file_name))
            .expect("Failed to write capture");
        self
    }

    /// Write an arbitrary file into the data directory.
    pub fn with_file(self, file_name: &str, contents: &str) -> Self {
        std::fs::write(self.data_dir.join(file_name), contents).expect("Failed to write file");
        self
    }

    /// Replace `config.toml` in the data directory.
    pub fn with_config(self, toml: &str) -> Self {
        self.with_file("config.toml", toml)
    }

    /// Place a fresh OUI registry at the default cache location.
    pub fn with_oui(self, entries: &[(&str, &str)]) -> Self {
        self.with_file("oui.csv", &oui_registry(entries))
    }

    /// Backdate a file in the data directory.
    pub fn age_file(&self, file_name: &str, age: Duration) -> Result<()> {
        let when = SystemTime::now()
            .checked_sub(age)
            .context("Age is too large")?;
        filetime::set_file_mtime(
            self.data_dir.join(file_name),
            filetime::FileTime::from_system_time(when),
        )?;
        Ok(())
    }

    /// Copy a checked-in sample capture into the data directory.
    pub fn copy_sample(&self, sample_name: &str, dest_name: &str) -> Result<()> {
        self.samples
            .copy_to(sample_name, &self.data_dir.join(dest_name))
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `cargo_bin_cmd!("wardrive")`).
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir").arg(self.data_dir());

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("WARDRIVE_DATA");
        cmd.env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Parse the GeoJSON document at the default output location.
    pub fn read_output(&self) -> Result<Value> {
        self.read_json(&self.output_path())
    }

    pub fn read_json(&self, path: &Path) -> Result<Value> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_world_is_offline() {
        let world = TestWorld::new();
        let config = std::fs::read_to_string(world.data_dir().join("config.toml")).unwrap();
        assert!(config.contains("offline = true"));
        assert!(!world.output_path().exists());
    }

    #[test]
    fn test_age_file() -> Result<()> {
        let world = TestWorld::new().with_oui(&[("C0A36E", "SKY UK LIMITED")]);
        world.age_file("oui.csv", Duration::from_secs(40 * 86_400))?;

        let modified = std::fs::metadata(world.data_dir().join("oui.csv"))?.modified()?;
        let age = SystemTime::now().duration_since(modified)?;
        assert!(age > Duration::from_secs(39 * 86_400));
        Ok(())
    }
}
