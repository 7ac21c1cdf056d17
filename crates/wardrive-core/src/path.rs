use std::path::PathBuf;

/// Environment variable that overrides the default data directory.
pub const DATA_DIR_ENV: &str = "WARDRIVE_DATA";

/// Resolve the capture data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. WARDRIVE_DATA environment variable (with tilde expansion)
/// 3. `data` relative to the current directory
pub fn resolve_data_dir(explicit_path: Option<&str>) -> PathBuf {
    if let Some(path) = explicit_path {
        return expand_tilde(path);
    }

    if let Ok(env_path) = std::env::var(DATA_DIR_ENV)
        && !env_path.is_empty()
    {
        return expand_tilde(&env_path);
    }

    PathBuf::from("data")
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return home;
    }
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
