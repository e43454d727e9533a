use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Store layout constants
// ---------------------------------------------------------------------------

pub const KATA_FILE: &str = "kata.json";
pub const USER_CONFIG_FILE: &str = "config.json";
pub const LOGS_DIR: &str = "logs";
pub const SANDBOX_DIR: &str = "sandbox";

pub const LOG_PREFIX: &str = "kataLog_";
pub const BACKUP_PREFIX: &str = "logs_backup_";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn kata_path(home: &Path) -> PathBuf {
    home.join(KATA_FILE)
}

pub fn user_config_path(home: &Path) -> PathBuf {
    home.join(USER_CONFIG_FILE)
}

pub fn logs_dir(home: &Path) -> PathBuf {
    home.join(LOGS_DIR)
}

pub fn sandbox_dir(home: &Path) -> PathBuf {
    home.join(SANDBOX_DIR)
}

pub fn log_path(home: &Path, date: &str) -> PathBuf {
    logs_dir(home).join(format!("{LOG_PREFIX}{date}.json"))
}

pub fn backup_dir(home: &Path, name: &str) -> PathBuf {
    home.join(name)
}

/// `true` for filenames that belong to the daily-log store.
pub fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_PREFIX) && name.ends_with(".json")
}

/// Extract the `YYYY-MM-DD` date key from a log filename.
pub fn log_file_date(name: &str) -> Option<&str> {
    name.strip_prefix(LOG_PREFIX)?.strip_suffix(".json")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_helpers() {
        let home = Path::new("/home/u/.config/devKata");
        assert_eq!(
            log_path(home, "2025-06-01"),
            PathBuf::from("/home/u/.config/devKata/logs/kataLog_2025-06-01.json")
        );
        assert_eq!(
            kata_path(home),
            PathBuf::from("/home/u/.config/devKata/kata.json")
        );
    }

    #[test]
    fn log_filename_parsing() {
        assert!(is_log_file("kataLog_2025-06-01.json"));
        assert!(!is_log_file("config.json"));
        assert_eq!(
            log_file_date("kataLog_2025-06-01.json"),
            Some("2025-06-01")
        );
        assert_eq!(log_file_date("notes.txt"), None);
    }
}
