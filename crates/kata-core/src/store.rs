use crate::config::UserConfig;
use crate::error::{KataError, Result};
use crate::io;
use crate::paths;
use crate::session::Session;
use crate::task::Task;
use crate::types::KataType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// DailyLog
// ---------------------------------------------------------------------------

/// Per-date container of every session that occurred that day. Created
/// lazily on first append; append-only in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub date: String,
    pub app_version: String,
    /// Legacy field kept so older log files keep round-tripping.
    #[serde(default)]
    pub katas: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

impl DailyLog {
    pub fn empty(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            app_version: APP_VERSION.to_string(),
            katas: serde_json::Map::new(),
            sessions: Vec::new(),
        }
    }
}

/// The kata store file: one ordered task list per tier.
pub type KataBook = BTreeMap<KataType, Vec<Task>>;

// ---------------------------------------------------------------------------
// Backups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub name: String,
    pub created: Option<DateTime<Utc>>,
    pub file_count: usize,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// All persistence for one user, rooted at a single directory (default
/// `~/.config/devKata`). Constructed once at startup and passed by
/// reference; read-modify-write with no file locking, single-process
/// assumption.
#[derive(Debug, Clone)]
pub struct Store {
    home: PathBuf,
}

impl Store {
    pub fn open(home: impl Into<PathBuf>) -> Result<Self> {
        let home = home.into();
        io::ensure_dir(&home)?;
        Ok(Self { home })
    }

    /// Resolve the store location: explicit override (flag or env) wins,
    /// otherwise `~/.config/devKata`.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self> {
        let home = match explicit {
            Some(p) => p,
            None => home::home_dir()
                .ok_or(KataError::HomeNotFound)?
                .join(".config")
                .join("devKata"),
        };
        Self::open(home)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn logs_dir(&self) -> PathBuf {
        paths::logs_dir(&self.home)
    }

    pub fn sandbox_dir(&self) -> PathBuf {
        paths::sandbox_dir(&self.home)
    }

    // -----------------------------------------------------------------------
    // Katas
    // -----------------------------------------------------------------------

    /// Missing file reads as an empty book, never an error.
    pub fn katas(&self) -> Result<KataBook> {
        let path = paths::kata_path(&self.home);
        if !path.exists() {
            return Ok(KataBook::new());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn kata(&self, kata_type: KataType) -> Result<Vec<Task>> {
        Ok(self.katas()?.remove(&kata_type).unwrap_or_default())
    }

    /// Read-modify-write of the single tier, atomic at the file level.
    pub fn save_kata(&self, kata_type: KataType, tasks: &[Task]) -> Result<()> {
        let mut book = self.katas()?;
        book.insert(kata_type, tasks.to_vec());
        let data = serde_json::to_string_pretty(&book)?;
        io::atomic_write(&paths::kata_path(&self.home), data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // User config
    // -----------------------------------------------------------------------

    pub fn user_config(&self) -> Result<UserConfig> {
        let path = paths::user_config_path(&self.home);
        if !path.exists() {
            return Ok(UserConfig::default());
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_user_config(&self, config: &UserConfig) -> Result<()> {
        let data = serde_json::to_string_pretty(config)?;
        io::atomic_write(&paths::user_config_path(&self.home), data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Daily logs
    // -----------------------------------------------------------------------

    /// Missing file reads as a fresh empty log for that date.
    pub fn read_log(&self, date: &str) -> Result<DailyLog> {
        let path = paths::log_path(&self.home, date);
        if !path.exists() {
            return Ok(DailyLog::empty(date));
        }
        let data = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn write_log(&self, log: &DailyLog) -> Result<()> {
        let data = serde_json::to_string_pretty(log)?;
        io::atomic_write(&paths::log_path(&self.home, &log.date), data.as_bytes())
    }

    pub fn append_session(&self, date: &str, session: &Session) -> Result<()> {
        let mut log = self.read_log(date)?;
        log.sessions.push(session.clone());
        self.write_log(&log)
    }

    /// Every daily log, sorted ascending by date key.
    pub fn all_logs(&self) -> Result<Vec<DailyLog>> {
        let dir = self.logs_dir();
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut dates: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(date) = paths::log_file_date(&name) {
                dates.push(date.to_string());
            }
        }
        dates.sort();
        dates.iter().map(|d| self.read_log(d)).collect()
    }

    pub fn log_count(&self) -> Result<usize> {
        let dir = self.logs_dir();
        if !dir.exists() {
            return Ok(0);
        }
        let mut count = 0;
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if paths::is_log_file(&entry.file_name().to_string_lossy()) {
                count += 1;
            }
        }
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Backups
    // -----------------------------------------------------------------------

    /// Backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        let mut backups: Vec<BackupInfo> = Vec::new();
        for entry in std::fs::read_dir(&self.home)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            let Some(stamp) = name.strip_prefix(paths::BACKUP_PREFIX) else {
                continue;
            };
            let created = stamp
                .parse::<i64>()
                .ok()
                .and_then(DateTime::from_timestamp_millis);
            let file_count = count_log_files(&entry.path())?;
            backups.push(BackupInfo {
                name,
                created,
                file_count,
            });
        }
        backups.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(backups)
    }

    /// Snapshot the whole logs directory as `logs_backup_<unix-ms>`.
    pub fn create_backup(&self) -> Result<BackupInfo> {
        let name = format!("{}{}", paths::BACKUP_PREFIX, Utc::now().timestamp_millis());
        let target = paths::backup_dir(&self.home, &name);
        io::copy_dir_all(&self.logs_dir(), &target)?;
        let file_count = count_log_files(&target)?;
        Ok(BackupInfo {
            name,
            created: Some(Utc::now()),
            file_count,
        })
    }

    /// Replace the logs directory with the named backup. Returns how many
    /// log files were restored.
    pub fn restore_backup(&self, name: &str) -> Result<usize> {
        let source = paths::backup_dir(&self.home, name);
        if !name.starts_with(paths::BACKUP_PREFIX) || !source.is_dir() {
            return Err(KataError::BackupNotFound(name.to_string()));
        }
        let logs = self.logs_dir();
        if logs.exists() {
            std::fs::remove_dir_all(&logs)?;
        }
        io::copy_dir_all(&source, &logs)?;
        count_log_files(&logs)
    }

    /// Delete the entire logs directory. The confirmation ceremony lives in
    /// the CLI; this is the unguarded primitive.
    pub fn reset_all(&self) -> Result<()> {
        let logs = self.logs_dir();
        if logs.exists() {
            std::fs::remove_dir_all(&logs)?;
        }
        Ok(())
    }
}

fn count_log_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if paths::is_log_file(&entry.file_name().to_string_lossy()) {
            count += 1;
        }
    }
    Ok(count)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
