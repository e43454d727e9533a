use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form detail payload attached to handler outcomes and log entries.
pub type Details = serde_json::Map<String, serde_json::Value>;

// ---------------------------------------------------------------------------
// KataType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KataType {
    MiniKata,
    NamiKata,
    DevKata,
}

impl KataType {
    /// Tiers in ascending scope. Order matters: higher tiers progressively
    /// include all lower tiers' default tasks.
    pub fn all() -> &'static [KataType] {
        &[KataType::MiniKata, KataType::NamiKata, KataType::DevKata]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            KataType::MiniKata => "miniKata",
            KataType::NamiKata => "namiKata",
            KataType::DevKata => "devKata",
        }
    }
}

impl fmt::Display for KataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for KataType {
    type Err = crate::error::KataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miniKata" => Ok(KataType::MiniKata),
            "namiKata" => Ok(KataType::NamiKata),
            "devKata" => Ok(KataType::DevKata),
            _ => Err(crate::error::KataError::InvalidKataType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Difficulty
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Task / session statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Mastered,
    Deferred,
    Abandoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Mastered,
    Partial,
    Abandoned,
}

impl SessionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::Mastered => "mastered",
            SessionStatus::Partial => "partial",
            SessionStatus::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Date keys
// ---------------------------------------------------------------------------

/// Zero-padded `YYYY-MM-DD` key. All range filtering and streak math compares
/// these strings lexicographically, never parsed dates.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn today_key() -> String {
    date_key(chrono::Utc::now().date_naive())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
