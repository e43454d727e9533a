use crate::types::{Details, KataType, SessionStatus, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// TaskLogEntry
// ---------------------------------------------------------------------------

/// Immutable record of how one task resolved within a session. The only
/// post-hoc mutation is the runner's abandon override on the final entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLogEntry {
    pub task_id: Uuid,
    pub description: String,
    pub category: String,
    pub status: TaskStatus,
    pub timestamp: DateTime<Utc>,
    /// Seconds spent on the task.
    pub duration: i64,
    #[serde(default)]
    pub details: Details,
    #[serde(default)]
    pub notes: String,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub total_tasks: usize,
    pub mastered: usize,
    pub deferred: usize,
    pub abandoned: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: Uuid,
    pub kata_type: KataType,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    /// Total wall-clock seconds, filled in at finalization.
    pub total_duration: Option<i64>,
    pub status: Option<SessionStatus>,
    pub tasks: Vec<TaskLogEntry>,
    #[serde(default)]
    pub summary: SessionSummary,
}

impl Session {
    pub fn begin(kata_type: KataType) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            kata_type,
            start_time: Utc::now(),
            end_time: None,
            total_duration: None,
            status: None,
            tasks: Vec::new(),
            summary: SessionSummary::default(),
        }
    }

    pub fn push_entry(&mut self, entry: TaskLogEntry) {
        self.tasks.push(entry);
    }

    fn count_summary(&mut self) {
        self.summary = SessionSummary {
            total_tasks: self.tasks.len(),
            mastered: self.count(TaskStatus::Mastered),
            deferred: self.count(TaskStatus::Deferred),
            abandoned: self.count(TaskStatus::Abandoned),
        };
    }

    fn count(&self, status: TaskStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }

    fn close(&mut self, status: SessionStatus) {
        let now = Utc::now();
        self.total_duration = Some((now - self.start_time).num_seconds());
        self.end_time = Some(now);
        self.status = Some(status);
        self.count_summary();
    }

    /// Finalize a run that reached the end of the task list. Mastered iff
    /// every entry mastered, otherwise partial.
    pub fn finalize(&mut self) {
        let all_mastered =
            !self.tasks.is_empty() && self.tasks.iter().all(|t| t.status == TaskStatus::Mastered);
        let status = if all_mastered {
            SessionStatus::Mastered
        } else {
            SessionStatus::Partial
        };
        self.close(status);
    }

    /// Finalize an interrupted run. The entry appended for the task the user
    /// cancelled on is forced to abandoned, whatever the handler reported.
    pub fn abandon(&mut self) {
        if let Some(last) = self.tasks.last_mut() {
            last.status = TaskStatus::Abandoned;
        }
        self.close(SessionStatus::Abandoned);
    }

    /// Counts toward completion stats and streaks.
    pub fn is_completed(&self) -> bool {
        matches!(
            self.status,
            Some(SessionStatus::Mastered) | Some(SessionStatus::Partial)
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
