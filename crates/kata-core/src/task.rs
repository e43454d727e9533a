use crate::types::{Details, Difficulty, KataType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Field names stay camelCase on disk so existing kata.json files keep loading.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskMetadata {
    /// Estimated duration in seconds.
    pub estimated_duration: u32,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: Uuid,
    pub kata_type: KataType,
    pub category: String,
    pub description: String,
    pub metadata: TaskMetadata,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_session: Option<Details>,
}
