use crate::task::{Task, TaskMetadata};
use crate::types::{Difficulty, KataType};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Metadata inference
// ---------------------------------------------------------------------------

struct MetadataRule {
    keywords: &'static [&'static str],
    estimated_duration: u32,
    difficulty: Difficulty,
    tags: &'static [&'static str],
}

/// Ordered, case-insensitive keyword table. First matching rule wins, so the
/// rule order is part of the contract.
const METADATA_RULES: &[MetadataRule] = &[
    MetadataRule {
        keywords: &["posture", "stretch", "hydrate"],
        estimated_duration: 300,
        difficulty: Difficulty::Easy,
        tags: &["health", "ergonomics"],
    },
    MetadataRule {
        keywords: &["code", "challenge", "sandbox"],
        estimated_duration: 900,
        difficulty: Difficulty::Medium,
        tags: &["programming", "practice"],
    },
    MetadataRule {
        keywords: &["read", "article", "review"],
        estimated_duration: 600,
        difficulty: Difficulty::Easy,
        tags: &["education", "knowledge"],
    },
    MetadataRule {
        keywords: &["typing"],
        estimated_duration: 300,
        difficulty: Difficulty::Easy,
        tags: &["skill", "practice"],
    },
    MetadataRule {
        keywords: &["goals", "communications"],
        estimated_duration: 300,
        difficulty: Difficulty::Easy,
        tags: &["productivity", "planning"],
    },
];

/// Derive duration, difficulty, and tags from a free-text description.
/// Unmatched descriptions get a generic low-effort default.
pub fn infer_metadata(description: &str) -> TaskMetadata {
    let desc = description.to_lowercase();
    for rule in METADATA_RULES {
        if rule.keywords.iter().any(|k| desc.contains(k)) {
            return TaskMetadata {
                estimated_duration: rule.estimated_duration,
                difficulty: rule.difficulty,
                tags: rule.tags.iter().map(|t| t.to_string()).collect(),
            };
        }
    }
    TaskMetadata {
        estimated_duration: 300,
        difficulty: Difficulty::Easy,
        tags: Vec::new(),
    }
}

/// Build a task from a description, applying metadata inference. Used both
/// for catalog defaults and user-authored tasks.
pub fn new_task(description: impl Into<String>, kata_type: KataType) -> Task {
    let description = description.into();
    let metadata = infer_metadata(&description);
    let category = metadata
        .tags
        .first()
        .cloned()
        .unwrap_or_else(|| "general".to_string());
    Task {
        task_id: Uuid::new_v4(),
        kata_type,
        category,
        description,
        metadata,
        completed: false,
        last_session: None,
    }
}

// ---------------------------------------------------------------------------
// Built-in progressive task sets
// ---------------------------------------------------------------------------

const MINI_TASKS: &[&str] = &[
    "Posture check",
    "Set daily goals",
    "Hydrate with a glass of water",
    "Quick stretch break",
];

const NAMI_TASKS: &[&str] = &[
    "Read a tech article",
    "Typing practice for 5 minutes",
    "Communications check (email and Slack)",
];

const DEV_TASKS: &[&str] = &[
    "Review yesterday's code",
    "Coding challenge on Codewars",
    "Random repo review on GitHub",
    "Open the coding sandbox",
];

/// Default tasks for a tier. Higher tiers prepend every lower tier's
/// defaults in order: nami = mini + nami, dev = mini + nami + dev.
pub fn default_tasks(kata_type: KataType) -> Vec<Task> {
    let descriptions: Vec<&str> = match kata_type {
        KataType::MiniKata => MINI_TASKS.to_vec(),
        KataType::NamiKata => [MINI_TASKS, NAMI_TASKS].concat(),
        KataType::DevKata => [MINI_TASKS, NAMI_TASKS, DEV_TASKS].concat(),
    };
    descriptions
        .into_iter()
        .map(|d| new_task(d, kata_type))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wellness_keywords_map_to_health_tags() {
        let meta = infer_metadata("Posture check");
        assert_eq!(meta.estimated_duration, 300);
        assert_eq!(meta.difficulty, Difficulty::Easy);
        assert_eq!(meta.tags, vec!["health", "ergonomics"]);
    }

    #[test]
    fn coding_keywords_map_to_programming_tags() {
        let meta = infer_metadata("Open the coding sandbox");
        assert_eq!(meta.estimated_duration, 900);
        assert_eq!(meta.difficulty, Difficulty::Medium);
        assert_eq!(meta.tags, vec!["programming", "practice"]);
    }

    #[test]
    fn first_matching_rule_wins() {
        // "code" (rule 2) beats "review" (rule 3) because rule order is fixed.
        let meta = infer_metadata("Review yesterday's code");
        assert_eq!(meta.tags, vec!["programming", "practice"]);
    }

    #[test]
    fn unmatched_description_gets_generic_default() {
        let meta = infer_metadata("Water the office plants");
        assert_eq!(meta.estimated_duration, 300);
        assert_eq!(meta.difficulty, Difficulty::Easy);
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn category_is_first_tag_or_general() {
        assert_eq!(new_task("Posture check", KataType::MiniKata).category, "health");
        assert_eq!(
            new_task("Water the office plants", KataType::MiniKata).category,
            "general"
        );
    }

    #[test]
    fn higher_tiers_are_prefix_extensions() {
        let mini = default_tasks(KataType::MiniKata);
        let nami = default_tasks(KataType::NamiKata);
        let dev = default_tasks(KataType::DevKata);

        assert!(nami.len() > mini.len());
        assert!(dev.len() > nami.len());

        for (i, task) in mini.iter().enumerate() {
            assert_eq!(nami[i].description, task.description);
            assert_eq!(dev[i].description, task.description);
        }
        for (i, task) in nami.iter().enumerate() {
            assert_eq!(dev[i].description, task.description);
        }
    }

    #[test]
    fn default_tasks_carry_requested_tier() {
        for task in default_tasks(KataType::DevKata) {
            assert_eq!(task.kata_type, KataType::DevKata);
        }
    }
}
