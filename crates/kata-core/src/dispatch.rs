use crate::error::Result;
use crate::task::Task;
use crate::types::Details;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// HandlerKind
// ---------------------------------------------------------------------------

/// Closed set of content-specific task handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    Posture,
    DailyGoals,
    Article,
    RepoReview,
    YesterdayReview,
    Typing,
    Challenge,
    Sandbox,
    Hydration,
    Stretch,
    Communications,
    /// Generic yes/no fallback for descriptions no route matches.
    Confirm,
}

// ---------------------------------------------------------------------------
// Routing table
// ---------------------------------------------------------------------------

pub struct Route {
    pub kind: HandlerKind,
    pub keywords: &'static [&'static str],
}

/// Ordered routing table, evaluated top to bottom; first match wins.
///
/// The order is behaviorally significant: a description containing several
/// matchable keywords (e.g. "review the sandbox repo") resolves to the
/// earliest route, so "repo" outranks "review" and "review" outranks
/// "sandbox". Reorder only with a matching change to the task catalog.
pub const ROUTES: &[Route] = &[
    Route {
        kind: HandlerKind::Posture,
        keywords: &["posture"],
    },
    Route {
        kind: HandlerKind::DailyGoals,
        keywords: &["goals"],
    },
    Route {
        kind: HandlerKind::Article,
        keywords: &["article", "read"],
    },
    Route {
        kind: HandlerKind::RepoReview,
        keywords: &["repo", "github"],
    },
    Route {
        kind: HandlerKind::YesterdayReview,
        keywords: &["review", "yesterday"],
    },
    Route {
        kind: HandlerKind::Typing,
        keywords: &["typing"],
    },
    Route {
        kind: HandlerKind::Challenge,
        keywords: &["challenge", "codewars", "leetcode"],
    },
    Route {
        kind: HandlerKind::Sandbox,
        keywords: &["sandbox"],
    },
    Route {
        kind: HandlerKind::Hydration,
        keywords: &["hydrate", "water"],
    },
    Route {
        kind: HandlerKind::Stretch,
        keywords: &["stretch"],
    },
    Route {
        kind: HandlerKind::Communications,
        keywords: &["communication", "email", "slack"],
    },
];

/// Select the handler for a task description (case-insensitive substring
/// match against [`ROUTES`]).
pub fn route(description: &str) -> HandlerKind {
    let desc = description.to_lowercase();
    for r in ROUTES {
        if r.keywords.iter().any(|k| desc.contains(k)) {
            return r.kind;
        }
    }
    HandlerKind::Confirm
}

// ---------------------------------------------------------------------------
// Handler contract
// ---------------------------------------------------------------------------

/// What every task handler returns. `cancelled` takes precedence over
/// `completed`: a cancelled outcome aborts the whole session.
#[derive(Debug, Clone, Default)]
pub struct HandlerOutcome {
    pub completed: bool,
    pub cancelled: bool,
    pub details: Details,
}

impl HandlerOutcome {
    pub fn completed(details: Details) -> Self {
        Self {
            completed: true,
            cancelled: false,
            details,
        }
    }

    pub fn deferred(details: Details) -> Self {
        Self {
            completed: false,
            cancelled: false,
            details,
        }
    }

    pub fn cancelled() -> Self {
        Self {
            completed: false,
            cancelled: true,
            details: Details::new(),
        }
    }
}

/// Seam between the session runner and the interactive layer. The CLI
/// implements this with prompt-driven handlers; tests script it.
pub trait TaskHandler {
    fn handle(&mut self, task: &Task, kind: HandlerKind) -> Result<HandlerOutcome>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_default_catalog_descriptions() {
        assert_eq!(route("Posture check"), HandlerKind::Posture);
        assert_eq!(route("Set daily goals"), HandlerKind::DailyGoals);
        assert_eq!(route("Read a tech article"), HandlerKind::Article);
        assert_eq!(route("Random repo review on GitHub"), HandlerKind::RepoReview);
        assert_eq!(route("Review yesterday's code"), HandlerKind::YesterdayReview);
        assert_eq!(route("Typing practice for 5 minutes"), HandlerKind::Typing);
        assert_eq!(route("Coding challenge on Codewars"), HandlerKind::Challenge);
        assert_eq!(route("Open the coding sandbox"), HandlerKind::Sandbox);
        assert_eq!(route("Hydrate with a glass of water"), HandlerKind::Hydration);
        assert_eq!(route("Quick stretch break"), HandlerKind::Stretch);
        assert_eq!(
            route("Communications check (email and Slack)"),
            HandlerKind::Communications
        );
    }

    #[test]
    fn unmatched_description_falls_back_to_confirm() {
        assert_eq!(route("Meditate for two minutes"), HandlerKind::Confirm);
    }

    #[test]
    fn priority_order_resolves_ambiguous_descriptions() {
        // "repo" (route 4) outranks "review" (route 5) and "sandbox" (route 8).
        assert_eq!(route("review the sandbox repo"), HandlerKind::RepoReview);
        // "read" outranks "repo".
        assert_eq!(route("read about the repo"), HandlerKind::Article);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(route("POSTURE CHECK"), HandlerKind::Posture);
    }
}
