use crate::dispatch::{route, TaskHandler};
use crate::error::{KataError, Result};
use crate::session::{Session, TaskLogEntry};
use crate::task::Task;
use crate::types::{KataType, TaskStatus};
use chrono::Utc;

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one kata run: the finalized session record plus the task list
/// with completion flags and last-session details updated in place. The
/// caller persists both — session to today's log first, then the kata, so a
/// kata-save failure never loses session history.
#[derive(Debug)]
pub struct RunOutcome {
    pub session: Session,
    pub tasks: Vec<Task>,
}

impl RunOutcome {
    pub fn aborted(&self) -> bool {
        matches!(
            self.session.status,
            Some(crate::types::SessionStatus::Abandoned)
        )
    }
}

// ---------------------------------------------------------------------------
// Session runner
// ---------------------------------------------------------------------------

/// Walk the task list in order: NotStarted -> Running(index) -> Completed or
/// Abandoned. Each task is routed to a handler; a cancelled outcome stops
/// iteration immediately and abandons the session.
pub fn run_session<H: TaskHandler>(
    kata_type: KataType,
    mut tasks: Vec<Task>,
    handler: &mut H,
) -> Result<RunOutcome> {
    if tasks.is_empty() {
        return Err(KataError::EmptyKata(kata_type.to_string()));
    }

    let mut session = Session::begin(kata_type);

    for task in tasks.iter_mut() {
        let kind = route(&task.description);
        let started = Utc::now();
        let outcome = handler.handle(task, kind)?;
        let now = Utc::now();

        let status = if outcome.cancelled {
            TaskStatus::Abandoned
        } else if outcome.completed {
            TaskStatus::Mastered
        } else {
            TaskStatus::Deferred
        };

        if status == TaskStatus::Mastered {
            task.completed = true;
            task.last_session = Some(outcome.details.clone());
        }

        session.push_entry(TaskLogEntry {
            task_id: task.task_id,
            description: task.description.clone(),
            category: task.category.clone(),
            status,
            timestamp: now,
            duration: (now - started).num_seconds(),
            details: outcome.details,
            notes: String::new(),
        });

        if outcome.cancelled {
            session.abandon();
            return Ok(RunOutcome { session, tasks });
        }
    }

    session.finalize();
    Ok(RunOutcome { session, tasks })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::new_task;
    use crate::dispatch::{HandlerKind, HandlerOutcome};
    use crate::types::{Details, SessionStatus};

    /// Scripted handler: pops outcomes front to back.
    struct Script {
        outcomes: Vec<HandlerOutcome>,
        seen: Vec<HandlerKind>,
    }

    impl Script {
        fn new(outcomes: Vec<HandlerOutcome>) -> Self {
            Self {
                outcomes,
                seen: Vec::new(),
            }
        }
    }

    impl TaskHandler for Script {
        fn handle(&mut self, _task: &Task, kind: HandlerKind) -> Result<HandlerOutcome> {
            self.seen.push(kind);
            Ok(self.outcomes.remove(0))
        }
    }

    fn two_task_kata() -> Vec<Task> {
        vec![
            new_task("Posture check", KataType::MiniKata),
            new_task("Hydrate with a glass of water", KataType::MiniKata),
        ]
    }

    fn details_with(key: &str, value: &str) -> Details {
        let mut d = Details::new();
        d.insert(key.to_string(), serde_json::Value::String(value.into()));
        d
    }

    #[test]
    fn empty_kata_is_an_error() {
        let mut handler = Script::new(vec![]);
        let err = run_session(KataType::DevKata, Vec::new(), &mut handler).unwrap_err();
        assert!(matches!(err, KataError::EmptyKata(_)));
    }

    #[test]
    fn all_mastered_run_is_mastered() {
        let mut handler = Script::new(vec![
            HandlerOutcome::completed(Details::new()),
            HandlerOutcome::completed(Details::new()),
        ]);
        let out = run_session(KataType::MiniKata, two_task_kata(), &mut handler).unwrap();

        assert_eq!(out.session.status, Some(SessionStatus::Mastered));
        assert_eq!(out.session.summary.mastered, 2);
        assert!(out.tasks.iter().all(|t| t.completed));
        assert_eq!(
            handler.seen,
            vec![HandlerKind::Posture, HandlerKind::Hydration]
        );
    }

    #[test]
    fn deferred_task_makes_partial() {
        let mut handler = Script::new(vec![
            HandlerOutcome::completed(Details::new()),
            HandlerOutcome::deferred(Details::new()),
        ]);
        let out = run_session(KataType::MiniKata, two_task_kata(), &mut handler).unwrap();

        assert_eq!(out.session.status, Some(SessionStatus::Partial));
        assert_eq!(out.session.summary.deferred, 1);
        assert!(!out.tasks[1].completed);
    }

    #[test]
    fn cancellation_abandons_and_stops_iterating() {
        let mut handler = Script::new(vec![
            HandlerOutcome::completed(details_with("userConfirmed", "true")),
            HandlerOutcome::cancelled(),
            // Third outcome must never be consumed.
            HandlerOutcome::completed(Details::new()),
        ]);
        let mut tasks = two_task_kata();
        tasks.push(new_task("Quick stretch break", KataType::MiniKata));

        let out = run_session(KataType::MiniKata, tasks, &mut handler).unwrap();

        assert!(out.aborted());
        assert_eq!(out.session.status, Some(SessionStatus::Abandoned));
        assert_eq!(out.session.tasks.len(), 2);
        assert_eq!(out.session.tasks[1].status, TaskStatus::Abandoned);
        assert_eq!(handler.seen.len(), 2);
        // Task 1 mastery is preserved for persistence.
        assert!(out.tasks[0].completed);
        assert!(out.tasks[0].last_session.is_some());
        assert!(!out.tasks[2].completed);
    }

    #[test]
    fn cancelled_outcome_beats_completed_flag() {
        let mut handler = Script::new(vec![HandlerOutcome {
            completed: true,
            cancelled: true,
            details: Details::new(),
        }]);
        let out = run_session(
            KataType::MiniKata,
            vec![new_task("Posture check", KataType::MiniKata)],
            &mut handler,
        )
        .unwrap();

        assert_eq!(out.session.status, Some(SessionStatus::Abandoned));
        assert_eq!(out.session.tasks[0].status, TaskStatus::Abandoned);
        assert!(!out.tasks[0].completed);
    }
}
