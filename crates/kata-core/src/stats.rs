use crate::session::Session;
use crate::store::DailyLog;
use crate::types::date_key;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

// ---------------------------------------------------------------------------
// Session aggregates
// ---------------------------------------------------------------------------

/// Count of completed katas (status mastered or partial).
pub fn total_completed(sessions: &[Session]) -> usize {
    sessions.iter().filter(|s| s.is_completed()).count()
}

/// Mean session duration in minutes over completed sessions that carry a
/// duration, rounded to 1 decimal. 0 if no eligible sessions.
pub fn average_duration_minutes(sessions: &[Session]) -> f64 {
    let durations: Vec<i64> = sessions
        .iter()
        .filter(|s| s.is_completed())
        .filter_map(|s| s.total_duration)
        .collect();
    if durations.is_empty() {
        return 0.0;
    }
    let total: i64 = durations.iter().sum();
    let minutes = total as f64 / durations.len() as f64 / 60.0;
    (minutes * 10.0).round() / 10.0
}

/// Flatten sessions across logs. `days = None` means everything; otherwise
/// only logs with `date >= today - days` (lexicographic string cutoff).
pub fn sessions_in_range(logs: &[DailyLog], days: Option<i64>, today: NaiveDate) -> Vec<Session> {
    match days {
        None => logs.iter().flat_map(|l| l.sessions.clone()).collect(),
        Some(days) => {
            let cutoff = date_key(today - chrono::Duration::days(days));
            logs.iter()
                .filter(|l| l.date >= cutoff)
                .flat_map(|l| l.sessions.clone())
                .collect()
        }
    }
}

// ---------------------------------------------------------------------------
// Streak
// ---------------------------------------------------------------------------

/// Consecutive qualifying days ending at or before `today`, scanning back at
/// most 365 days. Days with no activity before the streak begins are
/// skipped; the first gap after it begins ends it.
pub fn streak(logs: &[DailyLog], today: NaiveDate) -> u32 {
    let qualifying: HashSet<&str> = logs
        .iter()
        .filter(|l| l.sessions.iter().any(|s| s.is_completed()))
        .map(|l| l.date.as_str())
        .collect();

    let mut count = 0;
    let mut started = false;
    let mut day = today;
    for _ in 0..365 {
        if qualifying.contains(date_key(day).as_str()) {
            count += 1;
            started = true;
        } else if started {
            break;
        }
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    count
}

// ---------------------------------------------------------------------------
// Category ranking
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Task entries grouped by category, sorted by count descending. Ties keep
/// first-occurrence order (stable sort over insertion order).
pub fn category_stats(sessions: &[Session]) -> Vec<CategoryCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for session in sessions {
        for entry in &session.tasks {
            if !counts.contains_key(&entry.category) {
                order.push(entry.category.clone());
            }
            *counts.entry(entry.category.clone()).or_insert(0) += 1;
        }
    }
    let mut stats: Vec<CategoryCount> = order
        .into_iter()
        .map(|category| {
            let count = counts[&category];
            CategoryCount { category, count }
        })
        .collect();
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

// ---------------------------------------------------------------------------
// Resources (articles / repos)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// Articles referenced by article/read tasks, deduplicated by URL;
/// first-seen title wins.
pub fn articles_read(sessions: &[Session]) -> Vec<Resource> {
    collect_resources(sessions, &["article", "read"], "title", "url")
}

/// Repositories referenced by repo/github tasks, deduplicated by URL;
/// first-seen name wins.
pub fn repos_reviewed(sessions: &[Session]) -> Vec<Resource> {
    collect_resources(sessions, &["repo", "github"], "repoName", "repoUrl")
}

fn collect_resources(
    sessions: &[Session],
    keywords: &[&str],
    title_key: &str,
    url_key: &str,
) -> Vec<Resource> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut resources: Vec<Resource> = Vec::new();
    for session in sessions {
        for entry in &session.tasks {
            let desc = entry.description.to_lowercase();
            if !keywords.iter().any(|k| desc.contains(k)) {
                continue;
            }
            let (Some(title), Some(url)) = (
                entry.details.get(title_key).and_then(|v| v.as_str()),
                entry.details.get(url_key).and_then(|v| v.as_str()),
            ) else {
                continue;
            };
            if seen.insert(url.to_string()) {
                resources.push(Resource {
                    title: title.to_string(),
                    url: url.to_string(),
                });
            }
        }
    }
    resources
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{SessionSummary, TaskLogEntry};
    use crate::types::{Details, KataType, SessionStatus, TaskStatus};
    use chrono::Utc;
    use uuid::Uuid;

    fn session(status: SessionStatus, duration: Option<i64>) -> Session {
        Session {
            session_id: Uuid::new_v4(),
            kata_type: KataType::MiniKata,
            start_time: Utc::now(),
            end_time: Some(Utc::now()),
            total_duration: duration,
            status: Some(status),
            tasks: Vec::new(),
            summary: SessionSummary::default(),
        }
    }

    fn entry(description: &str, category: &str, details: Details) -> TaskLogEntry {
        TaskLogEntry {
            task_id: Uuid::new_v4(),
            description: description.into(),
            category: category.into(),
            status: TaskStatus::Mastered,
            timestamp: Utc::now(),
            duration: 60,
            details,
            notes: String::new(),
        }
    }

    fn log_on(date: &str, sessions: Vec<Session>) -> DailyLog {
        let mut log = DailyLog::empty(date);
        log.sessions = sessions;
        log
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn total_completed_ignores_abandoned() {
        let sessions = vec![
            session(SessionStatus::Mastered, None),
            session(SessionStatus::Partial, None),
            session(SessionStatus::Abandoned, None),
        ];
        assert_eq!(total_completed(&sessions), 2);
    }

    #[test]
    fn average_duration_of_nothing_is_zero() {
        assert_eq!(average_duration_minutes(&[]), 0.0);
    }

    #[test]
    fn average_duration_rounds_to_one_decimal() {
        let sessions = vec![
            session(SessionStatus::Mastered, Some(600)),
            session(SessionStatus::Partial, Some(1200)),
            session(SessionStatus::Abandoned, Some(9000)),
            session(SessionStatus::Mastered, None),
        ];
        assert_eq!(average_duration_minutes(&sessions), 15.0);
    }

    #[test]
    fn range_none_flattens_everything() {
        let logs = vec![
            log_on("2025-01-01", vec![session(SessionStatus::Mastered, None)]),
            log_on(
                "2025-06-01",
                vec![
                    session(SessionStatus::Partial, None),
                    session(SessionStatus::Abandoned, None),
                ],
            ),
        ];
        let total: usize = logs.iter().map(|l| l.sessions.len()).sum();
        assert_eq!(sessions_in_range(&logs, None, day("2025-06-10")).len(), total);
    }

    #[test]
    fn range_cutoff_is_lexicographic() {
        let logs = vec![
            log_on("2025-05-01", vec![session(SessionStatus::Mastered, None)]),
            log_on("2025-06-08", vec![session(SessionStatus::Mastered, None)]),
            log_on("2025-06-10", vec![session(SessionStatus::Mastered, None)]),
        ];
        let recent = sessions_in_range(&logs, Some(7), day("2025-06-10"));
        assert_eq!(recent.len(), 2);
    }

    #[test]
    fn streak_counts_consecutive_days_back_from_today() {
        let logs = vec![
            log_on("2025-06-10", vec![session(SessionStatus::Mastered, None)]),
            log_on("2025-06-09", vec![session(SessionStatus::Partial, None)]),
            log_on("2025-06-08", vec![session(SessionStatus::Mastered, None)]),
            // Gap at 2025-06-07, then older activity that must not count.
            log_on("2025-06-05", vec![session(SessionStatus::Mastered, None)]),
        ];
        assert_eq!(streak(&logs, day("2025-06-10")), 3);
    }

    #[test]
    fn streak_skips_quiet_days_before_it_starts() {
        // Nothing today or yesterday; the streak ended two days ago.
        let logs = vec![
            log_on("2025-06-08", vec![session(SessionStatus::Mastered, None)]),
            log_on("2025-06-07", vec![session(SessionStatus::Mastered, None)]),
        ];
        assert_eq!(streak(&logs, day("2025-06-10")), 2);
    }

    #[test]
    fn abandoned_only_day_does_not_qualify() {
        let logs = vec![log_on(
            "2025-06-10",
            vec![session(SessionStatus::Abandoned, None)],
        )];
        assert_eq!(streak(&logs, day("2025-06-10")), 0);
    }

    #[test]
    fn no_logs_no_streak() {
        assert_eq!(streak(&[], day("2025-06-10")), 0);
    }

    #[test]
    fn category_stats_sorted_with_stable_ties() {
        let mut s = session(SessionStatus::Mastered, None);
        s.tasks = vec![
            entry("Posture check", "health", Details::new()),
            entry("Read a tech article", "education", Details::new()),
            entry("Quick stretch break", "health", Details::new()),
            entry("Set daily goals", "productivity", Details::new()),
        ];
        let stats = category_stats(&[s]);
        assert_eq!(stats[0].category, "health");
        assert_eq!(stats[0].count, 2);
        // education and productivity tie at 1; first-seen order is kept.
        assert_eq!(stats[1].category, "education");
        assert_eq!(stats[2].category, "productivity");
    }

    #[test]
    fn articles_dedup_by_url_first_seen_title_wins() {
        let mut details1 = Details::new();
        details1.insert("title".into(), "Borrow Checker Deep Dive".into());
        details1.insert("url".into(), "https://dev.to/a".into());
        let mut details2 = Details::new();
        details2.insert("title".into(), "Renamed Later".into());
        details2.insert("url".into(), "https://dev.to/a".into());

        let mut s = session(SessionStatus::Mastered, None);
        s.tasks = vec![
            entry("Read a tech article", "education", details1),
            entry("Read a tech article", "education", details2),
            // Missing details are skipped, not an error.
            entry("Read a tech article", "education", Details::new()),
        ];
        let articles = articles_read(&[s]);
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Borrow Checker Deep Dive");
    }

    #[test]
    fn repos_match_repo_or_github_descriptions() {
        let mut details = Details::new();
        details.insert("repoName".into(), "tokio-rs/tokio".into());
        details.insert("repoUrl".into(), "https://github.com/tokio-rs/tokio".into());

        let mut s = session(SessionStatus::Mastered, None);
        s.tasks = vec![entry("Random repo review on GitHub", "education", details)];
        let repos = repos_reviewed(&[s]);
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].title, "tokio-rs/tokio");
    }
}
