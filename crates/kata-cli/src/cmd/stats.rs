use crate::{prompt, render, theme};
use anyhow::{Context, Result};
use chrono::{Datelike, Duration, NaiveDate, Utc};
use kata_core::calendar::generate_calendar;
use kata_core::session::Session;
use kata_core::stats;
use kata_core::store::{DailyLog, Store};
use std::io;

const CONFIRM_PHRASE: &str = "DELETE MY DATA";

/// Widest grid the terminal gets before the all-time view starts clipping
/// its oldest weeks.
const MAX_WEEKS: usize = 52;

pub fn run(store: &Store, reset: bool, restore: bool) -> Result<()> {
    if reset {
        return reset_flow(store);
    }
    if restore {
        return restore_flow(store);
    }

    let logs = store.all_logs()?;
    if logs.is_empty() {
        println!(
            "{}",
            theme::info("No kata history yet. Start your first kata with 'devkata start'.")
        );
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let year = today.year();
    let items = [
        "Last 7 days".to_string(),
        "Last 30 days".to_string(),
        "Last 90 days".to_string(),
        format!("This year ({year})"),
        "All time".to_string(),
    ];
    let Some(choice) = prompt::select("Time period:", &items)? else {
        return super::bail_cancelled();
    };
    let view = period_view(choice, &logs, today);

    if view.sessions.is_empty() {
        println!(
            "{}",
            theme::info("No katas completed in the selected time period.")
        );
        return Ok(());
    }

    let calendar = generate_calendar(&logs, view.weeks, view.custom_start, today);
    render::render_calendar(&calendar, &view.calendar_title);
    render::render_overview(
        &view.overview_title,
        stats::total_completed(&view.sessions),
        stats::streak(&logs, today),
        stats::average_duration_minutes(&view.sessions),
    );
    render::render_categories(&stats::category_stats(&view.sessions));
    render::render_resources(
        &stats::articles_read(&view.sessions),
        &stats::repos_reviewed(&view.sessions),
    );
    println!();
    Ok(())
}

// ---------------------------------------------------------------------------
// Period selection
// ---------------------------------------------------------------------------

struct PeriodView {
    sessions: Vec<Session>,
    weeks: usize,
    custom_start: Option<NaiveDate>,
    /// Names the week span the grid shows.
    calendar_title: String,
    /// Names the range the numbers aggregate, which is narrower than the
    /// grid for the day-based periods.
    overview_title: String,
}

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

fn weeks_through_today(start: NaiveDate, today: NaiveDate) -> usize {
    let days = (today - sunday_on_or_before(start)).num_days().max(0);
    (days / 7 + 1) as usize
}

fn period_view(choice: usize, logs: &[DailyLog], today: NaiveDate) -> PeriodView {
    match choice {
        0 => PeriodView {
            sessions: stats::sessions_in_range(logs, Some(7), today),
            weeks: 2,
            custom_start: None,
            calendar_title: "Last 2 Weeks".to_string(),
            overview_title: "Last 7 Days".to_string(),
        },
        1 => PeriodView {
            sessions: stats::sessions_in_range(logs, Some(30), today),
            weeks: 5,
            custom_start: None,
            calendar_title: "Last 5 Weeks".to_string(),
            overview_title: "Last 30 Days".to_string(),
        },
        2 => PeriodView {
            sessions: stats::sessions_in_range(logs, Some(90), today),
            weeks: 13,
            custom_start: None,
            calendar_title: "Last 13 Weeks".to_string(),
            overview_title: "Last 90 Days".to_string(),
        },
        3 => {
            let year = today.year();
            let prefix = format!("{year}-");
            let sessions = logs
                .iter()
                .filter(|l| l.date.starts_with(&prefix))
                .flat_map(|l| l.sessions.clone())
                .collect();
            // from_ymd_opt only fails on out-of-range dates; Jan 1 is safe.
            let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
            PeriodView {
                sessions,
                weeks: weeks_through_today(start, today),
                custom_start: Some(start),
                calendar_title: format!("Year {year}"),
                overview_title: format!("This Year ({year})"),
            }
        }
        _ => {
            let oldest = logs
                .first()
                .and_then(|l| l.date.parse::<NaiveDate>().ok())
                .unwrap_or(today);
            PeriodView {
                sessions: stats::sessions_in_range(logs, None, today),
                weeks: weeks_through_today(oldest, today).min(MAX_WEEKS),
                custom_start: None,
                calendar_title: "All Time".to_string(),
                overview_title: "All Time".to_string(),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Reset
// ---------------------------------------------------------------------------

/// The three gates of the destructive-reset ceremony, in order. A seam so
/// the guard logic is testable without a terminal.
trait ResetPrompts {
    fn typed_phrase(&mut self) -> io::Result<Option<String>>;
    fn final_confirm(&mut self) -> io::Result<Option<bool>>;
    fn backup_first(&mut self) -> io::Result<Option<bool>>;
}

struct TerminalResetPrompts;

impl ResetPrompts for TerminalResetPrompts {
    fn typed_phrase(&mut self) -> io::Result<Option<String>> {
        prompt::input_matching("Type \"DELETE MY DATA\" to confirm", CONFIRM_PHRASE)
    }

    fn final_confirm(&mut self) -> io::Result<Option<bool>> {
        prompt::confirm("Absolutely sure?")
    }

    fn backup_first(&mut self) -> io::Result<Option<bool>> {
        prompt::confirm("Create a backup first?")
    }
}

fn reset_flow(store: &Store) -> Result<()> {
    reset_with(store, &mut TerminalResetPrompts)
}

fn reset_with(store: &Store, prompts: &mut impl ResetPrompts) -> Result<()> {
    println!("\n{}", theme::error("  Reset statistics"));
    println!("{}", theme::rule());
    println!("  This permanently deletes:");
    println!("    - every daily log under {}", store.logs_dir().display());
    println!("    - your streak and calendar history");
    println!("  Saved katas and settings are kept.\n");

    let count = store.log_count()?;
    if count == 0 {
        println!(
            "{}",
            theme::info("No statistics data found. Nothing to reset.")
        );
        return Ok(());
    }
    println!("  Found {count} log file(s).\n");

    let Some(_phrase) = prompts.typed_phrase()? else {
        return data_is_safe();
    };
    let Some(sure) = prompts.final_confirm()? else {
        return data_is_safe();
    };
    if !sure {
        return data_is_safe();
    }
    let Some(backup) = prompts.backup_first()? else {
        return data_is_safe();
    };
    if backup {
        let info = store.create_backup().context("could not create the backup")?;
        println!(
            "{}",
            theme::success(&format!(
                "Backup created: {} ({} file(s))",
                info.name, info.file_count
            ))
        );
    }

    store.reset_all().context("could not delete the logs")?;
    println!("{}", theme::success("All statistics have been reset."));
    Ok(())
}

fn data_is_safe() -> Result<()> {
    println!("{}", theme::info("Reset cancelled. Your data is safe."));
    Ok(())
}

// ---------------------------------------------------------------------------
// Restore
// ---------------------------------------------------------------------------

/// Restoring over live data is spelled out as a replacement; restoring
/// into an empty store is a plain restore.
fn restore_confirm_message(existing_logs: usize) -> &'static str {
    if existing_logs > 0 {
        "Replace current statistics with this backup?"
    } else {
        "Restore this backup?"
    }
}

fn restore_flow(store: &Store) -> Result<()> {
    let backups = store.list_backups()?;
    if backups.is_empty() {
        println!(
            "{}",
            theme::info("No backups found. One is offered during 'devkata stats --reset'.")
        );
        return Ok(());
    }

    let labels: Vec<String> = backups
        .iter()
        .map(|b| {
            let created = b
                .created
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| b.name.clone());
            format!("{created} ({} log file(s))", b.file_count)
        })
        .collect();
    let Some(idx) = prompt::select("Restore which backup?", &labels)? else {
        return super::bail_cancelled();
    };

    let existing = store.log_count()?;
    if existing > 0 {
        println!(
            "{}",
            theme::info("Current logs will be replaced by the backup.")
        );
    }
    let Some(go) = prompt::confirm(restore_confirm_message(existing))? else {
        return super::bail_cancelled();
    };
    if !go {
        return super::bail_cancelled();
    }

    let restored = store
        .restore_backup(&backups[idx].name)
        .context("restore failed")?;
    println!(
        "{}",
        theme::success(&format!("Restored {restored} log file(s)."))
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kata_core::types::KataType;
    use tempfile::TempDir;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    /// Scripted answers for the reset ceremony.
    struct Scripted {
        phrase: Option<String>,
        sure: Option<bool>,
        backup: Option<bool>,
    }

    impl Scripted {
        fn answers(phrase: Option<&str>, sure: Option<bool>, backup: Option<bool>) -> Self {
            Self {
                phrase: phrase.map(str::to_string),
                sure,
                backup,
            }
        }
    }

    impl ResetPrompts for Scripted {
        fn typed_phrase(&mut self) -> io::Result<Option<String>> {
            Ok(self.phrase.clone())
        }

        fn final_confirm(&mut self) -> io::Result<Option<bool>> {
            Ok(self.sure)
        }

        fn backup_first(&mut self) -> io::Result<Option<bool>> {
            Ok(self.backup)
        }
    }

    fn seeded_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("devKata")).unwrap();
        let mut session = Session::begin(KataType::MiniKata);
        session.finalize();
        store.append_session("2025-06-01", &session).unwrap();
        (dir, store)
    }

    #[test]
    fn reset_declined_at_final_confirm_keeps_logs() {
        let (_dir, store) = seeded_store();
        let mut prompts = Scripted::answers(Some(CONFIRM_PHRASE), Some(false), Some(true));
        reset_with(&store, &mut prompts).unwrap();
        assert_eq!(store.log_count().unwrap(), 1);
        assert!(store.list_backups().unwrap().is_empty());
    }

    #[test]
    fn reset_cancelled_at_phrase_keeps_logs() {
        let (_dir, store) = seeded_store();
        let mut prompts = Scripted::answers(None, Some(true), Some(true));
        reset_with(&store, &mut prompts).unwrap();
        assert_eq!(store.log_count().unwrap(), 1);
    }

    #[test]
    fn confirmed_reset_deletes_logs_after_optional_backup() {
        let (_dir, store) = seeded_store();
        let mut prompts = Scripted::answers(Some(CONFIRM_PHRASE), Some(true), Some(true));
        reset_with(&store, &mut prompts).unwrap();
        assert_eq!(store.log_count().unwrap(), 0);
        assert_eq!(store.list_backups().unwrap().len(), 1);
    }

    #[test]
    fn confirmed_reset_without_backup_just_deletes() {
        let (_dir, store) = seeded_store();
        let mut prompts = Scripted::answers(Some(CONFIRM_PHRASE), Some(true), Some(false));
        reset_with(&store, &mut prompts).unwrap();
        assert_eq!(store.log_count().unwrap(), 0);
        assert!(store.list_backups().unwrap().is_empty());
    }

    #[test]
    fn restore_prompt_names_replacement_only_over_existing_data() {
        assert_eq!(
            restore_confirm_message(3),
            "Replace current statistics with this backup?"
        );
        assert_eq!(restore_confirm_message(0), "Restore this backup?");
    }

    #[test]
    fn seven_day_view_labels_overview_with_selected_period() {
        let view = period_view(0, &[], day("2025-06-11"));
        assert_eq!(view.calendar_title, "Last 2 Weeks");
        assert_eq!(view.overview_title, "Last 7 Days");
    }

    #[test]
    fn year_view_week_count_reaches_today() {
        // 2025-01-01 snaps back to Sunday 2024-12-29; 2025-06-11 falls in
        // the 24th week of that grid.
        assert_eq!(weeks_through_today(day("2025-01-01"), day("2025-06-11")), 24);
        assert_eq!(weeks_through_today(day("2025-06-08"), day("2025-06-11")), 1);
    }

    #[test]
    fn all_time_view_caps_grid_width() {
        let log = DailyLog::empty("2019-01-01");
        let view = period_view(4, &[log], day("2025-06-11"));
        assert_eq!(view.weeks, MAX_WEEKS);
        assert_eq!(view.calendar_title, "All Time");
    }
}
