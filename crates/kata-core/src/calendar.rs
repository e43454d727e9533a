use crate::store::DailyLog;
use crate::types::{date_key, KataType};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Layout types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: String,
    /// Distinct kata tiers completed that date (mastered or partial only),
    /// in order of first appearance.
    pub kata_types: Vec<KataType>,
    /// Number of qualifying sessions that date.
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthLabel {
    pub week_index: usize,
    pub label: &'static str,
    /// Abbreviated to one character when fewer than two week-columns
    /// (four character-cells) remain before the next label.
    pub display_label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarData {
    /// `weeks_to_show` week-rows of exactly 7 day-cells, earliest first,
    /// each row aligned Sunday through Saturday.
    pub weeks: Vec<Vec<DayCell>>,
    pub month_labels: Vec<MonthLabel>,
}

// ---------------------------------------------------------------------------
// Grid generation
// ---------------------------------------------------------------------------

fn sunday_on_or_before(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Build the heat-map grid. Without a custom start the grid covers the
/// `weeks_to_show` whole weeks before the most recent Sunday on/before
/// `today`, so no cell is ever dated after today. A custom start (year
/// view) is snapped back to Sunday and may run past today.
pub fn generate_calendar(
    logs: &[DailyLog],
    weeks_to_show: usize,
    custom_start: Option<NaiveDate>,
    today: NaiveDate,
) -> CalendarData {
    let mut activity: HashMap<&str, (Vec<KataType>, usize)> = HashMap::new();
    for log in logs {
        for session in log.sessions.iter().filter(|s| s.is_completed()) {
            let (types, count) = activity.entry(log.date.as_str()).or_default();
            if !types.contains(&session.kata_type) {
                types.push(session.kata_type);
            }
            *count += 1;
        }
    }

    let start = match custom_start {
        Some(date) => sunday_on_or_before(date),
        None => sunday_on_or_before(today) - Duration::days(7 * weeks_to_show as i64),
    };

    let mut weeks: Vec<Vec<DayCell>> = Vec::with_capacity(weeks_to_show);
    let mut week_starts: Vec<NaiveDate> = Vec::with_capacity(weeks_to_show);
    let mut current = start;
    for _ in 0..weeks_to_show {
        week_starts.push(current);
        let mut days: Vec<DayCell> = Vec::with_capacity(7);
        for _ in 0..7 {
            let key = date_key(current);
            let (kata_types, count) = activity.get(key.as_str()).cloned().unwrap_or_default();
            days.push(DayCell {
                date: key,
                kata_types,
                count,
            });
            current += Duration::days(1);
        }
        weeks.push(days);
    }

    let month_labels = month_labels(&week_starts);
    CalendarData {
        weeks,
        month_labels,
    }
}

/// A label is emitted at the first week-column whose first day falls in a
/// different month than the previous label's.
fn month_labels(week_starts: &[NaiveDate]) -> Vec<MonthLabel> {
    let mut labels: Vec<(usize, usize)> = Vec::new(); // (week_index, month0)
    let mut last_month: Option<usize> = None;
    for (week_index, start) in week_starts.iter().enumerate() {
        let month = start.month0() as usize;
        if last_month != Some(month) {
            labels.push((week_index, month));
            last_month = Some(month);
        }
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, &(week_index, month))| {
            let next_week = labels
                .get(i + 1)
                .map(|&(w, _)| w)
                .unwrap_or(week_starts.len());
            // Each week-column is two character-cells wide (glyph + space).
            let chars_available = (next_week - week_index) * 2;
            let label = MONTH_NAMES[month];
            let display_label = if chars_available < 4 {
                label[..1].to_string()
            } else {
                label.to_string()
            };
            MonthLabel {
                week_index,
                label,
                display_label,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
