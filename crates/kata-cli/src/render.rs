//! Terminal rendering for the stats view: the activity calendar, the
//! overview block, category bars, and resource lists.

use crate::theme;
use kata_core::calendar::CalendarData;
use kata_core::stats::{CategoryCount, Resource};
use kata_core::types::KataType;

const FILLED: &str = "■";
const EMPTY: &str = "□";
const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CATEGORY_BAR_WIDTH: usize = 30;
const RESOURCE_LIMIT: usize = 10;

fn tier_color(kata_type: KataType, glyph: &str) -> String {
    match kata_type {
        KataType::MiniKata => theme::green(glyph),
        KataType::NamiKata => theme::cyan(glyph),
        KataType::DevKata => theme::purple(glyph),
    }
}

/// One filled cell per active day, colored by tier; pink marks days with
/// more than one session.
fn cell(kata_types: &[KataType], count: usize) -> String {
    if count == 0 {
        return theme::dim(EMPTY);
    }
    if count > 1 {
        return theme::pink(FILLED);
    }
    match kata_types.first() {
        Some(kt) => tier_color(*kt, FILLED),
        None => theme::pink(FILLED),
    }
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

pub fn render_calendar(data: &CalendarData, title: &str) {
    println!("\n{}", theme::orange(&format!("  Activity - {title}")));
    println!("{}", theme::rule());

    // Month labels above their starting week-column. The weekday gutter is
    // 4 characters wide, each week-column 2 (glyph + space).
    let mut header = " ".repeat(4);
    for label in &data.month_labels {
        let position = 4 + label.week_index * 2;
        while header.chars().count() < position {
            header.push(' ');
        }
        header.push_str(&label.display_label);
    }
    println!("{}", theme::orange(&header));

    for (weekday, name) in WEEKDAYS.iter().enumerate() {
        let mut row = format!("{name:<4}");
        for week in &data.weeks {
            let day = &week[weekday];
            row.push_str(&cell(&day.kata_types, day.count));
            row.push(' ');
        }
        println!("{row}");
    }

    println!(
        "\n  {} {}  {} {}  {} {}  {} {}  {} {}",
        theme::dim(EMPTY),
        theme::dim("none"),
        theme::green(FILLED),
        "mini",
        theme::cyan(FILLED),
        "nami",
        theme::purple(FILLED),
        "dev",
        theme::pink(FILLED),
        "multiple",
    );
}

// ---------------------------------------------------------------------------
// Overview
// ---------------------------------------------------------------------------

pub fn render_overview(period: &str, completed: usize, streak: u32, average_minutes: f64) {
    println!("\n{}", theme::orange(&format!("  Overview - {period}")));
    println!("{}", theme::rule());
    println!(
        "  Katas completed   {}",
        theme::green(&completed.to_string())
    );
    println!(
        "  Current streak    {}",
        theme::green(&format!("{streak} day(s)"))
    );
    println!(
        "  Average session   {}",
        theme::green(&format!("{average_minutes} min"))
    );
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub fn category_bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * CATEGORY_BAR_WIDTH).div_ceil(max);
    "█".repeat(width)
}

pub fn render_categories(categories: &[CategoryCount]) {
    if categories.is_empty() {
        return;
    }
    println!("\n{}", theme::orange("  Top categories"));
    println!("{}", theme::rule());
    let max = categories.iter().map(|c| c.count).max().unwrap_or(0);
    for c in categories.iter().take(5) {
        println!(
            "  {:<14} {} {}",
            c.category,
            theme::purple(&category_bar(c.count, max)),
            theme::dim(&c.count.to_string())
        );
    }
}

// ---------------------------------------------------------------------------
// Resources
// ---------------------------------------------------------------------------

fn render_resource_list(title: &str, resources: &[Resource]) {
    if resources.is_empty() {
        return;
    }
    println!("\n{}", theme::orange(&format!("  {title}")));
    println!("{}", theme::rule());
    for resource in resources.iter().take(RESOURCE_LIMIT) {
        println!("  {}", resource.title);
        println!("    {}", theme::cyan(&resource.url));
    }
    if resources.len() > RESOURCE_LIMIT {
        println!(
            "  {}",
            theme::dim(&format!("... and {} more", resources.len() - RESOURCE_LIMIT))
        );
    }
}

pub fn render_resources(articles: &[Resource], repos: &[Resource]) {
    render_resource_list("Articles read", articles);
    render_resource_list("Repositories reviewed", repos);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scales_to_fixed_width() {
        assert_eq!(category_bar(10, 10).chars().count(), 30);
        assert_eq!(category_bar(5, 10).chars().count(), 15);
        // Any non-zero count shows at least one block.
        assert_eq!(category_bar(1, 100).chars().count(), 1);
        assert!(category_bar(0, 0).is_empty());
    }

    #[test]
    fn empty_cell_is_dim_outline() {
        assert!(cell(&[], 0).contains(EMPTY));
    }

    #[test]
    fn busy_day_renders_pink() {
        let c = cell(&[KataType::MiniKata, KataType::DevKata], 2);
        assert!(c.contains(FILLED));
        assert!(c.contains("255;121;198"));
    }
}
