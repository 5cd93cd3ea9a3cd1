//! Contribution heatmap rendering.
//!
//! Renders a commit date multiset as a GitHub-style contribution grid in
//! SVG: one column per week, one row per weekday, and a five-level color
//! scale for the per-day commit count.

use std::collections::HashMap;

use time::{Date, Duration, Month};

/// Cell edge length in pixels.
const CELL_SIZE: i64 = 12;
/// Gutter between adjacent cells.
const CELL_SPACING: i64 = 2;
const CELL_STEP: i64 = CELL_SIZE + CELL_SPACING;
/// Grid origin, leaving room for the day and month labels.
const GRID_X: i64 = 50;
const GRID_Y: i64 = 30;
const IMAGE_HEIGHT: i64 = 250;
const MONTH_LABEL_Y: i64 = 20;
const DAY_LABEL_X: i64 = 10;
/// A month label sits above every fourth week column.
const MONTH_LABEL_STRIDE: usize = 4;
const LABEL_COLOR: &str = "#24292f";
const BACKGROUND_COLOR: &str = "#ffffff";

const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Renders commit dates as an SVG contribution graph.
///
/// Returns `None` when there are no dates to draw. The grid covers whole
/// weeks: columns run from the Sunday on or before the earliest date to the
/// Saturday on or after the latest, rows are Sunday through Saturday, and
/// the image width adapts to the week count.
pub fn render(dates: &[Date]) -> Option<String> {
    let earliest = *dates.iter().min()?;
    let latest = *dates.iter().max()?;

    let mut counts: HashMap<Date, u32> = HashMap::new();
    for date in dates {
        *counts.entry(*date).or_insert(0) += 1;
    }

    let grid_start = sunday_on_or_before(earliest);
    let weeks = ((saturday_on_or_after(latest) - grid_start).whole_days() + 1) / 7;
    let width = GRID_X + weeks * CELL_STEP + DAY_LABEL_X;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{IMAGE_HEIGHT}" font-family="sans-serif" font-size="12">"#
    ));
    svg.push('\n');

    // Background
    svg.push_str(&format!(
        r#"  <rect width="{width}" height="{IMAGE_HEIGHT}" fill="{BACKGROUND_COLOR}"/>"#
    ));
    svg.push('\n');

    // One cell per day, empty cells included
    for week in 0..weeks {
        for day in 0..7 {
            let date = grid_start + Duration::days(week * 7 + day);
            let count = counts.get(&date).copied().unwrap_or(0);
            let x = GRID_X + week * CELL_STEP;
            let y = GRID_Y + day * CELL_STEP;
            svg.push_str(&format!(
                r#"  <rect x="{x}" y="{y}" width="{CELL_SIZE}" height="{CELL_SIZE}" fill="{}"/>"#,
                cell_color(count)
            ));
            svg.push('\n');
        }
    }

    // Month labels
    for week in (0..weeks).step_by(MONTH_LABEL_STRIDE) {
        let month = month_abbrev((grid_start + Duration::days(week * 7)).month());
        let x = GRID_X + week * CELL_STEP;
        svg.push_str(&format!(
            r#"  <text x="{x}" y="{MONTH_LABEL_Y}" fill="{LABEL_COLOR}">{month}</text>"#
        ));
        svg.push('\n');
    }

    // Day labels
    for (row, label) in DAY_LABELS.iter().enumerate() {
        let y = GRID_Y + row as i64 * CELL_STEP + CELL_SIZE / 2 + 4;
        svg.push_str(&format!(
            r#"  <text x="{DAY_LABEL_X}" y="{y}" fill="{LABEL_COLOR}">{label}</text>"#
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");

    Some(svg)
}

/// GitHub's five-level contribution palette.
fn cell_color(count: u32) -> &'static str {
    if count == 0 {
        "#ebedf0"
    } else if count < 2 {
        "#c6e48b"
    } else if count < 4 {
        "#7bc96f"
    } else if count < 6 {
        "#239a3b"
    } else {
        "#196127"
    }
}

fn month_abbrev(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Sunday on or before `date`.
fn sunday_on_or_before(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_sunday()))
}

/// Saturday on or after `date`.
fn saturday_on_or_after(date: Date) -> Date {
    date + Duration::days(i64::from(6 - date.weekday().number_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_no_dates_renders_nothing() {
        assert!(render(&[]).is_none());
    }

    #[test]
    fn test_single_date_renders_one_week_grid() {
        // A Wednesday: the grid snaps to its Sunday-to-Saturday week.
        let svg = render(&[date!(2025 - 03 - 05)]).unwrap();

        assert!(svg.starts_with("<svg "));
        assert_eq!(svg.matches("<rect x=").count(), 7);
        // Wednesday sits on the fourth row of the only column.
        assert!(svg.contains(r##"<rect x="50" y="72" width="12" height="12" fill="#c6e48b"/>"##));
        assert!(svg.contains(">Mar</text>"));
        for label in DAY_LABELS {
            assert!(svg.contains(&format!(">{label}</text>")));
        }
    }

    #[test]
    fn test_columns_cover_sunday_aligned_span() {
        // Wed Jan 1 to Mon Jan 13 spans three Sunday-aligned weeks.
        let svg = render(&[date!(2025 - 01 - 01), date!(2025 - 01 - 13)]).unwrap();
        assert_eq!(svg.matches("<rect x=").count(), 3 * 7);
    }

    #[test]
    fn test_repeated_dates_darken_the_cell() {
        let svg = render(&vec![date!(2025 - 03 - 05); 6]).unwrap();

        assert!(svg.contains(r##"fill="#196127""##));
        assert!(!svg.contains(r##"fill="#c6e48b""##));
    }

    #[test]
    fn test_color_scale_thresholds() {
        assert_eq!(cell_color(0), "#ebedf0");
        assert_eq!(cell_color(1), "#c6e48b");
        assert_eq!(cell_color(2), "#7bc96f");
        assert_eq!(cell_color(3), "#7bc96f");
        assert_eq!(cell_color(4), "#239a3b");
        assert_eq!(cell_color(5), "#239a3b");
        assert_eq!(cell_color(6), "#196127");
        assert_eq!(cell_color(40), "#196127");
    }

    #[test]
    fn test_width_follows_week_count() {
        let one_week = render(&[date!(2025 - 03 - 05)]).unwrap();
        assert!(one_week.contains(r#"width="74""#));

        // Ten weeks: 50 + 10 * 14 + 10.
        let ten_weeks = render(&[date!(2025 - 01 - 05), date!(2025 - 03 - 15)]).unwrap();
        assert!(ten_weeks.contains(r#"width="200""#));
    }
}
