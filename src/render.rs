//! Terminal rendering of the month grid.
//!
//! Layout follows the classic month view: a label row, a Sunday-first
//! day-name row, then the day numbers with blank cells before day 1.
//! Chips are listed under the grid, grouped by day, since a terminal cell
//! has no room for them inline.

use chrono::Datelike;
use owo_colors::OwoColorize;

use agenda_core::{MonthCursor, Schedule, ScheduleCollection};

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 5;

/// Colored one-line rendering.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Schedule {
    fn render(&self) -> String {
        let time_label = if self.spans_multiple_days() {
            format!(
                "({} - {})",
                self.start_date.format("%m-%d"),
                self.end_date.format("%m-%d")
            )
        } else {
            format!(
                "{} - {}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )
        };

        if self.completed {
            format!(
                "{} {} {}",
                "✓".green(),
                self.title.strikethrough().dimmed(),
                time_label.dimmed()
            )
        } else {
            format!("{} {}", self.title, time_label.dimmed())
        }
    }
}

/// Render one month of the collection as text.
pub fn render_month(cursor: MonthCursor, schedules: &ScheduleCollection) -> String {
    let grid = cursor.grid();
    let width = DAY_NAMES.len() * CELL_WIDTH;
    let mut lines = Vec::new();

    lines.push(format!("{:^width$}", cursor.label()).bold().to_string());
    lines.push(
        DAY_NAMES
            .iter()
            .map(|name| format!("{name:>width$}", width = CELL_WIDTH))
            .collect::<String>(),
    );

    let mut row = " ".repeat(grid.leading_blanks as usize * CELL_WIDTH);
    let mut column = grid.leading_blanks;
    for day in 1..=grid.days_in_month {
        let busy = cursor
            .date(day)
            .map(|date| !schedules.on(date).is_empty())
            .unwrap_or(false);

        let cell = format!("{day:>width$}", width = CELL_WIDTH);
        if busy {
            row.push_str(&cell.bold().to_string());
        } else {
            row.push_str(&cell);
        }

        column += 1;
        if column == 7 {
            lines.push(std::mem::take(&mut row));
            column = 0;
        }
    }
    if !row.is_empty() {
        lines.push(row);
    }

    let chip_lines = chip_lines(cursor, schedules);
    if !chip_lines.is_empty() {
        lines.push(String::new());
        lines.extend(chip_lines);
    }

    lines.join("\n")
}

/// One line per chip, for every day of the month that has any.
fn chip_lines(cursor: MonthCursor, schedules: &ScheduleCollection) -> Vec<String> {
    let mut lines = Vec::new();

    for date in schedules.dates().filter(|d| cursor.contains(*d)) {
        for schedule in schedules.on(date) {
            lines.push(format!("  {:>2}  {}", date.day(), schedule.render()));
        }
    }

    lines
}
