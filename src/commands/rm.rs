use anyhow::Result;
use owo_colors::OwoColorize;

use agenda_core::MonthCursor;
use agenda_core::schedule::{parse_date, parse_time};

use crate::client::HttpClient;
use crate::controller::CalendarController;

pub async fn run(client: HttpClient, title: &str, date: &str, start: &str) -> Result<()> {
    let day = parse_date(date)?;
    let start_time = parse_time(start)?;

    let mut controller = CalendarController::new(client, MonthCursor::containing(day));
    controller.load().await?;

    // Deleting something that is not there is a no-op, not an error.
    let Some(schedule) = super::find_chip(controller.schedules(), day, title, start_time).cloned()
    else {
        println!("{}", "No matching schedule; nothing to delete.".dimmed());
        return Ok(());
    };

    controller.open_schedule(schedule, day);
    controller.delete().await?;

    println!("{} '{}'", "Deleted".red(), title);
    println!("{}", controller.render());
    Ok(())
}
