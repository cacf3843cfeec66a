use anyhow::{Result, anyhow};
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

    let schedule = super::find_chip(controller.schedules(), day, title, start_time)
        .cloned()
        .ok_or_else(|| anyhow!("no schedule '{title}' at {start} on {date}"))?;

    controller.open_schedule(schedule, day);
    controller.complete().await?;

    println!("{} completion of '{}'", "Toggled".green(), title);
    println!("{}", controller.render());
    Ok(())
}
