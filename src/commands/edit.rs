use anyhow::{Result, anyhow};
use owo_colors::OwoColorize;

use agenda_core::MonthCursor;
use agenda_core::schedule::{parse_date, parse_time};

use crate::client::HttpClient;
use crate::controller::CalendarController;

/// New values for the fields being changed; untouched fields keep what
/// the schedule already has.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub date: Option<String>,
    pub end_date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

pub async fn run(
    client: HttpClient,
    title: &str,
    date: &str,
    start: &str,
    changes: Changes,
) -> Result<()> {
    let day = parse_date(date)?;
    let start_time = parse_time(start)?;

    let mut controller = CalendarController::new(client, MonthCursor::containing(day));
    controller.load().await?;

    let schedule = super::find_chip(controller.schedules(), day, title, start_time)
        .cloned()
        .ok_or_else(|| anyhow!("no schedule '{title}' at {start} on {date}"))?;

    let draft = controller.open_schedule(schedule, day);
    if let Some(v) = changes.title {
        draft.title = v;
    }
    if let Some(v) = changes.date {
        draft.start_date = v;
    }
    if let Some(v) = changes.end_date {
        draft.end_date = v;
    }
    if let Some(v) = changes.start {
        draft.start_time = v;
    }
    if let Some(v) = changes.end {
        draft.end_time = v;
    }

    controller.save().await?;

    println!("{} '{}'", "Updated".yellow(), title);
    println!("{}", controller.render());
    Ok(())
}
