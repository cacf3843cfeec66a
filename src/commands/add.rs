use anyhow::Result;
use owo_colors::OwoColorize;

use agenda_core::MonthCursor;
use agenda_core::schedule::parse_date;

use crate::client::HttpClient;
use crate::controller::CalendarController;

pub async fn run(
    client: HttpClient,
    title: String,
    date: &str,
    end_date: Option<&str>,
    start: &str,
    end: &str,
) -> Result<()> {
    let day = parse_date(date)?;

    let mut controller = CalendarController::new(client, MonthCursor::containing(day));
    controller.load().await?;

    let draft = controller.open_day(day);
    draft.title = title;
    if let Some(end_date) = end_date {
        draft.end_date = end_date.to_string();
    }
    draft.start_time = start.to_string();
    draft.end_time = end.to_string();

    controller.save().await?;

    println!("{} schedule on {}", "Created".green(), day);
    println!("{}", controller.render());
    Ok(())
}
