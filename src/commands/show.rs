use anyhow::Result;

use agenda_core::MonthCursor;

use crate::client::HttpClient;
use crate::controller::CalendarController;

pub async fn run(client: HttpClient, month: Option<&str>) -> Result<()> {
    let cursor = match month {
        Some(m) => MonthCursor::parse(m)?,
        None => MonthCursor::current(),
    };

    let mut controller = CalendarController::new(client, cursor);
    controller.load().await?;

    println!("{}", controller.render());
    Ok(())
}
