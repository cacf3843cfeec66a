mod client;
mod commands;
mod controller;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::client::{DEFAULT_SERVER_URL, HttpClient};

#[derive(Parser)]
#[command(name = "agenda")]
#[command(about = "View and manage your schedules against agenda-server")]
struct Cli {
    /// Base URL of the agenda server
    #[arg(long, global = true, default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the month grid with its schedules
    Show {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Create a schedule
    Add {
        title: String,

        /// Day the schedule starts (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Last covered day (defaults to the start day)
        #[arg(long)]
        end_date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,

        /// End time (HH:MM)
        #[arg(long, default_value = "17:00")]
        end: String,
    },
    /// Edit a schedule, addressed by its current title, day, and start time
    Edit {
        title: String,

        /// A day the schedule shows under (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Current start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,

        #[arg(long)]
        new_title: Option<String>,

        /// New start date (YYYY-MM-DD)
        #[arg(long)]
        new_date: Option<String>,

        /// New end date (YYYY-MM-DD)
        #[arg(long)]
        new_end_date: Option<String>,

        /// New start time (HH:MM)
        #[arg(long)]
        new_start: Option<String>,

        /// New end time (HH:MM)
        #[arg(long)]
        new_end: Option<String>,
    },
    /// Toggle completion on a schedule
    Done {
        title: String,

        /// A day the schedule shows under (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,
    },
    /// Delete a schedule
    Rm {
        title: String,

        /// A day the schedule shows under (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long, default_value = "09:00")]
        start: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = HttpClient::new(cli.server);

    match cli.command {
        Commands::Show { month } => commands::show::run(client, month.as_deref()).await,
        Commands::Add {
            title,
            date,
            end_date,
            start,
            end,
        } => commands::add::run(client, title, &date, end_date.as_deref(), &start, &end).await,
        Commands::Edit {
            title,
            date,
            start,
            new_title,
            new_date,
            new_end_date,
            new_start,
            new_end,
        } => {
            let changes = commands::edit::Changes {
                title: new_title,
                date: new_date,
                end_date: new_end_date,
                start: new_start,
                end: new_end,
            };
            commands::edit::run(client, &title, &date, &start, changes).await
        }
        Commands::Done { title, date, start } => {
            commands::done::run(client, &title, &date, &start).await
        }
        Commands::Rm { title, date, start } => {
            commands::rm::run(client, &title, &date, &start).await
        }
    }
}
