//! SQLite persistence for schedules.
//!
//! Dates and times are stored as TEXT in their wire formats (`YYYY-MM-DD`,
//! `HH:MM`), so range comparisons in SQL are plain lexicographic checks.
//! Legacy-tuple lookups can match several rows; the oldest row wins.

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use sqlx::{
    Pool, Row, Sqlite,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
};
use uuid::Uuid;

use agenda_core::Schedule;
use agenda_core::protocol::{
    CompleteScheduleRequest, CreateScheduleRequest, UpdateScheduleRequest,
};
use agenda_core::schedule::ScheduleKey;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options =
            SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connect_options)
            .await?;

        let storage = Self { pool };
        storage.ensure_schema().await?;
        Ok(storage)
    }

    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS schedules (
                id         TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                start_date TEXT NOT NULL,
                end_date   TEXT NOT NULL,
                start_time TEXT NOT NULL,
                end_time   TEXT NOT NULL,
                completed  INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("failed to ensure schedules table exists")?;

        Ok(())
    }

    /// Insert a new schedule, minting its id. The title is stored trimmed.
    pub async fn insert(&self, req: &CreateScheduleRequest) -> Result<Schedule> {
        let schedule = Schedule::new(
            req.title.trim(),
            req.start_date,
            req.end_date,
            req.start_time,
            req.end_time,
        );

        sqlx::query(
            "INSERT INTO schedules (id, title, start_date, end_date, start_time, end_time, completed)
             VALUES (?, ?, ?, ?, ?, ?, 0)",
        )
        .bind(schedule.id.to_string())
        .bind(&schedule.title)
        .bind(schedule.start_date.format(DATE_FORMAT).to_string())
        .bind(schedule.end_date.format(DATE_FORMAT).to_string())
        .bind(schedule.start_time.format(TIME_FORMAT).to_string())
        .bind(schedule.end_time.format(TIME_FORMAT).to_string())
        .execute(&self.pool)
        .await?;

        Ok(schedule)
    }

    /// All schedules, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Schedule>> {
        let rows = sqlx::query(
            "SELECT id, title, start_date, end_date, start_time, end_time, completed
             FROM schedules
             ORDER BY rowid ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_schedule).collect()
    }

    /// The oldest schedule matching the legacy identity tuple.
    pub async fn find_by_key(&self, key: &ScheduleKey) -> Result<Option<Schedule>> {
        let row = sqlx::query(
            "SELECT id, title, start_date, end_date, start_time, end_time, completed
             FROM schedules
             WHERE title = ? AND start_date = ? AND end_date = ? AND start_time = ?
             ORDER BY rowid ASC
             LIMIT 1",
        )
        .bind(&key.title)
        .bind(key.start_date.format(DATE_FORMAT).to_string())
        .bind(key.end_date.format(DATE_FORMAT).to_string())
        .bind(key.start_time.format(TIME_FORMAT).to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_schedule).transpose()
    }

    /// Update the oldest schedule matching the old tuple, preserving its
    /// completion flag. Returns false if nothing matched.
    pub async fn update(&self, req: &UpdateScheduleRequest) -> Result<bool> {
        let Some(target) = self.find_by_key(&req.old_key()).await? else {
            return Ok(false);
        };

        sqlx::query(
            "UPDATE schedules
             SET title = ?, start_date = ?, end_date = ?, start_time = ?, end_time = ?
             WHERE id = ?",
        )
        .bind(req.new_title.trim())
        .bind(req.new_start_date.format(DATE_FORMAT).to_string())
        .bind(req.new_end_date.format(DATE_FORMAT).to_string())
        .bind(req.new_start_time.format(TIME_FORMAT).to_string())
        .bind(req.new_end_time.format(TIME_FORMAT).to_string())
        .bind(target.id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(true)
    }

    /// Delete the oldest schedule matching the tuple. Returns false if
    /// nothing matched.
    pub async fn delete(&self, key: &ScheduleKey) -> Result<bool> {
        let result = sqlx::query(
            "DELETE FROM schedules
             WHERE id = (
                SELECT id FROM schedules
                WHERE title = ? AND start_date = ? AND end_date = ? AND start_time = ?
                ORDER BY rowid ASC
                LIMIT 1
             )",
        )
        .bind(&key.title)
        .bind(key.start_date.format(DATE_FORMAT).to_string())
        .bind(key.end_date.format(DATE_FORMAT).to_string())
        .bind(key.start_time.format(TIME_FORMAT).to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Toggle completion on the oldest schedule matching title and start
    /// time whose date range covers `date`. Returns false if none does.
    pub async fn toggle_completed(&self, req: &CompleteScheduleRequest) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE schedules
             SET completed = NOT completed
             WHERE id = (
                SELECT id FROM schedules
                WHERE title = ? AND start_time = ? AND start_date <= ? AND end_date >= ?
                ORDER BY rowid ASC
                LIMIT 1
             )",
        )
        .bind(&req.title)
        .bind(req.start_time.format(TIME_FORMAT).to_string())
        .bind(req.date.format(DATE_FORMAT).to_string())
        .bind(req.date.format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_schedule(row: SqliteRow) -> Result<Schedule> {
    let id: String = row.get(0);

    Ok(Schedule {
        id: Uuid::parse_str(&id).with_context(|| format!("invalid schedule id '{id}'"))?,
        title: row.get::<String, _>(1),
        start_date: parse_stored_date(&row.get::<String, _>(2))?,
        end_date: parse_stored_date(&row.get::<String, _>(3))?,
        start_time: parse_stored_time(&row.get::<String, _>(4))?,
        end_time: parse_stored_time(&row.get::<String, _>(5))?,
        completed: row.get::<bool, _>(6),
    })
}

fn parse_stored_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("invalid stored date '{s}'"))
}

fn parse_stored_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .with_context(|| format!("invalid stored time '{s}'"))
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url == "sqlite::memory:" || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/storage_tests.rs"]
mod tests;
