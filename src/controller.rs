//! The calendar controller: explicit state for the fetch, render, mutate,
//! reload loop.
//!
//! State lives in one owned struct instead of closures over shared
//! variables: the month cursor, the last fetched collection, and the
//! editor. Every mutation is followed by a full reload; the collection is
//! never patched in place.

use chrono::NaiveDate;

use agenda_core::protocol::{
    CompleteScheduleRequest, CreateScheduleRequest, DeleteScheduleRequest, UpdateScheduleRequest,
};
use agenda_core::schedule::ScheduleDraft;
use agenda_core::{
    AgendaError, AgendaResult, MonthCursor, Schedule, ScheduleApi, ScheduleCollection,
};

use crate::render;

/// What the editor is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    Closed,
    /// New entry, pre-filled from the day that was opened.
    Create { draft: ScheduleDraft },
    /// Editing an existing schedule found under a day cell.
    Edit { target: EditTarget, draft: ScheduleDraft },
}

/// The schedule being edited, plus the day cell it was opened from.
///
/// The original schedule is kept because update and delete are keyed by
/// its field tuple, not by the edited draft; the date feeds the
/// completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTarget {
    pub schedule: Schedule,
    pub date: NaiveDate,
}

pub struct CalendarController<C: ScheduleApi> {
    client: C,
    cursor: MonthCursor,
    schedules: ScheduleCollection,
    editor: Editor,
}

impl<C: ScheduleApi> CalendarController<C> {
    pub fn new(client: C, cursor: MonthCursor) -> Self {
        CalendarController {
            client,
            cursor,
            schedules: ScheduleCollection::default(),
            editor: Editor::Closed,
        }
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn schedules(&self) -> &ScheduleCollection {
        &self.schedules
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Replace the collection with the server's view.
    ///
    /// On failure the error is returned and the last rendered state is
    /// kept; the collection is not cleared.
    pub async fn load(&mut self) -> AgendaResult<()> {
        self.schedules = self.client.fetch_all().await?;
        Ok(())
    }

    /// Open the editor for a new entry on `date`, pre-filled with that
    /// date on both ends and 09:00-17:00. Any edit in progress is
    /// discarded, like clicking an empty day cell.
    pub fn open_day(&mut self, date: NaiveDate) -> &mut ScheduleDraft {
        self.editor = Editor::Create {
            draft: ScheduleDraft::for_date(date),
        };
        match &mut self.editor {
            Editor::Create { draft } => draft,
            _ => unreachable!("editor was just set to Create"),
        }
    }

    /// Open the editor for an existing schedule found under `date`.
    pub fn open_schedule(&mut self, schedule: Schedule, date: NaiveDate) -> &mut ScheduleDraft {
        let draft = ScheduleDraft::from_schedule(&schedule);
        self.editor = Editor::Edit {
            target: EditTarget { schedule, date },
            draft,
        };
        match &mut self.editor {
            Editor::Edit { draft, .. } => draft,
            _ => unreachable!("editor was just set to Edit"),
        }
    }

    /// Discard the open draft.
    pub fn cancel(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Validate and persist the open draft, then reload and close.
    ///
    /// A validation failure aborts before any request is sent: the editor
    /// keeps its draft and the collection is untouched, so the caller can
    /// show the message and let the user fix the fields.
    pub async fn save(&mut self) -> AgendaResult<()> {
        let (values, original) = match &self.editor {
            Editor::Closed => return Ok(()),
            Editor::Create { draft } => (draft.validate()?, None),
            Editor::Edit { target, draft } => (draft.validate()?, Some(target.schedule.key())),
        };

        match original {
            None => {
                self.client
                    .create(CreateScheduleRequest::from(values))
                    .await?
            }
            Some(key) => {
                self.client
                    .update(UpdateScheduleRequest::from_parts(key, values))
                    .await?
            }
        }

        self.load().await?;
        self.editor = Editor::Closed;
        Ok(())
    }

    /// Delete the schedule being edited. Does nothing when no edit is in
    /// progress. A miss on the server (already gone) also counts as done.
    pub async fn delete(&mut self) -> AgendaResult<()> {
        let request = match &self.editor {
            Editor::Edit { target, .. } => DeleteScheduleRequest::from(target.schedule.key()),
            _ => return Ok(()),
        };

        match self.client.delete(request).await {
            Ok(()) | Err(AgendaError::ScheduleNotFound(_)) => {}
            Err(err) => return Err(err),
        }

        self.load().await?;
        self.editor = Editor::Closed;
        Ok(())
    }

    /// Toggle completion on the schedule being edited, addressed by the
    /// day cell it was opened from. Does nothing when not editing.
    pub async fn complete(&mut self) -> AgendaResult<()> {
        let request = match &self.editor {
            Editor::Edit { target, .. } => CompleteScheduleRequest {
                date: target.date,
                title: target.schedule.title.clone(),
                start_time: target.schedule.start_time,
            },
            _ => return Ok(()),
        };

        self.client.complete(request).await?;
        self.load().await?;
        self.editor = Editor::Closed;
        Ok(())
    }

    pub async fn prev_month(&mut self) -> AgendaResult<()> {
        self.cursor = self.cursor.prev();
        self.load().await
    }

    pub async fn next_month(&mut self) -> AgendaResult<()> {
        self.cursor = self.cursor.next();
        self.load().await
    }

    /// Render the current month grid from the current collection.
    pub fn render(&self) -> String {
        render::render_month(self.cursor, &self.schedules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveTime;
    use std::sync::Mutex;

    use agenda_core::schedule::{parse_date, parse_time};

    /// In-memory backend mirroring the server's lookup rules.
    #[derive(Default)]
    struct FakeApi {
        schedules: Mutex<Vec<Schedule>>,
    }

    impl FakeApi {
        fn seeded(schedules: Vec<Schedule>) -> Self {
            FakeApi {
                schedules: Mutex::new(schedules),
            }
        }
    }

    #[async_trait]
    impl ScheduleApi for FakeApi {
        async fn fetch_all(&self) -> AgendaResult<ScheduleCollection> {
            let all = self.schedules.lock().unwrap().clone();
            Ok(ScheduleCollection::from_schedules(all))
        }

        async fn create(&self, req: CreateScheduleRequest) -> AgendaResult<()> {
            self.schedules.lock().unwrap().push(Schedule::new(
                req.title.trim(),
                req.start_date,
                req.end_date,
                req.start_time,
                req.end_time,
            ));
            Ok(())
        }

        async fn update(&self, req: UpdateScheduleRequest) -> AgendaResult<()> {
            let key = req.old_key();
            let mut all = self.schedules.lock().unwrap();
            match all.iter_mut().find(|s| s.key() == key) {
                Some(schedule) => {
                    schedule.title = req.new_title.trim().to_string();
                    schedule.start_date = req.new_start_date;
                    schedule.end_date = req.new_end_date;
                    schedule.start_time = req.new_start_time;
                    schedule.end_time = req.new_end_time;
                    Ok(())
                }
                None => Err(AgendaError::ScheduleNotFound(key.to_string())),
            }
        }

        async fn delete(&self, req: DeleteScheduleRequest) -> AgendaResult<()> {
            let key = req.key();
            let mut all = self.schedules.lock().unwrap();
            match all.iter().position(|s| s.key() == key) {
                Some(index) => {
                    all.remove(index);
                    Ok(())
                }
                None => Err(AgendaError::ScheduleNotFound(key.to_string())),
            }
        }

        async fn complete(&self, req: CompleteScheduleRequest) -> AgendaResult<()> {
            let mut all = self.schedules.lock().unwrap();
            match all.iter_mut().find(|s| {
                s.title == req.title && s.start_time == req.start_time && s.covers(req.date)
            }) {
                Some(schedule) => {
                    schedule.completed = !schedule.completed;
                    Ok(())
                }
                None => Err(AgendaError::ScheduleNotFound(req.title.clone())),
            }
        }
    }

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    fn standup() -> Schedule {
        Schedule::new(
            "Standup",
            date("2025-03-10"),
            date("2025-03-10"),
            time("09:00"),
            time("09:15"),
        )
    }

    fn march() -> MonthCursor {
        MonthCursor::new(2025, 3).unwrap()
    }

    #[tokio::test]
    async fn creating_a_schedule_reloads_and_closes_the_editor() {
        let mut controller = CalendarController::new(FakeApi::default(), march());
        controller.load().await.unwrap();

        let draft = controller.open_day(date("2025-03-10"));
        assert_eq!(draft.start_time, "09:00");
        assert_eq!(draft.end_time, "17:00");
        draft.title = "Standup".to_string();
        draft.end_time = "09:15".to_string();

        controller.save().await.unwrap();

        assert_eq!(*controller.editor(), Editor::Closed);
        let on_day = controller.schedules().on(date("2025-03-10"));
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].title, "Standup");
        assert!(!on_day[0].completed);
    }

    #[tokio::test]
    async fn save_with_an_empty_field_changes_nothing() {
        let mut controller = CalendarController::new(FakeApi::default(), march());
        controller.load().await.unwrap();

        // Title left empty.
        controller.open_day(date("2025-03-10"));

        let result = controller.save().await;
        assert!(matches!(result, Err(AgendaError::Validation(_))));

        // The draft survives so the user can fix it, and nothing was sent.
        assert!(matches!(controller.editor(), Editor::Create { .. }));
        assert!(controller.schedules().is_empty());
    }

    #[tokio::test]
    async fn save_when_editor_is_closed_is_a_noop() {
        let mut controller = CalendarController::new(FakeApi::default(), march());
        controller.save().await.unwrap();
        assert!(controller.schedules().is_empty());
    }

    #[tokio::test]
    async fn editing_updates_by_the_original_identity() {
        let original = standup();
        let mut controller =
            CalendarController::new(FakeApi::seeded(vec![original.clone()]), march());
        controller.load().await.unwrap();

        let draft = controller.open_schedule(original, date("2025-03-10"));
        draft.title = "Daily standup".to_string();
        draft.start_time = "09:30".to_string();
        draft.end_time = "09:45".to_string();

        controller.save().await.unwrap();

        assert_eq!(*controller.editor(), Editor::Closed);
        let on_day = controller.schedules().on(date("2025-03-10"));
        assert_eq!(on_day.len(), 1);
        assert_eq!(on_day[0].title, "Daily standup");
        assert_eq!(on_day[0].start_time, time("09:30"));
    }

    #[tokio::test]
    async fn deleting_removes_the_edited_schedule() {
        let original = standup();
        let mut controller =
            CalendarController::new(FakeApi::seeded(vec![original.clone()]), march());
        controller.load().await.unwrap();

        controller.open_schedule(original, date("2025-03-10"));
        controller.delete().await.unwrap();

        assert_eq!(*controller.editor(), Editor::Closed);
        assert!(controller.schedules().is_empty());
    }

    #[tokio::test]
    async fn delete_is_a_noop_when_nothing_is_being_edited() {
        let mut controller =
            CalendarController::new(FakeApi::seeded(vec![standup()]), march());
        controller.load().await.unwrap();

        controller.delete().await.unwrap();
        assert_eq!(controller.schedules().on(date("2025-03-10")).len(), 1);
    }

    #[tokio::test]
    async fn deleting_an_already_gone_schedule_is_a_noop() {
        let original = standup();
        let api = FakeApi::seeded(vec![original.clone()]);
        let mut controller = CalendarController::new(api, march());
        controller.load().await.unwrap();

        controller.open_schedule(original.clone(), date("2025-03-10"));
        // The schedule disappears behind the controller's back.
        controller.client.schedules.lock().unwrap().clear();

        controller.delete().await.unwrap();
        assert_eq!(*controller.editor(), Editor::Closed);
        assert!(controller.schedules().is_empty());
    }

    #[tokio::test]
    async fn saving_an_edit_whose_target_vanished_keeps_the_editor_open() {
        let original = standup();
        let api = FakeApi::seeded(vec![original.clone()]);
        let mut controller = CalendarController::new(api, march());
        controller.load().await.unwrap();

        let draft = controller.open_schedule(original, date("2025-03-10"));
        draft.title = "Daily standup".to_string();
        // The schedule disappears behind the controller's back.
        controller.client.schedules.lock().unwrap().clear();

        let result = controller.save().await;
        assert!(matches!(result, Err(AgendaError::ScheduleNotFound(_))));

        // The edit is not silently dropped: draft and stale view survive so
        // the caller can report the error.
        match controller.editor() {
            Editor::Edit { draft, .. } => assert_eq!(draft.title, "Daily standup"),
            other => panic!("expected the editor to stay open, got {other:?}"),
        }
        assert_eq!(controller.schedules().on(date("2025-03-10")).len(), 1);
    }

    #[tokio::test]
    async fn completing_flips_the_flag_and_shows_after_reload() {
        let original = standup();
        let mut controller =
            CalendarController::new(FakeApi::seeded(vec![original.clone()]), march());
        controller.load().await.unwrap();

        controller.open_schedule(original, date("2025-03-10"));
        controller.complete().await.unwrap();

        assert_eq!(*controller.editor(), Editor::Closed);
        assert!(controller.schedules().on(date("2025-03-10"))[0].completed);
    }

    #[tokio::test]
    async fn clicking_a_day_cell_resets_edit_mode_to_create() {
        let original = standup();
        let mut controller =
            CalendarController::new(FakeApi::seeded(vec![original.clone()]), march());
        controller.load().await.unwrap();

        controller.open_schedule(original, date("2025-03-10"));
        assert!(matches!(controller.editor(), Editor::Edit { .. }));

        controller.open_day(date("2025-03-11"));
        assert!(matches!(controller.editor(), Editor::Create { .. }));
    }

    #[tokio::test]
    async fn month_navigation_moves_the_cursor_and_reloads() {
        let api = FakeApi::default();
        let mut controller = CalendarController::new(api, march());
        controller.load().await.unwrap();

        // A schedule appears server-side between interactions.
        controller
            .client
            .schedules
            .lock()
            .unwrap()
            .push(standup());

        controller.next_month().await.unwrap();
        assert_eq!(controller.cursor(), MonthCursor::new(2025, 4).unwrap());
        // The reload picked it up even though it is in another month.
        assert_eq!(controller.schedules().on(date("2025-03-10")).len(), 1);

        controller.prev_month().await.unwrap();
        controller.prev_month().await.unwrap();
        assert_eq!(controller.cursor(), MonthCursor::new(2025, 2).unwrap());
    }
}
