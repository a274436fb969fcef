//! Task CRUD operations with optimistic locking.

use jiff::Timestamp;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use super::{begin_write, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, OnboardingError, Result},
    models::{OnboardingStep, Task, TaskChange, TaskKind, TaskStatus},
};

const CHECK_STEP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM steps WHERE id = ?1)";
const GET_NEXT_TASK_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(task_order), -1) + 1 FROM tasks WHERE step_id = ?1";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (step_id, title, kind, status, enabled, task_order, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, 1, ?5, 0, ?6, ?7)";
const SELECT_TASKS_BY_STEP_SQL: &str = "SELECT id, step_id, title, kind, status, enabled, task_order, version, created_at, updated_at FROM tasks WHERE step_id = ?1 ORDER BY task_order";
const SELECT_TASK_BY_ID_SQL: &str = "SELECT id, step_id, title, kind, status, enabled, task_order, version, created_at, updated_at FROM tasks WHERE id = ?1";
const SELECT_TASK_VERSION_SQL: &str = "SELECT step_id, version FROM tasks WHERE id = ?1";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET status = COALESCE(?1, status), enabled = COALESCE(?2, enabled), version = version + 1, updated_at = ?3 WHERE id = ?4 AND version = ?5";

impl super::Database {
    /// Helper function to construct a Task from a database row
    fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: row.get::<_, i64>(0)? as u64,
            step_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            kind: parse_column::<TaskKind>(row, 3, "task kind")?,
            status: parse_column::<TaskStatus>(row, 4, "status")?,
            enabled: row.get(5)?,
            order: row.get::<_, i64>(6)? as u32,
            version: row.get::<_, i64>(7)? as u64,
            created_at: timestamp_column(row, 8)?,
            updated_at: timestamp_column(row, 9)?,
        })
    }

    pub(crate) fn insert_task_row(
        conn: &Connection,
        step_id: u64,
        title: &str,
        kind: TaskKind,
        order: u32,
        now: Timestamp,
    ) -> Result<Task> {
        let now_str = now.to_string();
        conn.execute(
            INSERT_TASK_SQL,
            params![
                step_id as i64,
                title,
                kind.as_str(),
                TaskStatus::Pending.as_str(),
                order as i64,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert task")?;

        Ok(Task {
            id: conn.last_insert_rowid() as u64,
            step_id,
            title: title.into(),
            kind,
            status: TaskStatus::Pending,
            enabled: true,
            order,
            version: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub(crate) fn load_tasks(conn: &Connection, step_id: u64) -> Result<Vec<Task>> {
        let mut stmt = conn
            .prepare(SELECT_TASKS_BY_STEP_SQL)
            .db_context("Failed to prepare query")?;

        let tasks = stmt
            .query_map(params![step_id as i64], Self::build_task_from_row)
            .db_context("Failed to query tasks")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch tasks")?;

        Ok(tasks)
    }

    /// Appends a new pending task to a step and recomputes the step.
    pub fn add_task(&mut self, step_id: u64, title: &str, kind: TaskKind) -> Result<Task> {
        let tx = begin_write(&mut self.connection)?;

        let step_exists: bool = tx
            .query_row(CHECK_STEP_EXISTS_SQL, params![step_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check step existence")?;

        if !step_exists {
            return Err(OnboardingError::StepNotFound { id: step_id });
        }

        let next_order: i64 = tx
            .query_row(GET_NEXT_TASK_ORDER_SQL, params![step_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to get next task order")?;

        let now = Timestamp::now();
        let task = Self::insert_task_row(&tx, step_id, title, kind, next_order as u32, now)?;
        Self::recompute_step(&tx, step_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(task)
    }

    /// Retrieves a single task by its ID.
    pub fn get_task(&self, task_id: u64) -> Result<Option<Task>> {
        self.connection
            .query_row(
                SELECT_TASK_BY_ID_SQL,
                params![task_id as i64],
                Self::build_task_from_row,
            )
            .optional()
            .db_context("Failed to get task")
    }

    /// Applies a status and/or enablement change to a task, then recomputes
    /// the owning step in the same transaction.
    ///
    /// When `change.expected_version` is set and the stored task has moved on,
    /// nothing is written and `VersionConflict` is returned.
    pub fn update_task(&mut self, task_id: u64, change: &TaskChange) -> Result<OnboardingStep> {
        let tx = begin_write(&mut self.connection)?;

        let (step_id, current_version): (i64, i64) = tx
            .query_row(SELECT_TASK_VERSION_SQL, params![task_id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()
            .db_context("Failed to get current task")?
            .ok_or(OnboardingError::TaskNotFound { id: task_id })?;
        let step_id = step_id as u64;
        let current_version = current_version as u64;

        if let Some(expected) = change.expected_version {
            if expected != current_version {
                return Err(OnboardingError::VersionConflict {
                    entity: "Task",
                    id: task_id,
                    expected,
                    actual: current_version,
                });
            }
        }

        if change.is_noop() {
            return Self::load_step(&tx, step_id)?
                .ok_or(OnboardingError::StepNotFound { id: step_id });
        }

        let updated = tx
            .execute(
                UPDATE_TASK_SQL,
                params![
                    change.status.map(|s| s.as_str()),
                    change.enabled,
                    Timestamp::now().to_string(),
                    task_id as i64,
                    current_version as i64
                ],
            )
            .db_context("Failed to update task")?;

        if updated != 1 {
            let actual: i64 = tx
                .query_row(SELECT_TASK_VERSION_SQL, params![task_id as i64], |row| {
                    row.get(1)
                })
                .optional()
                .db_context("Failed to re-read task version")?
                .ok_or(OnboardingError::TaskNotFound { id: task_id })?;
            return Err(OnboardingError::VersionConflict {
                entity: "Task",
                id: task_id,
                expected: current_version,
                actual: actual as u64,
            });
        }

        let step = Self::recompute_step(&tx, step_id)?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Task {task_id} updated (status: {:?}, enabled: {:?}); step {step_id} is {}",
            change.status.map(|s| s.as_str()),
            change.enabled,
            step.status.as_str()
        );

        Ok(step)
    }
}
