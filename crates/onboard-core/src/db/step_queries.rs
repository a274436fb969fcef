//! Step queries and progress recomputation.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, OnboardingError, Result},
    models::{NewStep, OnboardingStep, StepStatus},
};

const INSERT_STEP_SQL: &str = "INSERT INTO steps (instructor_id, step_number, title, step_type, status, completed_tasks, total_tasks, version, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, 0, ?6, ?7)";
const SELECT_STEPS_BY_INSTRUCTOR_SQL: &str = "SELECT id, instructor_id, step_number, title, step_type, status, completed_tasks, total_tasks, version, created_at, updated_at FROM steps WHERE instructor_id = ?1 ORDER BY step_number";
const SELECT_STEP_BY_ID_SQL: &str = "SELECT id, instructor_id, step_number, title, step_type, status, completed_tasks, total_tasks, version, created_at, updated_at FROM steps WHERE id = ?1";
const UPDATE_STEP_PROGRESS_SQL: &str = "UPDATE steps SET status = ?1, completed_tasks = ?2, total_tasks = ?3, version = version + 1, updated_at = ?4 WHERE id = ?5";
const UPDATE_INSTRUCTOR_TIMESTAMP_BY_STEP_SQL: &str =
    "UPDATE instructors SET updated_at = ?1 WHERE id = (SELECT instructor_id FROM steps WHERE id = ?2)";

impl super::Database {
    /// Helper function to construct a step (without tasks) from a database row
    fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<OnboardingStep> {
        Ok(OnboardingStep {
            id: row.get::<_, i64>(0)? as u64,
            instructor_id: row.get::<_, i64>(1)? as u64,
            step_number: row.get::<_, i64>(2)? as u32,
            title: row.get(3)?,
            step_type: parse_column(row, 4, "step type")?,
            status: parse_column::<StepStatus>(row, 5, "status")?,
            completed_tasks: row.get::<_, i64>(6)? as u32,
            total_tasks: row.get::<_, i64>(7)? as u32,
            version: row.get::<_, i64>(8)? as u64,
            created_at: timestamp_column(row, 9)?,
            updated_at: timestamp_column(row, 10)?,
            tasks: Vec::new(),
        })
    }

    /// Inserts a step and its initial tasks, then computes its progress.
    pub(crate) fn insert_step_with_tasks(
        conn: &Connection,
        instructor_id: u64,
        step: &NewStep,
        now: Timestamp,
    ) -> Result<OnboardingStep> {
        let now_str = now.to_string();
        conn.execute(
            INSERT_STEP_SQL,
            params![
                instructor_id as i64,
                step.step_number as i64,
                &step.title,
                step.step_type.as_str(),
                StepStatus::Pending.as_str(),
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;
        let step_id = conn.last_insert_rowid() as u64;

        for (order, (title, kind)) in step.tasks.iter().enumerate() {
            Self::insert_task_row(conn, step_id, title, *kind, order as u32, now)?;
        }

        Self::recompute_step(conn, step_id)
    }

    /// Loads a step with its tasks using the given connection or transaction.
    pub(crate) fn load_step(conn: &Connection, step_id: u64) -> Result<Option<OnboardingStep>> {
        let step = conn
            .query_row(
                SELECT_STEP_BY_ID_SQL,
                params![step_id as i64],
                Self::build_step_from_row,
            )
            .optional()
            .db_context("Failed to get step")?;

        match step {
            Some(mut step) => {
                step.tasks = Self::load_tasks(conn, step.id)?;
                Ok(Some(step))
            }
            None => Ok(None),
        }
    }

    /// Loads all steps of an instructor, each with its tasks.
    pub(crate) fn load_steps(conn: &Connection, instructor_id: u64) -> Result<Vec<OnboardingStep>> {
        let mut stmt = conn
            .prepare(SELECT_STEPS_BY_INSTRUCTOR_SQL)
            .db_context("Failed to prepare query")?;

        let mut steps = stmt
            .query_map(params![instructor_id as i64], Self::build_step_from_row)
            .db_context("Failed to query steps")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch steps")?;

        for step in &mut steps {
            step.tasks = Self::load_tasks(conn, step.id)?;
        }

        Ok(steps)
    }

    /// Re-derives a step's counters and status from its current tasks and
    /// stores them, bumping the step version.
    pub(crate) fn recompute_step(conn: &Connection, step_id: u64) -> Result<OnboardingStep> {
        let mut step =
            Self::load_step(conn, step_id)?.ok_or(OnboardingError::StepNotFound { id: step_id })?;

        let previous = step.status;
        step.update_progress();

        let now = Timestamp::now();
        let now_str = now.to_string();
        conn.execute(
            UPDATE_STEP_PROGRESS_SQL,
            params![
                step.status.as_str(),
                step.completed_tasks as i64,
                step.total_tasks as i64,
                &now_str,
                step_id as i64
            ],
        )
        .db_context("Failed to update step progress")?;

        conn.execute(
            UPDATE_INSTRUCTOR_TIMESTAMP_BY_STEP_SQL,
            params![&now_str, step_id as i64],
        )
        .db_context("Failed to update instructor timestamp")?;

        if previous != step.status {
            debug!(
                "Step {step_id} moved from {} to {}",
                previous.as_str(),
                step.status.as_str()
            );
        }

        step.version += 1;
        step.updated_at = now;
        Ok(step)
    }

    /// Retrieves a single step with its tasks.
    pub fn get_step(&self, step_id: u64) -> Result<Option<OnboardingStep>> {
        Self::load_step(&self.connection, step_id)
    }
}
