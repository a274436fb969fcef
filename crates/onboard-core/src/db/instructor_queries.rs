//! Instructor CRUD operations and queries.

use jiff::Timestamp;
use log::info;
use rusqlite::{ffi, params, params_from_iter, types::Value, OptionalExtension};

use super::{begin_write, date_column, parse_column, timestamp_column};
use crate::{
    error::{DatabaseResultExt, OnboardingError, Result},
    models::{Instructor, InstructorFilter, InstructorSummary, NewInstructor},
};

const CHECK_EMAIL_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM instructors WHERE email = ?1)";
const INSERT_INSTRUCTOR_SQL: &str = "INSERT INTO instructors (name, email, instructor_type, start_date, timing_variable, module, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_INSTRUCTOR_BY_ID_SQL: &str = "SELECT id, name, email, instructor_type, start_date, timing_variable, module, created_at, updated_at FROM instructors WHERE id = ?1";
const SELECT_INSTRUCTOR_SUMMARIES_SQL: &str = "SELECT i.id, i.name, i.email, i.instructor_type, i.start_date, i.timing_variable, i.module, i.created_at, COUNT(s.id), COALESCE(SUM(CASE WHEN s.status = 'completed' THEN 1 ELSE 0 END), 0) FROM instructors i LEFT JOIN steps s ON s.instructor_id = i.id";
const DELETE_INSTRUCTOR_SQL: &str = "DELETE FROM instructors WHERE id = ?1";

fn duplicate_email(email: &str) -> OnboardingError {
    OnboardingError::invalid_input("email")
        .with_reason(format!("An instructor with email {email} already exists"))
}

/// Maps a failed instructor insert, reporting a unique email clash the same
/// way as the up-front check.
fn insert_instructor_error(error: rusqlite::Error, email: &str) -> OnboardingError {
    match error {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            duplicate_email(email)
        }
        other => OnboardingError::database("Failed to insert instructor").with_source(other),
    }
}

impl super::Database {
    /// Helper function to construct an Instructor (without steps) from a row
    fn build_instructor_from_row(row: &rusqlite::Row) -> rusqlite::Result<Instructor> {
        Ok(Instructor {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            email: row.get(2)?,
            instructor_type: parse_column(row, 3, "instructor type")?,
            start_date: date_column(row, 4)?,
            timing: parse_column(row, 5, "timing variable")?,
            module: parse_column(row, 6, "module")?,
            created_at: timestamp_column(row, 7)?,
            updated_at: timestamp_column(row, 8)?,
            steps: Vec::new(),
        })
    }

    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<InstructorSummary> {
        Ok(InstructorSummary {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            email: row.get(2)?,
            instructor_type: parse_column(row, 3, "instructor type")?,
            start_date: date_column(row, 4)?,
            timing: parse_column(row, 5, "timing variable")?,
            module: parse_column(row, 6, "module")?,
            created_at: timestamp_column(row, 7)?,
            total_steps: row.get::<_, i64>(8)? as u32,
            completed_steps: row.get::<_, i64>(9)? as u32,
        })
    }

    /// Registers an instructor and materializes their steps and tasks in a
    /// single transaction.
    pub fn create_instructor(&mut self, new: &NewInstructor) -> Result<Instructor> {
        let tx = begin_write(&mut self.connection)?;

        let email_taken: bool = tx
            .query_row(CHECK_EMAIL_EXISTS_SQL, params![&new.email], |row| row.get(0))
            .db_context("Failed to check email uniqueness")?;

        if email_taken {
            return Err(duplicate_email(&new.email));
        }

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_INSTRUCTOR_SQL,
            params![
                &new.name,
                &new.email,
                new.instructor_type.as_str(),
                new.start_date.to_string(),
                new.timing.as_str(),
                new.module.as_str(),
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| insert_instructor_error(e, &new.email))?;

        let id = tx.last_insert_rowid() as u64;

        let steps = new
            .steps
            .iter()
            .map(|step| Self::insert_step_with_tasks(&tx, id, step, now))
            .collect::<Result<Vec<_>>>()?;

        tx.commit().db_context("Failed to commit transaction")?;

        info!(
            "Registered instructor {id} ({}) with module {} and {} steps",
            new.email,
            new.module.as_str(),
            steps.len()
        );

        Ok(Instructor {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            instructor_type: new.instructor_type,
            start_date: new.start_date,
            timing: new.timing,
            module: new.module,
            created_at: now,
            updated_at: now,
            steps,
        })
    }

    /// Retrieves an instructor with all steps and tasks.
    pub fn get_instructor(&self, id: u64) -> Result<Option<Instructor>> {
        let instructor = self
            .connection
            .query_row(
                SELECT_INSTRUCTOR_BY_ID_SQL,
                params![id as i64],
                Self::build_instructor_from_row,
            )
            .optional()
            .db_context("Failed to get instructor")?;

        match instructor {
            Some(mut instructor) => {
                instructor.steps = Self::load_steps(&self.connection, id)?;
                Ok(Some(instructor))
            }
            None => Ok(None),
        }
    }

    /// Lists instructors with step statistics, newest first.
    pub fn list_instructors(&self, filter: &InstructorFilter) -> Result<Vec<InstructorSummary>> {
        let mut conditions = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(module) = filter.module {
            values.push(Value::Text(module.as_str().to_string()));
            conditions.push(format!("i.module = ?{}", values.len()));
        }
        if let Some(instructor_type) = filter.instructor_type {
            values.push(Value::Text(instructor_type.as_str().to_string()));
            conditions.push(format!("i.instructor_type = ?{}", values.len()));
        }

        let mut query = SELECT_INSTRUCTOR_SUMMARIES_SQL.to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" GROUP BY i.id ORDER BY i.created_at DESC, i.id DESC");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let summaries = stmt
            .query_map(params_from_iter(values), Self::build_summary_from_row)
            .db_context("Failed to query instructors")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch instructors")?;

        Ok(summaries)
    }

    /// Deletes an instructor; steps and tasks go with it.
    pub fn delete_instructor(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_INSTRUCTOR_SQL, params![id as i64])
            .db_context("Failed to delete instructor")?;

        if deleted == 0 {
            return Err(OnboardingError::InstructorNotFound { id });
        }

        info!("Deleted instructor {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_maps_to_invalid_email() {
        let error = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_UNIQUE),
            Some("UNIQUE constraint failed: instructors.email".to_string()),
        );

        match insert_instructor_error(error, "ada@example.com") {
            OnboardingError::InvalidInput { field, reason } => {
                assert_eq!(field, "email");
                assert!(reason.contains("ada@example.com"));
            }
            other => panic!("Expected invalid email, got {other:?}"),
        }
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        let error = rusqlite::Error::SqliteFailure(
            ffi::Error::new(ffi::SQLITE_CONSTRAINT_CHECK),
            Some("CHECK constraint failed: timing_variable".to_string()),
        );

        assert!(matches!(
            insert_instructor_error(error, "ada@example.com"),
            OnboardingError::Database { .. }
        ));
    }
}
