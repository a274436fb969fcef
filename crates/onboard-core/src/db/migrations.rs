//! Database schema initialization and migrations.

use crate::error::{DatabaseResultExt, Result};

/// Tables that carry an optimistic locking `version` column.
const VERSIONED_TABLES: [&str; 2] = ["steps", "tasks"];

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.apply_migrations()?;

        Ok(())
    }

    /// Apply database migrations for existing databases
    fn apply_migrations(&self) -> Result<()> {
        for table in VERSIONED_TABLES {
            if !self.has_column(table, "version")? {
                self.connection
                    .execute(
                        &format!(
                            "ALTER TABLE {table} ADD COLUMN version INTEGER NOT NULL DEFAULT 0"
                        ),
                        [],
                    )
                    .db_context("Failed to add version column")?;
            }
        }

        Ok(())
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool> {
        let count: i64 = self
            .connection
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
                [table, column],
                |row| row.get(0),
            )
            .db_context("Failed to inspect table columns")?;
        Ok(count > 0)
    }
}
