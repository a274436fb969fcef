//! Builder for creating and configuring Onboarding instances.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use log::debug;
use tokio::task;

use super::Onboarding;
use crate::{
    db::Database,
    error::{OnboardingError, Result},
};

/// Builder for creating and configuring Onboarding instances.
#[derive(Debug, Clone, Default)]
pub struct OnboardingBuilder {
    database_path: Option<PathBuf>,
    today: Option<Date>,
}

impl OnboardingBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/onboard/onboard.db` or `~/.local/share/onboard/onboard.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Pins the date urgency is computed against instead of the system clock.
    pub fn with_today(mut self, today: Option<Date>) -> Self {
        self.today = today;
        self
    }

    /// Builds the configured onboarding service.
    ///
    /// # Errors
    ///
    /// Returns `OnboardingError::FileSystem` if the database directory cannot
    /// be created.
    /// Returns `OnboardingError::Database` if database initialization fails
    pub async fn build(self) -> Result<Onboarding> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| OnboardingError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), OnboardingError>(())
        })
        .await
        .map_err(OnboardingError::join)??;

        debug!("Using database at {}", db_path.display());
        Ok(Onboarding::new(db_path, self.today))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("onboard")
            .place_data_file("onboard.db")
            .map_err(|e| OnboardingError::XdgDirectory(e.to_string()))
    }
}
