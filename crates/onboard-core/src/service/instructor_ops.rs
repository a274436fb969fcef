//! Instructor operations for the Onboarding service.

use log::{debug, warn};
use tokio::task;

use super::Onboarding;
use crate::{
    catalog,
    db::Database,
    display::InstructorSummaries,
    error::{OnboardingError, Result},
    models::{Instructor, InstructorFilter, NewInstructor, NewStep, OnboardingModule},
    params::{DeleteInstructor, Id, ListInstructors, RegisterInstructor},
    resolver,
};

/// Builds the steps to materialize for a module: every non-skipped step of
/// the catalog, typed by the module's table.
pub(crate) fn plan_steps(module: OnboardingModule) -> Result<Vec<NewStep>> {
    resolver::included_steps(Some(module))?
        .into_iter()
        .filter_map(|number| match catalog::step_template(number) {
            Some(template) => Some(template),
            None => {
                warn!("No catalog entry for step {number}, not materializing it");
                None
            }
        })
        .map(|template| {
            Ok(NewStep {
                step_number: template.number,
                title: template.title.to_string(),
                step_type: resolver::step_type(Some(module), Some(i64::from(template.number)))?,
                tasks: template
                    .tasks
                    .iter()
                    .map(|task| (task.title.to_string(), task.kind))
                    .collect(),
            })
        })
        .collect()
}

impl Onboarding {
    /// Registers an instructor.
    ///
    /// Timing is derived from the start date as of [`Onboarding::today`] and
    /// the module from the instructor type and timing, unless the PM passed
    /// an explicit module. The module's included steps are created with
    /// their catalog tasks, all in one transaction.
    pub async fn register_instructor(&self, params: &RegisterInstructor) -> Result<Instructor> {
        let (instructor_type, start_date, module_override) = params.validate()?;

        let timing = resolver::determine_timing(start_date, self.today());
        let resolved = resolver::determine_module(instructor_type, timing);
        let module = match module_override {
            Some(module) if module != resolved => {
                debug!(
                    "Module override {} replaces resolved module {}",
                    module.as_str(),
                    resolved.as_str()
                );
                module
            }
            _ => resolved,
        };

        let new = NewInstructor {
            name: params.name.trim().to_string(),
            email: params.email.trim().to_lowercase(),
            instructor_type,
            start_date,
            timing,
            module,
            steps: plan_steps(module)?,
        };

        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_instructor(&new)
        })
        .await
        .map_err(OnboardingError::join)?
    }

    /// Retrieves an instructor with steps and tasks.
    pub async fn get_instructor(&self, params: &Id) -> Result<Option<Instructor>> {
        let db_path = self.db_path.clone();
        let instructor_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_instructor(instructor_id)
        })
        .await
        .map_err(OnboardingError::join)?
    }

    /// Lists instructors with their step progress.
    pub async fn list_instructors(&self, params: &ListInstructors) -> Result<InstructorSummaries> {
        let filter = InstructorFilter::try_from(params)?;
        let db_path = self.db_path.clone();

        let summaries = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_instructors(&filter)
        })
        .await
        .map_err(OnboardingError::join)??;

        Ok(InstructorSummaries(summaries))
    }

    /// Permanently deletes an instructor and all their steps and tasks.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `params.confirmed` is set;
    /// `InstructorNotFound` if the ID does not exist.
    pub async fn delete_instructor(&self, params: &DeleteInstructor) -> Result<()> {
        if !params.confirmed {
            return Err(OnboardingError::invalid_input("confirmed")
                .with_reason("Deletion must be confirmed; it removes all steps and tasks"));
        }

        let db_path = self.db_path.clone();
        let instructor_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.delete_instructor(instructor_id)
        })
        .await
        .map_err(OnboardingError::join)?
    }
}
