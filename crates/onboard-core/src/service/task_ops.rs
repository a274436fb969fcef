//! Step and task operations for the Onboarding service.

use tokio::task;

use super::Onboarding;
use crate::{
    db::Database,
    error::{OnboardingError, Result},
    models::{OnboardingStep, Task, TaskChange},
    params::{AddTask, Id, SetTaskEnabled, UpdateTask},
};

impl Onboarding {
    /// Retrieves a single step with its tasks.
    pub async fn get_step(&self, params: &Id) -> Result<Option<OnboardingStep>> {
        let db_path = self.db_path.clone();
        let step_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_step(step_id)
        })
        .await
        .map_err(OnboardingError::join)?
    }

    /// Retrieves a single task.
    pub async fn get_task(&self, params: &Id) -> Result<Option<Task>> {
        let db_path = self.db_path.clone();
        let task_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_task(task_id)
        })
        .await
        .map_err(OnboardingError::join)?
    }

    /// Appends a task to a step. The step's progress is recomputed, so a
    /// Completed step drops back to In Progress.
    pub async fn add_task(&self, params: &AddTask) -> Result<Task> {
        let kind = params.validate()?;
        let db_path = self.db_path.clone();
        let step_id = params.step_id;
        let title = params.title.trim().to_string();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.add_task(step_id, &title, kind)
        })
        .await
        .map_err(OnboardingError::join)?
    }

    /// Changes a task's status and returns the recomputed owning step.
    pub async fn update_task(&self, params: &UpdateTask) -> Result<OnboardingStep> {
        let change = TaskChange::try_from(params)?;
        self.apply_task_change(params.id, change).await
    }

    /// Enables or disables a task and returns the recomputed owning step.
    pub async fn set_task_enabled(&self, params: &SetTaskEnabled) -> Result<OnboardingStep> {
        self.apply_task_change(params.id, TaskChange::from(params))
            .await
    }

    async fn apply_task_change(&self, task_id: u64, change: TaskChange) -> Result<OnboardingStep> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.update_task(task_id, &change)
        })
        .await
        .map_err(OnboardingError::join)?
    }
}
