//! Tests for the onboarding service.

use jiff::civil::{date, Date};
use tempfile::TempDir;

use super::*;
use crate::{
    error::OnboardingError,
    models::{OnboardingModule, StepStatus, StepType, TaskKind, TaskStatus, TimingVariable},
    params::{
        AddTask, DeleteInstructor, Id, ListInstructors, RegisterInstructor, ResolveModule,
        SetTaskEnabled, StepTypeQuery, UpdateTask,
    },
};

const TODAY: Date = date(2030, 1, 1);

/// Helper function to create a test service with a pinned clock
async fn create_test_onboarding() -> (TempDir, Onboarding) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let onboarding = OnboardingBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(Some(TODAY))
        .build()
        .await
        .expect("Failed to create onboarding service");
    (temp_dir, onboarding)
}

fn registration(email: &str, instructor_type: &str, start_date: &str) -> RegisterInstructor {
    RegisterInstructor {
        name: "Ada Park".to_string(),
        email: email.to_string(),
        instructor_type: instructor_type.to_string(),
        start_date: start_date.to_string(),
        module: None,
    }
}

#[tokio::test]
async fn test_register_materializes_included_steps() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    // Four days out: urgent, so a newbie lands in module B
    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "newbie", "2030-01-05"))
        .await
        .expect("Failed to register instructor");

    assert_eq!(instructor.timing, TimingVariable::Urgent);
    assert_eq!(instructor.module, OnboardingModule::BSurvival);

    let numbers: Vec<u32> = instructor.steps.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);

    let types: Vec<StepType> = instructor.steps.iter().map(|s| s.step_type).collect();
    assert_eq!(
        types,
        vec![
            StepType::PmLed,
            StepType::PmLed,
            StepType::SelfCheck,
            StepType::SelfCheck,
            StepType::Delay,
        ]
    );

    for step in &instructor.steps {
        assert_eq!(step.status, StepStatus::Pending);
        assert_eq!(step.total_tasks as usize, step.tasks.len());
        assert!(step.total_tasks > 0);
        assert_eq!(step.completed_tasks, 0);
    }

    let fetched = onboarding
        .get_instructor(&Id { id: instructor.id })
        .await
        .expect("Failed to get instructor")
        .expect("Instructor should exist");
    assert_eq!(fetched.steps.len(), 5);
    assert_eq!(fetched.email, "ada@example.com");
}

#[tokio::test]
async fn test_register_threshold_and_override() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    // Exactly fourteen days out is comfortable
    let experienced = onboarding
        .register_instructor(&registration("bo@example.com", "experienced", "2030-01-15"))
        .await
        .expect("Failed to register instructor");
    assert_eq!(experienced.timing, TimingVariable::Comfortable);
    assert_eq!(experienced.module, OnboardingModule::CAlignment);
    assert_eq!(experienced.steps.len(), 6);

    let mut params = registration("cy@example.com", "re_contract", "2030-01-02");
    params.module = Some("a".to_string());
    let overridden = onboarding
        .register_instructor(&params)
        .await
        .expect("Failed to register instructor");
    assert_eq!(overridden.timing, TimingVariable::Urgent);
    assert_eq!(overridden.module, OnboardingModule::ANurturing);
    assert_eq!(overridden.steps.len(), 6);
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    onboarding
        .register_instructor(&registration("ada@example.com", "newbie", "2030-03-01"))
        .await
        .expect("Failed to register instructor");

    let result = onboarding
        .register_instructor(&registration(" ADA@example.com ", "experienced", "2030-03-01"))
        .await;
    match result {
        Err(OnboardingError::InvalidInput { field, .. }) => assert_eq!(field, "email"),
        other => panic!("Expected duplicate email error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_module_preview() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let resolution = onboarding
        .resolve_module(&ResolveModule {
            instructor_type: "re_contract".to_string(),
            start_date: "2030-01-10".to_string(),
            as_of: None,
        })
        .expect("Failed to resolve module");
    assert_eq!(resolution.as_of, TODAY);
    assert_eq!(resolution.days_until_start, 9);
    assert_eq!(resolution.module, OnboardingModule::FMinimalCheck);
    assert_eq!(resolution.configuration.len(), 6);

    let later = onboarding
        .resolve_module(&ResolveModule {
            instructor_type: "re_contract".to_string(),
            start_date: "2030-01-10".to_string(),
            as_of: Some("2029-12-01".to_string()),
        })
        .expect("Failed to resolve module");
    assert_eq!(later.module, OnboardingModule::EUpdate);
}

#[tokio::test]
async fn test_step_type_lookup() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let query = |module: Option<&str>, step_number: Option<i64>| StepTypeQuery {
        module: module.map(str::to_string),
        step_number,
    };

    assert_eq!(
        onboarding.step_type(&query(Some("F"), Some(2))).unwrap(),
        StepType::Skip
    );
    assert_eq!(
        onboarding.step_type(&query(Some("f_minimal_check"), None)).unwrap(),
        StepType::SelfCheck
    );
    assert_eq!(
        onboarding.step_type(&query(Some("A"), Some(42))).unwrap(),
        StepType::SelfCheck
    );
    assert!(matches!(
        onboarding.step_type(&query(None, Some(1))),
        Err(OnboardingError::InvalidInput { .. })
    ));
    assert!(matches!(
        onboarding.step_type(&query(Some("Z"), Some(1))),
        Err(OnboardingError::InvalidInput { .. })
    ));
}

#[tokio::test]
async fn test_task_updates_drive_step_status() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "newbie", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    let step = &instructor.steps[0];
    let task_ids: Vec<u64> = step.tasks.iter().map(|t| t.id).collect();
    assert_eq!(task_ids.len(), 3);

    let set_status = |id: u64, status: &str| UpdateTask {
        id,
        status: status.to_string(),
        expected_version: None,
    };

    let after_first = onboarding
        .update_task(&set_status(task_ids[0], "completed"))
        .await
        .expect("Failed to update task");
    assert_eq!(after_first.status, StepStatus::InProgress);
    assert_eq!(after_first.completed_tasks, 1);
    assert_eq!(after_first.total_tasks, 3);

    onboarding
        .update_task(&set_status(task_ids[1], "skipped"))
        .await
        .expect("Failed to update task");

    // Disabling the last open task completes the step
    let disabled = onboarding
        .set_task_enabled(&SetTaskEnabled {
            id: task_ids[2],
            enabled: false,
            expected_version: None,
        })
        .await
        .expect("Failed to disable task");
    assert_eq!(disabled.status, StepStatus::Completed);
    assert_eq!(disabled.total_tasks, 2);
    assert_eq!(disabled.completed_tasks, 1);
    assert_eq!(disabled.progress_percentage(), 50);

    // Reverting the skipped task moves the step backward
    let reverted = onboarding
        .update_task(&set_status(task_ids[1], "pending"))
        .await
        .expect("Failed to revert task");
    assert_eq!(reverted.status, StepStatus::InProgress);

    let stored = onboarding
        .get_step(&Id { id: step.id })
        .await
        .expect("Failed to get step")
        .expect("Step should exist");
    assert_eq!(stored.status, StepStatus::InProgress);
    assert!(stored.version > step.version);
    assert_eq!(
        stored.task(task_ids[0]).map(|t| t.status),
        Some(TaskStatus::Completed)
    );
}

#[tokio::test]
async fn test_update_task_version_conflict() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "experienced", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    let task = &instructor.steps[0].tasks[0];
    assert_eq!(task.version, 0);

    onboarding
        .update_task(&UpdateTask {
            id: task.id,
            status: "in_progress".to_string(),
            expected_version: Some(0),
        })
        .await
        .expect("First versioned update should succeed");

    let stale = onboarding
        .update_task(&UpdateTask {
            id: task.id,
            status: "completed".to_string(),
            expected_version: Some(0),
        })
        .await;
    match stale {
        Err(OnboardingError::VersionConflict {
            expected, actual, ..
        }) => {
            assert_eq!(expected, 0);
            assert_eq!(actual, 1);
        }
        other => panic!("Expected version conflict, got {other:?}"),
    }

    let stored = onboarding
        .get_task(&Id { id: task.id })
        .await
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(stored.status, TaskStatus::InProgress);
    assert_eq!(stored.version, 1);
}

#[tokio::test]
async fn test_add_task_reopens_completed_step() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "experienced", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    let step = &instructor.steps[1];

    for task in &step.tasks {
        onboarding
            .update_task(&UpdateTask {
                id: task.id,
                status: "completed".to_string(),
                expected_version: None,
            })
            .await
            .expect("Failed to complete task");
    }

    let added = onboarding
        .add_task(&AddTask {
            step_id: step.id,
            title: "Record a sample lesson".to_string(),
            kind: Some("video".to_string()),
        })
        .await
        .expect("Failed to add task");
    assert_eq!(added.kind, TaskKind::Video);
    assert_eq!(added.order as usize, step.tasks.len());

    let stored = onboarding
        .get_step(&Id { id: step.id })
        .await
        .expect("Failed to get step")
        .expect("Step should exist");
    assert_eq!(stored.status, StepStatus::InProgress);
    assert_eq!(stored.total_tasks as usize, step.tasks.len() + 1);

    let missing = onboarding
        .add_task(&AddTask {
            step_id: 9999,
            title: "Orphan".to_string(),
            kind: None,
        })
        .await;
    assert!(matches!(missing, Err(OnboardingError::StepNotFound { id: 9999 })));
}

#[tokio::test]
async fn test_list_and_delete_instructors() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let ada = onboarding
        .register_instructor(&registration("ada@example.com", "newbie", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    onboarding
        .register_instructor(&registration("bo@example.com", "experienced", "2030-06-01"))
        .await
        .expect("Failed to register instructor");

    let all = onboarding
        .list_instructors(&ListInstructors::default())
        .await
        .expect("Failed to list instructors");
    assert_eq!(all.len(), 2);

    let module_a = onboarding
        .list_instructors(&ListInstructors {
            module: Some("A".to_string()),
            instructor_type: None,
        })
        .await
        .expect("Failed to list instructors");
    assert_eq!(module_a.len(), 1);
    assert_eq!(module_a[0].id, ada.id);
    assert_eq!(module_a[0].total_steps, 6);

    let unconfirmed = onboarding
        .delete_instructor(&DeleteInstructor {
            id: ada.id,
            confirmed: false,
        })
        .await;
    assert!(matches!(unconfirmed, Err(OnboardingError::InvalidInput { .. })));

    onboarding
        .delete_instructor(&DeleteInstructor {
            id: ada.id,
            confirmed: true,
        })
        .await
        .expect("Failed to delete instructor");

    assert!(onboarding
        .get_instructor(&Id { id: ada.id })
        .await
        .expect("Failed to get instructor")
        .is_none());
    assert!(onboarding
        .get_step(&Id { id: ada.steps[0].id })
        .await
        .expect("Failed to get step")
        .is_none());

    let missing = onboarding
        .delete_instructor(&DeleteInstructor {
            id: ada.id,
            confirmed: true,
        })
        .await;
    assert!(matches!(
        missing,
        Err(OnboardingError::InstructorNotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_updates_on_distinct_tasks_all_succeed() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "newbie", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    let task_ids: Vec<u64> = instructor
        .steps
        .iter()
        .flat_map(|step| step.tasks.iter().map(|task| task.id))
        .collect();

    let rounds = 80;
    let handles: Vec<_> = (0..rounds)
        .map(|round| {
            let onboarding = onboarding.clone();
            let params = UpdateTask {
                id: task_ids[round % task_ids.len()],
                status: if round % 2 == 0 { "completed" } else { "pending" }.to_string(),
                expected_version: None,
            };
            tokio::spawn(async move { onboarding.update_task(&params).await })
        })
        .collect();

    for handle in handles {
        handle
            .await
            .expect("Update task panicked")
            .expect("Concurrent update should not fail");
    }

    let stored = onboarding
        .get_instructor(&Id { id: instructor.id })
        .await
        .expect("Failed to get instructor")
        .expect("Instructor should exist");

    let total_versions: u64 = stored
        .steps
        .iter()
        .flat_map(|step| step.tasks.iter().map(|task| task.version))
        .sum();
    assert_eq!(total_versions, rounds as u64);

    for step in &stored.steps {
        let mut recomputed = step.clone();
        recomputed.update_progress();
        assert_eq!(step.completed_tasks, recomputed.completed_tasks);
        assert_eq!(step.total_tasks, recomputed.total_tasks);
        assert_eq!(step.status, recomputed.status);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_versioned_updates_have_one_winner() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let instructor = onboarding
        .register_instructor(&registration("ada@example.com", "experienced", "2030-06-01"))
        .await
        .expect("Failed to register instructor");
    let task_id = instructor.steps[0].tasks[0].id;

    let handles: Vec<_> = ["in_progress", "completed", "skipped", "completed"]
        .into_iter()
        .map(|status| {
            let onboarding = onboarding.clone();
            let params = UpdateTask {
                id: task_id,
                status: status.to_string(),
                expected_version: Some(0),
            };
            tokio::spawn(async move { onboarding.update_task(&params).await })
        })
        .collect();

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.expect("Update task panicked") {
            Ok(_) => winners += 1,
            Err(OnboardingError::VersionConflict {
                expected, actual, ..
            }) => {
                assert_eq!(expected, 0);
                assert_eq!(actual, 1);
                conflicts += 1;
            }
            Err(other) => panic!("Expected a version conflict, got {other:?}"),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(conflicts, 3);

    let stored = onboarding
        .get_task(&Id { id: task_id })
        .await
        .expect("Failed to get task")
        .expect("Task should exist");
    assert_eq!(stored.version, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_racing_registrations_reject_duplicate_email() {
    let (_temp_dir, onboarding) = create_test_onboarding().await;

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let onboarding = onboarding.clone();
            let params = registration("ada@example.com", "newbie", "2030-06-01");
            tokio::spawn(async move { onboarding.register_instructor(&params).await })
        })
        .collect();

    let mut registered = 0;
    for handle in handles {
        match handle.await.expect("Registration panicked") {
            Ok(_) => registered += 1,
            Err(OnboardingError::InvalidInput { field, .. }) => assert_eq!(field, "email"),
            Err(other) => panic!("Expected a duplicate email error, got {other:?}"),
        }
    }
    assert_eq!(registered, 1);

    let summaries = onboarding
        .list_instructors(&ListInstructors::default())
        .await
        .expect("Failed to list instructors");
    assert_eq!(summaries.len(), 1);
}
