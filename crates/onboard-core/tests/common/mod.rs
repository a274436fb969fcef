use jiff::civil::Date;
use onboard_core::{params::RegisterInstructor, Onboarding, OnboardingBuilder};
use tempfile::TempDir;

/// Helper function to create a test service pinned to `today`
pub async fn create_test_onboarding(today: Date) -> (TempDir, Onboarding) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let onboarding = OnboardingBuilder::new()
        .with_database_path(Some(&db_path))
        .with_today(Some(today))
        .build()
        .await
        .expect("Failed to create onboarding service");
    (temp_dir, onboarding)
}

/// Registration input with sensible defaults
pub fn registration(name: &str, instructor_type: &str, start_date: &str) -> RegisterInstructor {
    RegisterInstructor {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        instructor_type: instructor_type.to_string(),
        start_date: start_date.to_string(),
        module: None,
    }
}
