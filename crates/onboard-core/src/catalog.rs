//! The fixed catalog of onboarding steps and the tasks each one starts with.

use crate::models::TaskKind;

/// A task created with every new step of a given number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub kind: TaskKind,
}

/// Definition of one onboarding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepTemplate {
    pub number: u32,
    pub title: &'static str,
    pub tasks: &'static [TaskTemplate],
}

const fn task(title: &'static str, kind: TaskKind) -> TaskTemplate {
    TaskTemplate { title, kind }
}

/// Steps in onboarding order. Step numbers match the resolver table.
pub const STEPS: [StepTemplate; 6] = [
    StepTemplate {
        number: 1,
        title: "Orientation",
        tasks: &[
            task("Read the instructor handbook", TaskKind::Document),
            task("Watch the welcome video", TaskKind::Video),
            task("Confirm the orientation checklist", TaskKind::Checklist),
        ],
    },
    StepTemplate {
        number: 2,
        title: "Curriculum Review",
        tasks: &[
            task("Study the curriculum guide", TaskKind::Document),
            task("Watch the lecture walkthrough", TaskKind::Video),
        ],
    },
    StepTemplate {
        number: 3,
        title: "Teaching Demonstration",
        tasks: &[
            task("Upload a demo lesson plan", TaskKind::FileUpload),
            task("Upload a recorded demo lesson", TaskKind::FileUpload),
            task("Review the demo feedback checklist", TaskKind::Checklist),
        ],
    },
    StepTemplate {
        number: 4,
        title: "Administrative Setup",
        tasks: &[
            task("Upload the signed contract", TaskKind::FileUpload),
            task("Upload payout details", TaskKind::FileUpload),
            task("Complete the account setup checklist", TaskKind::Checklist),
        ],
    },
    StepTemplate {
        number: 5,
        title: "First Class Preparation",
        tasks: &[
            task("Watch the classroom tools tutorial", TaskKind::Video),
            task("Upload first class materials", TaskKind::FileUpload),
            task("Run through the pre-class checklist", TaskKind::Checklist),
        ],
    },
    StepTemplate {
        number: 6,
        title: "First Week Review",
        tasks: &[
            task("Read the feedback guidelines", TaskKind::Document),
            task("Complete the first week retrospective", TaskKind::Checklist),
        ],
    },
];

/// Looks up the template for a step number.
pub fn step_template(number: u32) -> Option<&'static StepTemplate> {
    STEPS.iter().find(|step| step.number == number)
}
