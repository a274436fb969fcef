//! Display implementations for domain models.
//!
//! Every model renders as markdown: instructors and steps as headed sections,
//! tasks as checklist-style lines, enums as their database string.

use std::{collections::BTreeMap, fmt};

use super::{
    collections::Steps,
    datetime::{LocalDateTime, RelativeDays},
};
use crate::{
    models::{
        Instructor, InstructorSummary, InstructorType, OnboardingModule, OnboardingStep, StepStatus,
        StepType, Task, TaskKind, TaskStatus, TimingVariable,
    },
    resolver::ModuleResolution,
};

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }
        )+
    };
}

display_as_str!(
    InstructorType,
    TimingVariable,
    StepType,
    StepStatus,
    TaskStatus,
    TaskKind,
);

impl fmt::Display for OnboardingModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

/// Markdown table of a module's step types.
pub struct ModuleTable<'a> {
    pub module: OnboardingModule,
    pub configuration: &'a BTreeMap<u32, StepType>,
}

impl fmt::Display for ModuleTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Module {}", self.module)?;
        writeln!(f)?;
        writeln!(f, "| Step | Title | Type |")?;
        writeln!(f, "|------|-------|------|")?;
        for (number, step_type) in self.configuration {
            let title = crate::catalog::step_template(*number)
                .map(|template| template.title)
                .unwrap_or("-");
            writeln!(f, "| {number} | {title} | {} |", step_type.label())?;
        }
        Ok(())
    }
}

impl fmt::Display for ModuleResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Module {}", self.module)?;
        writeln!(f)?;
        writeln!(f, "- Instructor type: {}", self.instructor_type)?;
        writeln!(
            f,
            "- Start date: {} ({} as of {})",
            self.start_date,
            RelativeDays(self.days_until_start),
            self.as_of
        )?;
        writeln!(f, "- Timing: {}", self.timing)?;
        writeln!(f)?;
        write!(
            f,
            "{}",
            ModuleTable {
                module: self.module,
                configuration: &self.configuration,
            }
        )
    }
}

impl fmt::Display for Instructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.name)?;
        writeln!(f)?;

        writeln!(f, "- Email: {}", self.email)?;
        writeln!(f, "- Type: {}", self.instructor_type)?;
        writeln!(f, "- Start date: {}", self.start_date)?;
        writeln!(f, "- Timing: {}", self.timing)?;
        writeln!(f, "- Module: {}", self.module)?;
        writeln!(
            f,
            "- Progress: {}/{} steps completed",
            self.completed_steps(),
            self.steps.len()
        )?;
        writeln!(f, "- Registered: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Steps")?;
        writeln!(f)?;
        write!(f, "{}", Steps(&self.steps))
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}. Step {}: {} ({}, {})",
            self.id,
            self.step_number,
            self.title,
            self.step_type.label(),
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "Progress: {}/{} tasks ({}%)",
            self.completed_tasks,
            self.total_tasks,
            self.progress_percentage()
        )?;
        writeln!(f)?;

        for task in &self.tasks {
            write!(f, "{task}")?;
        }
        if !self.tasks.is_empty() {
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} {} (task {}, {}, v{})",
            self.status.with_icon(),
            self.title,
            self.id,
            self.kind,
            self.version
        )?;
        if !self.enabled {
            write!(f, " _disabled_")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for InstructorSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = if self.total_steps > 0 {
            format!(" ({}/{})", self.completed_steps, self.total_steps)
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){progress}", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Email**: {}", self.email)?;
        writeln!(f, "- **Module**: {}", self.module)?;
        writeln!(
            f,
            "- **Start date**: {} ({})",
            self.start_date, self.timing
        )?;
        writeln!(f)?;

        Ok(())
    }
}
