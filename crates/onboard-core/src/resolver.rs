//! Module and step-type resolution.
//!
//! An instructor's [`InstructorType`] and [`TimingVariable`] select exactly one
//! [`OnboardingModule`]; each module then fixes a [`StepType`] for every step
//! number from 1 to 6. Both mappings are compiled-in constant data.
//!
//! Lookups that miss the table never fail: an unknown or absent step number
//! resolves to [`StepType::SelfCheck`] and a warning is logged. The only error
//! is a missing module, which the caller has to fix.
//!
//! ```rust
//! use onboard_core::{
//!     models::{InstructorType, OnboardingModule, StepType, TimingVariable},
//!     resolver,
//! };
//!
//! let module = resolver::determine_module(InstructorType::Newbie, TimingVariable::Urgent);
//! assert_eq!(module, OnboardingModule::BSurvival);
//!
//! assert_eq!(resolver::step_type(Some(module), Some(1)).unwrap(), StepType::PmLed);
//! assert_eq!(resolver::step_type(Some(module), Some(6)).unwrap(), StepType::Skip);
//! assert_eq!(resolver::included_steps(Some(module)).unwrap(), vec![1, 2, 3, 4, 5]);
//! ```

use std::collections::BTreeMap;

use jiff::civil::Date;
use log::warn;
use serde::Serialize;

use crate::{
    error::{OnboardingError, Result},
    models::{InstructorType, OnboardingModule, StepType, TimingVariable},
};

/// Minimum number of days between today and the start date for onboarding to
/// be considered [`TimingVariable::Comfortable`].
pub const COMFORTABLE_LEAD_DAYS: i32 = 14;

/// Highest step number any module configures.
pub const STEP_COUNT: u32 = 6;

const MISSING_MODULE: &str = "module information missing, select a module first";

use StepType::{Delay, PmLed, SelfCheck, Skip};

const A_NURTURING: [(u32, StepType); 6] = [
    (1, PmLed),
    (2, PmLed),
    (3, PmLed),
    (4, SelfCheck),
    (5, PmLed),
    (6, PmLed),
];

const B_SURVIVAL: [(u32, StepType); 6] = [
    (1, PmLed),
    (2, PmLed),
    (3, SelfCheck),
    (4, SelfCheck),
    (5, Delay),
    (6, Skip),
];

const C_ALIGNMENT: [(u32, StepType); 6] = [
    (1, PmLed),
    (2, SelfCheck),
    (3, PmLed),
    (4, SelfCheck),
    (5, SelfCheck),
    (6, PmLed),
];

const D_QUICK_ADAPTATION: [(u32, StepType); 6] = [
    (1, PmLed),
    (2, SelfCheck),
    (3, SelfCheck),
    (4, SelfCheck),
    (5, Delay),
    (6, Skip),
];

const E_UPDATE: [(u32, StepType); 6] = [
    (1, SelfCheck),
    (2, Skip),
    (3, SelfCheck),
    (4, SelfCheck),
    (5, PmLed),
    (6, SelfCheck),
];

const F_MINIMAL_CHECK: [(u32, StepType); 6] = [
    (1, SelfCheck),
    (2, Skip),
    (3, Skip),
    (4, SelfCheck),
    (5, Delay),
    (6, Skip),
];

/// Authored `(step number, step type)` entries for a module.
fn configured_steps(module: OnboardingModule) -> &'static [(u32, StepType)] {
    match module {
        OnboardingModule::ANurturing => &A_NURTURING,
        OnboardingModule::BSurvival => &B_SURVIVAL,
        OnboardingModule::CAlignment => &C_ALIGNMENT,
        OnboardingModule::DQuickAdaptation => &D_QUICK_ADAPTATION,
        OnboardingModule::EUpdate => &E_UPDATE,
        OnboardingModule::FMinimalCheck => &F_MINIMAL_CHECK,
    }
}

fn require_module(module: Option<OnboardingModule>) -> Result<OnboardingModule> {
    module.ok_or_else(|| OnboardingError::invalid_input("module").with_reason(MISSING_MODULE))
}

/// Derives urgency from the days left until `start_date`, counted from
/// `today`. Start dates in the past are urgent.
pub fn determine_timing(start_date: Date, today: Date) -> TimingVariable {
    let days_until_start = (start_date - today).get_days();
    if days_until_start >= COMFORTABLE_LEAD_DAYS {
        TimingVariable::Comfortable
    } else {
        TimingVariable::Urgent
    }
}

/// Selects the onboarding module for an instructor classification.
pub fn determine_module(
    instructor_type: InstructorType,
    timing: TimingVariable,
) -> OnboardingModule {
    match (instructor_type, timing) {
        (InstructorType::Newbie, TimingVariable::Comfortable) => OnboardingModule::ANurturing,
        (InstructorType::Newbie, TimingVariable::Urgent) => OnboardingModule::BSurvival,
        (InstructorType::Experienced, TimingVariable::Comfortable) => OnboardingModule::CAlignment,
        (InstructorType::Experienced, TimingVariable::Urgent) => {
            OnboardingModule::DQuickAdaptation
        }
        (InstructorType::ReContract, TimingVariable::Comfortable) => OnboardingModule::EUpdate,
        (InstructorType::ReContract, TimingVariable::Urgent) => OnboardingModule::FMinimalCheck,
    }
}

/// Returns how step `step_number` is handled under `module`.
///
/// # Errors
///
/// `OnboardingError::InvalidInput` on field `module` when no module is given.
/// A missing, non-positive or unconfigured step number is not an error; it
/// resolves to [`StepType::SelfCheck`] with a warning.
pub fn step_type(module: Option<OnboardingModule>, step_number: Option<i64>) -> Result<StepType> {
    let module = require_module(module)?;

    let step_number = match step_number {
        Some(n) if n >= 1 => n,
        other => {
            warn!(
                "Invalid step number {other:?} for module {}, defaulting to {}",
                module.as_str(),
                SelfCheck.as_str()
            );
            return Ok(SelfCheck);
        }
    };

    let configured = configured_steps(module)
        .iter()
        .find(|(number, _)| i64::from(*number) == step_number)
        .map(|(_, step_type)| *step_type);

    Ok(configured.unwrap_or_else(|| {
        warn!(
            "No step type configured for step {step_number} of module {}, defaulting to {}",
            module.as_str(),
            SelfCheck.as_str()
        );
        SelfCheck
    }))
}

/// Step numbers the module actually runs (everything but [`StepType::Skip`]),
/// ascending.
///
/// # Errors
///
/// `OnboardingError::InvalidInput` on field `module` when no module is given.
pub fn included_steps(module: Option<OnboardingModule>) -> Result<Vec<u32>> {
    let module = require_module(module)?;
    Ok(module_configuration(module)
        .into_iter()
        .filter(|(_, step_type)| *step_type != Skip)
        .map(|(number, _)| number)
        .collect())
}

/// Outcome of classifying an instructor without registering them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleResolution {
    pub instructor_type: InstructorType,
    pub start_date: Date,
    /// The day the resolution was computed against
    pub as_of: Date,
    pub days_until_start: i32,
    pub timing: TimingVariable,
    pub module: OnboardingModule,
    pub configuration: BTreeMap<u32, StepType>,
}

/// Classifies an instructor as of `today` and attaches the module's table.
pub fn resolve(instructor_type: InstructorType, start_date: Date, today: Date) -> ModuleResolution {
    let timing = determine_timing(start_date, today);
    let module = determine_module(instructor_type, timing);
    ModuleResolution {
        instructor_type,
        start_date,
        as_of: today,
        days_until_start: (start_date - today).get_days(),
        timing,
        module,
        configuration: module_configuration(module),
    }
}

/// Returns an owned copy of the module's full step table.
pub fn module_configuration(module: OnboardingModule) -> BTreeMap<u32, StepType> {
    let configuration: BTreeMap<u32, StepType> =
        configured_steps(module).iter().copied().collect();
    if configuration.is_empty() {
        warn!("No configuration found for module {}", module.as_str());
    }
    configuration
}
