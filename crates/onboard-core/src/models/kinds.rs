//! Classification enumerations: instructor tier, urgency, module and step type.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Normalizes user-supplied enum text so `Re-Contract`, `re_contract` and
/// `RE_CONTRACT` all parse the same way.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase().replace(['-', ' '], "_")
}

/// Experience tier assigned once at instructor registration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum InstructorType {
    /// First-time instructor
    Newbie,

    /// Has taught elsewhere before
    Experienced,

    /// Returning instructor renewing a contract
    ReContract,
}

impl InstructorType {
    /// Every instructor type, in declaration order.
    pub const ALL: [InstructorType; 3] = [
        InstructorType::Newbie,
        InstructorType::Experienced,
        InstructorType::ReContract,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            InstructorType::Newbie => "newbie",
            InstructorType::Experienced => "experienced",
            InstructorType::ReContract => "re_contract",
        }
    }
}

impl FromStr for InstructorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "newbie" => Ok(InstructorType::Newbie),
            "experienced" => Ok(InstructorType::Experienced),
            "re_contract" | "recontract" => Ok(InstructorType::ReContract),
            _ => Err(format!("Invalid instructor type: {s}")),
        }
    }
}

/// Onboarding urgency, derived from how far away the start date is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimingVariable {
    /// Two weeks or more until the start date
    Comfortable,

    /// Less than two weeks until the start date
    Urgent,
}

impl TimingVariable {
    /// Both timing variables, in declaration order.
    pub const ALL: [TimingVariable; 2] = [TimingVariable::Comfortable, TimingVariable::Urgent];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingVariable::Comfortable => "comfortable",
            TimingVariable::Urgent => "urgent",
        }
    }
}

impl FromStr for TimingVariable {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "comfortable" => Ok(TimingVariable::Comfortable),
            "urgent" => Ok(TimingVariable::Urgent),
            _ => Err(format!("Invalid timing variable: {s}")),
        }
    }
}

/// One of the six fixed onboarding profiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OnboardingModule {
    /// Newbie with time to spare: every step guided
    ANurturing,

    /// Newbie starting soon: essentials first, the rest later
    BSurvival,

    /// Experienced with time to spare: align with house standards
    CAlignment,

    /// Experienced starting soon: fast self-paced adaptation
    DQuickAdaptation,

    /// Re-contract with time to spare: refresh what changed
    EUpdate,

    /// Re-contract starting soon: the bare minimum
    FMinimalCheck,
}

impl OnboardingModule {
    /// Every module, in declaration order.
    pub const ALL: [OnboardingModule; 6] = [
        OnboardingModule::ANurturing,
        OnboardingModule::BSurvival,
        OnboardingModule::CAlignment,
        OnboardingModule::DQuickAdaptation,
        OnboardingModule::EUpdate,
        OnboardingModule::FMinimalCheck,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingModule::ANurturing => "a_nurturing",
            OnboardingModule::BSurvival => "b_survival",
            OnboardingModule::CAlignment => "c_alignment",
            OnboardingModule::DQuickAdaptation => "d_quick_adaptation",
            OnboardingModule::EUpdate => "e_update",
            OnboardingModule::FMinimalCheck => "f_minimal_check",
        }
    }

    /// Single-letter code used in PM conversations ("module B").
    pub fn code(&self) -> char {
        match self {
            OnboardingModule::ANurturing => 'A',
            OnboardingModule::BSurvival => 'B',
            OnboardingModule::CAlignment => 'C',
            OnboardingModule::DQuickAdaptation => 'D',
            OnboardingModule::EUpdate => 'E',
            OnboardingModule::FMinimalCheck => 'F',
        }
    }

    /// Human readable module name.
    pub fn label(&self) -> &'static str {
        match self {
            OnboardingModule::ANurturing => "Nurturing",
            OnboardingModule::BSurvival => "Survival",
            OnboardingModule::CAlignment => "Alignment",
            OnboardingModule::DQuickAdaptation => "Quick Adaptation",
            OnboardingModule::EUpdate => "Update",
            OnboardingModule::FMinimalCheck => "Minimal Check",
        }
    }
}

impl FromStr for OnboardingModule {
    type Err = String;

    /// Accepts the database form (`b_survival`), the letter code (`b`) or the
    /// label (`survival`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        OnboardingModule::ALL
            .into_iter()
            .find(|module| {
                normalized == module.as_str()
                    || normalized == module.code().to_ascii_lowercase().to_string()
                    || normalized == normalize(module.label())
            })
            .ok_or_else(|| format!("Invalid onboarding module: {s}"))
    }
}

/// How a step number is handled under a given module.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepType {
    /// A PM walks the instructor through the step
    PmLed,

    /// The instructor works through the step and certifies it
    SelfCheck,

    /// The step is not part of the module
    Skip,

    /// The step happens after the instructor has started teaching
    Delay,
}

impl StepType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::PmLed => "pm_led",
            StepType::SelfCheck => "self_check",
            StepType::Skip => "skip",
            StepType::Delay => "delay",
        }
    }

    /// Label shown next to a step title.
    pub fn label(&self) -> &'static str {
        match self {
            StepType::PmLed => "PM-led",
            StepType::SelfCheck => "Self-check",
            StepType::Skip => "Skipped",
            StepType::Delay => "Delayed",
        }
    }
}

impl FromStr for StepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pm_led" | "pmled" => Ok(StepType::PmLed),
            "self_check" | "selfcheck" => Ok(StepType::SelfCheck),
            "skip" => Ok(StepType::Skip),
            "delay" => Ok(StepType::Delay),
            _ => Err(format!("Invalid step type: {s}")),
        }
    }
}
