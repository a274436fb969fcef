//! Module resolution operations for the Onboarding service.

use std::collections::BTreeMap;

use super::Onboarding;
use crate::{
    error::Result,
    models::{OnboardingModule, StepType},
    params::{ResolveModule, StepTypeQuery},
    resolver::{self, ModuleResolution},
};

impl Onboarding {
    /// Previews the module an instructor would be assigned, without
    /// registering anyone.
    pub fn resolve_module(&self, params: &ResolveModule) -> Result<ModuleResolution> {
        let (instructor_type, start_date, as_of) = params.validate()?;
        let today = as_of.unwrap_or_else(|| self.today());
        Ok(resolver::resolve(instructor_type, start_date, today))
    }

    /// Looks up a step type where module and step number may be missing.
    ///
    /// A missing module is an `InvalidInput` error; a missing or unknown step
    /// number resolves to [`StepType::SelfCheck`].
    pub fn step_type(&self, params: &StepTypeQuery) -> Result<StepType> {
        resolver::step_type(params.module()?, params.step_number)
    }

    /// Full step table of a module.
    pub fn module_configuration(&self, module: OnboardingModule) -> BTreeMap<u32, StepType> {
        resolver::module_configuration(module)
    }
}
