//! Error handling utilities for MCP server

use onboard_core::OnboardingError;
use rmcp::ErrorData;

/// Converts an onboarding error into an MCP error.
///
/// Bad input, unknown IDs and version conflicts are reported as invalid
/// parameters so the client can correct the call; everything else is an
/// internal error.
pub fn to_mcp_error(message: &str, error: &OnboardingError) -> ErrorData {
    let text = format!("{message}: {error}");
    if error.is_caller_error() {
        ErrorData::invalid_params(text, None)
    } else {
        ErrorData::internal_error(text, None)
    }
}

/// Error for a lookup that found nothing.
pub fn not_found(entity: &str, id: u64) -> ErrorData {
    ErrorData::invalid_params(format!("{entity} with ID {id} not found"), None)
}
