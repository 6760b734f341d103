use premia_core::{DataNeed, PremiaError};

/// Collapse the failures of one candidate list into a single `PremiaError`.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(need)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(need)`.
/// - If all errors are `NotFound` → `NotFound(not_found_what)`.
/// - Else → `AllProvidersFailed(errors)`.
pub fn collapse_errors(
    need: DataNeed,
    attempted_any: bool,
    errors: Vec<PremiaError>,
    not_found_what: String,
) -> PremiaError {
    if !attempted_any {
        return PremiaError::unsupported(need.as_str());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, PremiaError::ProviderTimeout { .. }))
    {
        return PremiaError::AllProvidersTimedOut {
            need: need.to_string(),
        };
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, PremiaError::NotFound { .. }))
    {
        return PremiaError::not_found(not_found_what);
    }
    PremiaError::AllProvidersFailed(errors)
}
