//! Error taxonomy for the booking flow.
//!
//! Nothing here is fatal to the surrounding application: every variant
//! terminates at most the in-progress booking attempt. Per-field validation
//! failures are deliberately *not* represented here — they travel in a
//! [`crate::services::validation::ValidationReport`] so the flow stays
//! interactive while the customer corrects individual fields.

use crate::services::sequencer::Step;

/// Result type for flow operations
pub type FlowResult<T> = Result<T, FlowError>;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The schedule/catalog collaborator could not supply usable data.
    /// Blocking: booking cannot safely proceed without real hours.
    #[error("schedule data unavailable: {message}")]
    ScheduleUnavailable { message: String },

    /// A step was requested before its prerequisites were met. Recover by
    /// redirecting to `redirect`, the first step missing a prerequisite.
    #[error("step `{requested}` is not reachable yet; redirect to `{redirect}`")]
    NavigationDenied { requested: Step, redirect: Step },

    /// A resumable address carried a value that cannot reconstruct state.
    #[error("malformed resumable address: {message}")]
    AddressDecode { message: String },

    /// A booking horizon with `min_date > max_date` or out of range.
    #[error("invalid booking window: {message}")]
    InvalidWindow { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_denied_display() {
        let err = FlowError::NavigationDenied {
            requested: Step::Confirm,
            redirect: Step::Date,
        };
        let text = err.to_string();
        assert!(text.contains("confirm"));
        assert!(text.contains("date"));
    }

    #[test]
    fn test_address_decode_display() {
        let err = FlowError::AddressDecode {
            message: "invalid clock time `9am`".to_string(),
        };
        assert!(err.to_string().contains("resumable address"));
    }
}
