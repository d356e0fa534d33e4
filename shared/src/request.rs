use crate::error::ValidationError;

/// Lifecycle of the single request a workflow may have outstanding.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Submitting,
    Succeeded(T),
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    /// Moves into `Submitting`. Refused while a request is already out.
    pub fn begin(&mut self) -> Result<(), ValidationError> {
        if self.is_submitting() {
            return Err(ValidationError::RequestInFlight);
        }
        *self = RequestState::Submitting;
        Ok(())
    }

    /// Records the outcome of the outstanding request. Returns false (and
    /// changes nothing) when no request was outstanding.
    pub fn resolve(&mut self, outcome: Result<T, String>) -> bool {
        if !self.is_submitting() {
            return false;
        }
        *self = match outcome {
            Ok(value) => RequestState::Succeeded(value),
            Err(message) => RequestState::Failed(message),
        };
        true
    }

    /// Shows a message without a request having been made.
    pub fn reject(&mut self, message: impl Into<String>) {
        *self = RequestState::Failed(message.into());
    }

    pub fn reset(&mut self) {
        *self = RequestState::Idle;
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, RequestState::Submitting)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transitions() {
        let mut state: RequestState<u32> = RequestState::default();
        assert_eq!(state, RequestState::Idle);

        state.begin().unwrap();
        assert!(state.is_submitting());
        assert!(state.resolve(Ok(7)));
        assert_eq!(state.value(), Some(&7));

        state.begin().unwrap();
        assert!(state.value().is_none());
        assert!(state.resolve(Err("Prediction failed".into())));
        assert_eq!(state.error(), Some("Prediction failed"));
    }

    #[test]
    fn test_second_begin_is_refused() {
        let mut state: RequestState<()> = RequestState::default();
        state.begin().unwrap();
        assert_eq!(state.begin(), Err(ValidationError::RequestInFlight));
        assert!(state.is_submitting());
    }

    #[test]
    fn test_stray_resolution_is_ignored() {
        let mut state: RequestState<u32> = RequestState::default();
        assert!(!state.resolve(Ok(1)));
        assert_eq!(state, RequestState::Idle);
    }

    #[test]
    fn test_reject_and_reset() {
        let mut state: RequestState<u32> = RequestState::default();
        state.reject("Please select an image first");
        assert_eq!(state.error(), Some("Please select an image first"));
        state.reset();
        assert_eq!(state, RequestState::Idle);
    }
}
