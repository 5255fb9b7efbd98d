//! Per-screen data resource state.
//!
//! Every screen fetches its own data on mount and on pull-to-refresh; a
//! fetch failure renders inline error state with a retry affordance, never
//! a crash. A refresh keeps showing the last good value until the new one
//! arrives.

/// Load state of one screen's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    /// Initial load in progress; render a loading indicator.
    Loading,
    Ready(T),
    /// Inline error with a retry affordance.
    Failed { message: String, retryable: bool },
}

impl<T> Resource<T> {
    pub fn failed(message: impl Into<String>, retryable: bool) -> Self {
        Self::Failed {
            message: message.into(),
            retryable,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Resource::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Apply a completed fetch. A failed refresh over existing data keeps
    /// the data and surfaces the error out-of-band (pull-to-refresh UX).
    pub fn apply(&mut self, result: Result<T, (String, bool)>) -> Option<String> {
        match result {
            Ok(value) => {
                *self = Resource::Ready(value);
                None
            }
            Err((message, retryable)) => {
                if matches!(self, Resource::Ready(_)) {
                    // Keep the stale-but-valid data visible.
                    Some(message)
                } else {
                    *self = Resource::failed(message.clone(), retryable);
                    Some(message)
                }
            }
        }
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::Loading
    }
}
