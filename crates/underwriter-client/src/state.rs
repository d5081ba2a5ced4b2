//! Request state shared by both controllers

/// Lifecycle of one analysis request. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestState<T> {
    Idle,
    Loading,
    Succeeded(T),
    /// Human-readable failure message
    Failed(String),
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        RequestState::Idle
    }
}

impl<T> RequestState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(payload) => Some(payload),
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

/// What a controller action ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Input was blank; nothing was sent
    Skipped,
    /// Response arrived and was committed
    Applied,
    /// Request failed and the failure was committed
    Failed,
    /// Response arrived after a newer action and was dropped
    Stale,
    /// Toggle closed the expanded protocol; nothing was sent
    Collapsed,
}

impl Dispatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dispatch::Skipped => "skipped",
            Dispatch::Applied => "applied",
            Dispatch::Failed => "failed",
            Dispatch::Stale => "stale",
            Dispatch::Collapsed => "collapsed",
        }
    }
}
