use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskboardError {
    /// A call to the task API did not succeed. `status` is absent when the
    /// request never produced an HTTP response.
    #[error("Request failed{}: {reason}", status_suffix(.status))]
    RequestFailed { status: Option<u16>, reason: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Request already in progress for {0}")]
    Busy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(" with status {}", code),
        None => String::new(),
    }
}

impl TaskboardError {
    pub fn http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: Some(status),
            reason: reason.into(),
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            status: None,
            reason: reason.into(),
        }
    }

    /// HTTP status carried by a failed request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => *status,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_failed_display_includes_status() {
        let err = TaskboardError::http_status(404, "Not Found");
        assert_eq!(err.to_string(), "Request failed with status 404: Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_transport_failure_has_no_status() {
        let err = TaskboardError::transport("connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_other_variants_have_no_status() {
        assert_eq!(TaskboardError::Validation("x".into()).status(), None);
    }
}
