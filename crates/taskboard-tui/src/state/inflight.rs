use std::collections::HashSet;
use std::fmt;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::TaskId;

/// What a mutating request acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKey {
    Create,
    Task(TaskId),
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKey::Create => write!(f, "new task"),
            RequestKey::Task(id) => write!(f, "task {}", id),
        }
    }
}

/// Single-flight guard over mutating requests.
///
/// At most one request per key is outstanding; a second one on the same
/// key is refused until the first reports back.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: HashSet<RequestKey>,
}

impl InFlight {
    pub fn begin(&mut self, key: RequestKey) -> TaskboardResult<()> {
        if !self.pending.insert(key) {
            tracing::warn!(key = %key, "Refusing request, another one is in flight");
            return Err(TaskboardError::Busy(key.to_string()));
        }
        Ok(())
    }

    pub fn finish(&mut self, key: RequestKey) {
        self.pending.remove(&key);
    }

    pub fn is_pending(&self, key: RequestKey) -> bool {
        self.pending.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_request_on_same_task_is_refused() {
        let mut inflight = InFlight::default();
        inflight.begin(RequestKey::Task(4)).unwrap();

        let err = inflight.begin(RequestKey::Task(4)).unwrap_err();
        assert!(matches!(err, TaskboardError::Busy(ref what) if what == "task 4"));

        // Other keys are independent.
        inflight.begin(RequestKey::Task(5)).unwrap();
        inflight.begin(RequestKey::Create).unwrap();

        inflight.finish(RequestKey::Task(4));
        assert!(inflight.begin(RequestKey::Task(4)).is_ok());
    }

    #[test]
    fn test_finish_clears_pending() {
        let mut inflight = InFlight::default();
        inflight.begin(RequestKey::Create).unwrap();
        assert!(inflight.is_pending(RequestKey::Create));
        inflight.finish(RequestKey::Create);
        assert!(!inflight.is_pending(RequestKey::Create));
    }
}
