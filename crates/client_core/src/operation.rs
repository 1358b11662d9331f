//! One request/response cycle per flow slot, guarded by invocation ids.

use std::sync::Arc;

use shared::error::ApiFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationId(pub u64);

impl std::fmt::Display for InvocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
pub enum OperationState<T> {
    Idle,
    Pending(InvocationId),
    Succeeded(InvocationId, Arc<T>),
    Failed(InvocationId, ApiFailure),
}

impl<T> Clone for OperationState<T> {
    fn clone(&self) -> Self {
        match self {
            OperationState::Idle => OperationState::Idle,
            OperationState::Pending(id) => OperationState::Pending(*id),
            OperationState::Succeeded(id, result) => {
                OperationState::Succeeded(*id, Arc::clone(result))
            }
            OperationState::Failed(id, err) => OperationState::Failed(*id, err.clone()),
        }
    }
}

impl<T> OperationState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationState::Pending(_))
    }

    pub fn invocation(&self) -> Option<InvocationId> {
        match self {
            OperationState::Idle => None,
            OperationState::Pending(id)
            | OperationState::Succeeded(id, _)
            | OperationState::Failed(id, _) => Some(*id),
        }
    }
}

#[derive(Debug)]
pub struct AsyncOperation<T> {
    last_assigned: u64,
    state: OperationState<T>,
    last_success: Option<Arc<T>>,
}

impl<T> Default for AsyncOperation<T> {
    fn default() -> Self {
        Self {
            last_assigned: 0,
            state: OperationState::Idle,
            last_success: None,
        }
    }
}

impl<T> AsyncOperation<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new invocation. Any earlier invocation is superseded.
    pub fn submit(&mut self) -> InvocationId {
        self.last_assigned += 1;
        let id = InvocationId(self.last_assigned);
        self.state = OperationState::Pending(id);
        id
    }

    /// Commits an outcome if `id` is still the latest invocation.
    /// Returns `false` when the outcome was stale and dropped.
    pub fn complete(&mut self, id: InvocationId, outcome: Result<T, ApiFailure>) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.state = match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                self.last_success = Some(Arc::clone(&result));
                OperationState::Succeeded(id, result)
            }
            Err(err) => OperationState::Failed(id, err),
        };
        true
    }

    pub fn is_current(&self, id: InvocationId) -> bool {
        id.0 == self.last_assigned && self.state.is_pending()
    }

    /// Drops state and the remembered success but keeps the id counter,
    /// so ids stay unique across instances sharing this slot.
    pub fn reset_instance(&mut self) {
        self.state = OperationState::Idle;
        self.last_success = None;
    }

    pub fn state(&self) -> &OperationState<T> {
        &self.state
    }

    pub fn last_success(&self) -> Option<&Arc<T>> {
        self.last_success.as_ref()
    }

    pub fn last_assigned(&self) -> Option<InvocationId> {
        (self.last_assigned > 0).then_some(InvocationId(self.last_assigned))
    }

    pub fn snapshot(&self) -> OperationSnapshot<T> {
        OperationSnapshot {
            state: self.state.clone(),
            last_success: self.last_success.clone(),
        }
    }
}

/// Read-only copy handed to the projection layer.
#[derive(Debug)]
pub struct OperationSnapshot<T> {
    pub state: OperationState<T>,
    pub last_success: Option<Arc<T>>,
}

impl<T> Clone for OperationSnapshot<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            last_success: self.last_success.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::FailureKind;

    #[test]
    fn starts_idle_and_assigns_increasing_ids() {
        let mut op = AsyncOperation::<u32>::new();
        assert!(matches!(op.state(), OperationState::Idle));
        assert_eq!(op.last_assigned(), None);
        let first = op.submit();
        let second = op.submit();
        assert_eq!(first, InvocationId(1));
        assert_eq!(second, InvocationId(2));
        assert!(matches!(op.state(), OperationState::Pending(InvocationId(2))));
    }

    #[test]
    fn later_submission_wins_when_older_completes_last() {
        let mut op = AsyncOperation::<&str>::new();
        let a = op.submit();
        let b = op.submit();
        assert!(op.complete(b, Ok("b")));
        assert!(!op.complete(a, Ok("a")));
        match op.state() {
            OperationState::Succeeded(id, value) => {
                assert_eq!(*id, b);
                assert_eq!(**value, "b");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn later_submission_wins_when_older_completes_first() {
        let mut op = AsyncOperation::<&str>::new();
        let a = op.submit();
        let b = op.submit();
        assert!(!op.complete(a, Ok("a")));
        assert!(op.state().is_pending());
        assert!(op.complete(b, Err(ApiFailure::transport())));
        assert!(matches!(op.state(), OperationState::Failed(id, _) if *id == b));
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut op = AsyncOperation::<u8>::new();
        let a = op.submit();
        assert!(op.complete(a, Ok(1)));
        assert!(!op.complete(a, Ok(2)));
        assert_eq!(op.last_success().map(|v| **v), Some(1));
    }

    #[test]
    fn failure_keeps_last_success() {
        let mut op = AsyncOperation::<u8>::new();
        let a = op.submit();
        op.complete(a, Ok(7));
        let b = op.submit();
        assert_eq!(op.snapshot().last_success.map(|v| *v), Some(7));
        op.complete(
            b,
            Err(ApiFailure::new(FailureKind::Application, "boom")),
        );
        let snapshot = op.snapshot();
        assert!(matches!(snapshot.state, OperationState::Failed(_, ref e) if e.message == "boom"));
        assert_eq!(snapshot.last_success.map(|v| *v), Some(7));
    }

    #[test]
    fn reset_instance_keeps_counter_and_forgets_success() {
        let mut op = AsyncOperation::<u8>::new();
        let a = op.submit();
        op.complete(a, Ok(1));
        op.reset_instance();
        assert!(op.last_success().is_none());
        assert!(!op.complete(a, Ok(9)));
        assert_eq!(op.submit(), InvocationId(2));
    }
}
