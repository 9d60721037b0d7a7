//! Observability port - lifecycle hooks the post service calls per operation.

use std::fmt;
use std::time::Duration;

use crate::error::Code;

/// The service operations that are observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreatePost,
    GetPost,
    ListPosts,
    UpdatePost,
    DeletePost,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::CreatePost,
        Operation::GetPost,
        Operation::ListPosts,
        Operation::UpdatePost,
        Operation::DeletePost,
    ];

    /// RPC method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::CreatePost => "CreatePost",
            Operation::GetPost => "GetPost",
            Operation::ListPosts => "ListPosts",
            Operation::UpdatePost => "UpdatePost",
            Operation::DeletePost => "DeletePost",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives operation lifecycle events from the post service.
///
/// Implementations must be cheap and must not fail; they run inline with
/// every request.
pub trait ServiceObserver: Send + Sync {
    /// An operation began.
    fn on_start(&self, _op: Operation) {}

    /// An operation finished successfully.
    fn on_success(&self, op: Operation, elapsed: Duration);

    /// An operation failed with the given caller-facing code.
    fn on_failure(&self, op: Operation, code: Code, elapsed: Duration);

    /// A post was stored.
    fn on_post_created(&self) {}

    /// The persistence port reported a storage failure.
    fn on_storage_failure(&self, _op: Operation) {}
}

/// Observer that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ServiceObserver for NoopObserver {
    fn on_success(&self, _op: Operation, _elapsed: Duration) {}

    fn on_failure(&self, _op: Operation, _code: Code, _elapsed: Duration) {}
}
