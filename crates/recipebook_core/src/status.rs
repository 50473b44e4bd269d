//! Per-request state for list queries and mutations, plus the terminal
//! placeholder texts callers display while a request is in flight or failed.
//!
//! # Invariants
//! - A mutation reaches `Ready` only when its refetch of both partitions
//!   succeeded; a refetch failure lands in `RefetchFailed` with the
//!   mutation payload preserved.
//! - States are terminal per request: nothing here retries.

use crate::client::{ClientResult, MutationOutcome};

/// What kind of request a state tracks; selects the placeholder wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Query,
    Mutation,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState<T> {
    #[default]
    Idle,
    Pending,
    Ready(T),
    Failed(String),
    /// The mutation succeeded but the follow-up refetch did not.
    RefetchFailed { data: T, message: String },
}

impl<T> RequestState<T> {
    pub fn begin(&mut self) {
        *self = Self::Pending;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn settle_query(&mut self, result: ClientResult<T>) {
        *self = match result {
            Ok(data) => Self::Ready(data),
            Err(err) => Self::Failed(err.to_string()),
        };
    }

    pub fn settle_mutation(&mut self, result: ClientResult<MutationOutcome<T>>) {
        *self = match result {
            Ok(MutationOutcome {
                data,
                refetch: Ok(_),
            }) => Self::Ready(data),
            Ok(MutationOutcome {
                data,
                refetch: Err(err),
            }) => Self::RefetchFailed {
                data,
                message: err.to_string(),
            },
            Err(err) => Self::Failed(err.to_string()),
        };
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready(data) | Self::RefetchFailed { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Text shown instead of content, `None` when content can be shown.
    pub fn placeholder(&self, kind: RequestKind) -> Option<String> {
        match (self, kind) {
            (Self::Pending, RequestKind::Query) => Some("Loading...".to_string()),
            (Self::Pending, RequestKind::Mutation) => Some("Submitting...".to_string()),
            (Self::Failed(message), RequestKind::Query) => Some(format!("Error : {message}")),
            (Self::Failed(message), RequestKind::Mutation) => {
                Some(format!("Submission error! {message}"))
            }
            (Self::RefetchFailed { message, .. }, _) => Some(format!("Error : {message}")),
            (Self::Idle, _) | (Self::Ready(_), _) => None,
        }
    }
}
