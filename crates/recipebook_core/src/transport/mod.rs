//! Network seam between the client and a GraphQL server.
//!
//! # Responsibility
//! - Define the `GraphqlTransport` contract used for server-bound operations.
//! - Provide the blocking HTTP transport and an in-process fake server.
//!
//! # Invariants
//! - Transports never see `@client` fields; the client strips them first.
//! - A response with a non-empty `errors` array is a failure, even when
//!   `data` is present.

use crate::graphql::{GraphqlError, GraphqlRequest, GraphqlResponse};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod memory;

pub use http::HttpTransport;
pub use memory::InMemoryRecipeServer;

pub type TransportResult<T> = Result<T, TransportError>;

/// Failures while talking to the server or decoding its answer.
#[derive(Debug)]
pub enum TransportError {
    InvalidEndpoint(String),
    Http(reqwest::Error),
    Status { status: u16, body: String },
    /// Server unreachable; raised by test doubles simulating an outage.
    Unavailable(String),
    Graphql(Vec<GraphqlError>),
    MissingData { operation: String },
    Decode { operation: String, message: String },
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidEndpoint(value) => write!(f, "invalid GraphQL endpoint `{value}`"),
            Self::Http(err) => write!(f, "{err}"),
            Self::Status { status, body } => {
                write!(f, "server responded with status {status}: {body}")
            }
            Self::Unavailable(message) => write!(f, "server unavailable: {message}"),
            Self::Graphql(errors) => {
                let messages = errors
                    .iter()
                    .map(|err| err.message.as_str())
                    .collect::<Vec<_>>();
                write!(f, "{}", messages.join("; "))
            }
            Self::MissingData { operation } => {
                write!(f, "response to `{operation}` carried no data")
            }
            Self::Decode { operation, message } => {
                write!(f, "failed to decode `{operation}` response: {message}")
            }
        }
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}

/// Executes server-bound GraphQL requests.
pub trait GraphqlTransport {
    fn execute(&self, request: &GraphqlRequest) -> TransportResult<GraphqlResponse>;
}

impl<T: GraphqlTransport + ?Sized> GraphqlTransport for &T {
    fn execute(&self, request: &GraphqlRequest) -> TransportResult<GraphqlResponse> {
        (**self).execute(request)
    }
}

impl GraphqlResponse {
    /// Unwraps `data`, turning GraphQL-level errors into transport errors.
    pub fn into_data(self, operation: &str) -> TransportResult<Value> {
        if !self.errors.is_empty() {
            return Err(TransportError::Graphql(self.errors));
        }
        self.data.ok_or_else(|| TransportError::MissingData {
            operation: operation.to_string(),
        })
    }
}
