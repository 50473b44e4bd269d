//! Blocking HTTP transport: one JSON POST per operation.

use super::{GraphqlTransport, TransportError, TransportResult};
use crate::graphql::{GraphqlRequest, GraphqlResponse};
use log::{error, info};
use reqwest::blocking::Client;
use reqwest::Url;
use std::time::{Duration, Instant};

const MAX_ERROR_BODY_CHARS: usize = 200;

/// GraphQL-over-HTTP transport bound to one endpoint.
pub struct HttpTransport {
    endpoint: Url,
    client: Client,
}

impl HttpTransport {
    /// Builds a transport for `endpoint` with a per-request `timeout`.
    ///
    /// # Errors
    /// - `InvalidEndpoint` when `endpoint` is not an absolute http(s) URL.
    /// - `Http` when the underlying client cannot be constructed.
    pub fn new(endpoint: &str, timeout: Duration) -> TransportResult<Self> {
        let endpoint = Url::parse(endpoint.trim())
            .ok()
            .filter(|url| matches!(url.scheme(), "http" | "https"))
            .ok_or_else(|| TransportError::InvalidEndpoint(endpoint.to_string()))?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl GraphqlTransport for HttpTransport {
    fn execute(&self, request: &GraphqlRequest) -> TransportResult<GraphqlResponse> {
        let started_at = Instant::now();
        let operation = request.operation_name.as_deref().unwrap_or("anonymous");

        let result = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .map_err(TransportError::from)
            .and_then(|response| {
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().unwrap_or_default();
                    return Err(TransportError::Status {
                        status: status.as_u16(),
                        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                    });
                }
                response.json::<GraphqlResponse>().map_err(|err| {
                    TransportError::Decode {
                        operation: operation.to_string(),
                        message: err.to_string(),
                    }
                })
            });

        match &result {
            Ok(_) => info!(
                "event=graphql_request module=transport status=ok operation={operation} duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=graphql_request module=transport status=error operation={operation} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }
}
