//! Request dispatcher for the Cloze API.
//!
//! # Design
//! `ClozeClient` owns an immutable configuration and a transport, both behind
//! `Arc`, so clones are cheap and every resource module borrows the same
//! instance. A call is split the same way on every path:
//!
//! 1. `build_request` turns (method, path, query, body) into an `HttpRequest`
//!    without touching the network. Encoding failures stop here.
//! 2. The transport executes it exactly once. No retries, no caching.
//! 3. `parse_response` turns the `HttpResponse` into a JSON value or an
//!    `ApiError`.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::endpoint::{Endpoint, Payload};
use crate::error::{ApiError, ClozeError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::params::{encode_query, Params};
use crate::resources::{Account, Analytics, Records, Team, Timeline, COMPANIES, PEOPLE, PROJECTS};
use crate::transport::{Transport, UreqTransport};

/// Blocking client for the Cloze REST API.
///
/// Safe to share across threads; it holds no per-call state.
#[derive(Clone)]
pub struct ClozeClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn Transport>,
}

impl ClozeClient {
    /// Client with default settings and the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Client configured from `CLOZE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = UreqTransport::new(config.timeout).with_body_limit(config.max_response_bytes);
        Self::with_transport(config, transport)
    }

    /// Client that sends every request through `transport`.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics::new(self)
    }

    pub fn companies(&self) -> Records<'_> {
        Records::new(self, &COMPANIES)
    }

    pub fn team(&self) -> Team<'_> {
        Team::new(self)
    }

    pub fn timeline(&self) -> Timeline<'_> {
        Timeline::new(self)
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(self)
    }

    pub fn projects(&self) -> Records<'_> {
        Records::new(self, &PROJECTS)
    }

    pub fn people(&self) -> Records<'_> {
        Records::new(self, &PEOPLE)
    }

    /// Dispatch `params` to `endpoint`, routed to the query string or the
    /// body according to the endpoint's payload kind.
    pub fn call(&self, endpoint: &Endpoint, params: Option<Params>) -> Result<Value> {
        match endpoint.payload {
            Payload::None => {
                if params.as_ref().is_some_and(|p| !p.is_empty()) {
                    return Err(ClozeError::Encoding(format!(
                        "{} takes no parameters",
                        endpoint.name
                    )));
                }
                self.make_request(endpoint.method, endpoint.path, None, None)
            }
            Payload::Query => self.make_request(endpoint.method, endpoint.path, params.as_ref(), None),
            Payload::Body => {
                let body = Value::Object(params.unwrap_or_default());
                self.make_request(endpoint.method, endpoint.path, None, Some(&body))
            }
        }
    }

    /// Send one request and decode the response.
    pub fn make_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<Value> {
        let request = self.build_request(method, path, query, body)?;

        tracing::debug!(
            method = %request.method,
            url = %request.url,
            query_pairs = request.query.len(),
            has_body = request.body.is_some(),
            "dispatching Cloze request"
        );

        let response = self.transport.execute(&request).inspect_err(|err| {
            tracing::warn!(method = %method, path, error = %err, "Cloze request failed before a response");
        })?;

        tracing::debug!(status = response.status, path, "Cloze response received");

        self.parse_response(response).inspect_err(|err| {
            if let ClozeError::Api(api) = err {
                tracing::warn!(
                    status = api.status,
                    errorcode = ?api.errorcode,
                    path,
                    "Cloze API error: {}",
                    api.message
                );
            }
        })
    }

    /// Build the request for `method` and `path` without sending it.
    pub fn build_request(
        &self,
        method: HttpMethod,
        path: &str,
        query: Option<&Params>,
        body: Option<&Value>,
    ) -> Result<HttpRequest> {
        if !path.starts_with('/') {
            return Err(ClozeError::Encoding(format!("path must start with '/', got '{path}'")));
        }

        let query = match query {
            Some(params) => encode_query(params)?,
            None => Vec::new(),
        };

        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {}", self.config.api_key)),
            ("Accept".to_string(), "application/json".to_string()),
            ("User-Agent".to_string(), self.config.user_agent.clone()),
        ];

        let body = match body {
            Some(value) => {
                let encoded = serde_json::to_string(value).map_err(|e| ClozeError::Encoding(e.to_string()))?;
                headers.push(("Content-Type".to_string(), "application/json".to_string()));
                Some(encoded)
            }
            None => None,
        };

        Ok(HttpRequest {
            method,
            url: format!("{}{}", self.config.base_url, path),
            query,
            headers,
            body,
        })
    }

    /// Decode a response into a JSON value, or the `ApiError` it reports.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        if !response.is_success() {
            return Err(api_error(&response).into());
        }

        let value = if response.body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&response.body).map_err(|e| ClozeError::Decoding(e.to_string()))?
        };

        // Cloze reports application failures in a 2xx body.
        if let Some(code) = payload_errorcode(&value).filter(|code| *code != 0) {
            return Err(ApiError {
                status: response.status,
                errorcode: Some(code),
                message: payload_message(&value).unwrap_or_else(|| format!("errorcode {code}")),
                payload: Some(value),
            }
            .into());
        }

        Ok(value)
    }
}

impl std::fmt::Debug for ClozeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClozeClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn api_error(response: &HttpResponse) -> ApiError {
    let payload: Option<Value> = serde_json::from_str(&response.body).ok();
    let raw = response.body.trim();

    let message = payload
        .as_ref()
        .and_then(payload_message)
        .or_else(|| (!raw.is_empty()).then(|| raw.to_string()))
        .unwrap_or_else(|| {
            ureq::http::StatusCode::from_u16(response.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("unknown status")
                .to_string()
        });

    ApiError {
        status: response.status,
        errorcode: payload.as_ref().and_then(payload_errorcode),
        message,
        payload,
    }
}

fn payload_errorcode(value: &Value) -> Option<i64> {
    value.get("errorcode").and_then(Value::as_i64)
}

fn payload_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
