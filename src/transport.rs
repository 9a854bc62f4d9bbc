// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Blocking HTTP transport.

use crate::config::ServiceConfig;
use crate::error::Result;
use oxhttp::model::header::ACCEPT;
use oxhttp::model::Request;
use std::io::{Error, ErrorKind};
use std::time::Duration;

/// Performs one GET and returns the response body.
///
/// Services hold a transport behind an `Arc`, so tests can substitute an
/// in-memory implementation.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> Result<String>;
}

/// [`Transport`] over `oxhttp` with rustls and the platform's root
/// certificates.
pub struct HttpTransport {
    client: oxhttp::Client,
}

impl HttpTransport {
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut client = oxhttp::Client::new()
            .with_redirection_limit(5)
            .with_user_agent(user_agent)
            .map_err(invalid_input_error)?;
        if let Some(timeout) = timeout {
            client = client.with_global_timeout(timeout);
        }
        Ok(Self { client })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        Self::new(config.user_agent(), config.timeout())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String> {
        let request = Request::builder()
            .uri(url)
            .header(ACCEPT, "application/xml")
            .body(())
            .map_err(invalid_input_error)?;
        let response = self.client.request(request)?;
        let status = response.status();
        let body = response.into_body().to_string()?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "received response");
        if !status.is_success() {
            return Err(Error::other(format!(
                "Error {status} returned by {} with payload:\n{body}",
                redact_url(url)
            ))
            .into());
        }
        Ok(body)
    }
}

fn invalid_input_error(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
    Error::new(ErrorKind::InvalidInput, error)
}

/// Drop the query string, which carries the credentials.
fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_query_string() {
        assert_eq!(
            redact_url("https://api.xmltime.com/places?accesskey=k&signature=s"),
            "https://api.xmltime.com/places"
        );
        assert_eq!(redact_url("http://localhost/places"), "http://localhost/places");
    }

    #[test]
    fn builds_with_timeout() {
        assert!(HttpTransport::new("tad-api-rs/test", Some(Duration::from_secs(5))).is_ok());
    }
}
