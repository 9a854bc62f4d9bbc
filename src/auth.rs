// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Request signing.
//!
//! Every request carries the access key, a UTC timestamp and
//! `base64(HMAC-SHA1(secret, access_key + service + timestamp))`.

use crate::error::{Error, Result};
use crate::query::Query;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::env;
use std::fmt;

type HmacSha1 = Hmac<Sha1>;

/// Environment variable holding the access key.
pub const ACCESS_KEY_VAR: &str = "TAD_ACCESS_KEY";
/// Environment variable holding the secret key.
pub const SECRET_KEY_VAR: &str = "TAD_SECRET_KEY";

/// An access key and its secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Read `TAD_ACCESS_KEY` and `TAD_SECRET_KEY`.
    pub fn from_env() -> Result<Self> {
        let read = |name: &str| {
            env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::invalid_argument(format!("{name} is not set")))
        };
        Ok(Self::new(read(ACCESS_KEY_VAR)?, read(SECRET_KEY_VAR)?))
    }

    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// Sign a request to `service` stamped with the current UTC time.
    pub fn sign(&self, service: &str) -> Result<Signature> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        self.sign_at(service, &timestamp)
    }

    /// Sign a request to `service` with a caller-chosen timestamp.
    pub fn sign_at(&self, service: &str, timestamp: &str) -> Result<Signature> {
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(Error::invalid_argument("access key and secret key are required"));
        }
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes())
            .map_err(|e| Error::invalid_argument(e.to_string()))?;
        mac.update(self.access_key.as_bytes());
        mac.update(service.as_bytes());
        mac.update(timestamp.as_bytes());
        let digest = mac.finalize().into_bytes();

        Ok(Signature {
            access_key: self.access_key.clone(),
            timestamp: timestamp.to_owned(),
            signature: base64::engine::general_purpose::STANDARD.encode(digest),
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"***")
            .finish()
    }
}

/// The three authentication parameters of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub access_key: String,
    pub timestamp: String,
    pub signature: String,
}

impl Signature {
    pub(crate) fn apply(&self, query: &mut Query) {
        query
            .set("accesskey", &self.access_key)
            .set("timestamp", &self.timestamp)
            .set("signature", &self.signature);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_signature() {
        let credentials = Credentials::new("access-key", "secret-key");
        let signature = credentials
            .sign_at("holidays", "2021-03-04T05:06:07.000000")
            .unwrap();
        assert_eq!(signature.signature, "8UN4hHBH0QIeSbwgmcw/9ipW0ZY=");
        assert_eq!(signature.access_key, "access-key");
        assert_eq!(signature.timestamp, "2021-03-04T05:06:07.000000");
    }

    #[test]
    fn signature_depends_on_service() {
        let credentials = Credentials::new("k", "s");
        let a = credentials.sign_at("holidays", "t").unwrap();
        let b = credentials.sign_at("astronomy", "t").unwrap();
        assert_ne!(a.signature, b.signature);
    }

    #[test]
    fn current_timestamp_shape() {
        let signature = Credentials::new("k", "s").sign("places").unwrap();
        // 2021-03-04T05:06:07.123456
        assert_eq!(signature.timestamp.len(), 26);
        assert_eq!(&signature.timestamp[10..11], "T");
    }

    #[test]
    fn missing_keys_are_rejected() {
        assert!(Credentials::new("", "s").sign("places").unwrap_err().is_validation());
    }

    #[test]
    fn applies_to_query() {
        let mut query = Query::new();
        Credentials::new("k", "s")
            .sign_at("places", "t")
            .unwrap()
            .apply(&mut query);
        assert_eq!(query.get("accesskey"), Some("k"));
        assert_eq!(query.get("timestamp"), Some("t"));
        assert!(query.contains("signature"));
    }

    #[test]
    fn debug_hides_secret() {
        let rendered = format!("{:?}", Credentials::new("visible", "hidden"));
        assert!(rendered.contains("visible"));
        assert!(!rendered.contains("hidden"));
    }
}
