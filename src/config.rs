// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Service-wide configuration shared by every client.

use crate::error::{Error, Result};
use crate::query::Query;
use std::time::Duration;

/// Base URL of the web service.
pub const ENTRY_POINT: &str = "https://api.xmltime.com";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_RETURN_FORMAT: &str = "xml";
/// Ask for verbose `<datetime>` children alongside every ISO stamp.
pub const DEFAULT_VERBOSE_TIME: u8 = 1;
pub const API_VERSION: u32 = 3;
/// Language sentinel requesting every available translation.
pub const ALL_LANGUAGES: &str = "_all_";

/// Entry point, languages and HTTP settings used by a service client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    entry_point: String,
    languages: Vec<String>,
    version: u32,
    user_agent: String,
    timeout: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            entry_point: ENTRY_POINT.to_owned(),
            languages: vec![DEFAULT_LANGUAGE.to_owned()],
            version: API_VERSION,
            user_agent: concat!("tad-api-rs/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout: None,
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ── builder ───────────────────────────────────────────────────────

    /// Override the base URL, e.g. to target a mock server.
    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = entry_point.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages = vec![language.into()];
        self
    }

    /// Preferred languages in order.  Texts fall back along the list.
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Request every translation, with `primary` used for untranslated
    /// texts.
    pub fn with_all_languages(self, primary: impl Into<String>) -> Self {
        let primary = primary.into();
        self.with_languages([primary, ALL_LANGUAGES.to_owned()])
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    // ── accessors ─────────────────────────────────────────────────────

    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Add `lang`, `out`, `verbosetime` and `version` to `query`.
    pub(crate) fn apply_common(&self, query: &mut Query) -> Result<()> {
        match self.languages.first() {
            None => return Err(Error::invalid_argument("at least one language is required")),
            Some(first) if first == ALL_LANGUAGES => {
                return Err(Error::invalid_argument(
                    "'_all_' cannot be the first language",
                ))
            }
            Some(_) => {}
        }
        if self.languages.iter().any(String::is_empty) {
            return Err(Error::invalid_argument("language codes cannot be empty"));
        }

        query
            .set("lang", self.languages.join(","))
            .set("out", DEFAULT_RETURN_FORMAT)
            .set("verbosetime", DEFAULT_VERBOSE_TIME)
            .set("version", self.version);
        Ok(())
    }
}
