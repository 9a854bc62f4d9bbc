// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Service clients, one per endpoint.
//!
//! Every client follows the same steps: validate the arguments, build the
//! signed query, perform one GET, check the envelope and map the payload.
//! Argument errors are raised before any network traffic.

use crate::auth::Credentials;
use crate::config::ServiceConfig;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::transport::{HttpTransport, Transport};
use crate::xml::{self, Element};
use std::fmt;
use std::sync::Arc;

/// Implement the constructors shared by every service client.
macro_rules! service_client {
    ($service:ident, $options:ident, $name:literal) => {
        impl $service {
            /// Client over HTTPS, configured from `config`.
            pub fn new(
                credentials: $crate::auth::Credentials,
                config: $crate::config::ServiceConfig,
            ) -> $crate::error::Result<Self> {
                Ok(Self {
                    core: $crate::services::ServiceCore::new($name, credentials, config)?,
                    options: $options::default(),
                })
            }

            /// Client over a caller-supplied transport.
            pub fn with_transport(
                credentials: $crate::auth::Credentials,
                config: $crate::config::ServiceConfig,
                transport: ::std::sync::Arc<dyn $crate::transport::Transport>,
            ) -> Self {
                Self {
                    core: $crate::services::ServiceCore::with_transport(
                        $name,
                        credentials,
                        config,
                        transport,
                    ),
                    options: $options::default(),
                }
            }

            pub fn with_options(mut self, options: $options) -> Self {
                self.options = options;
                self
            }

            pub fn options(&self) -> &$options {
                &self.options
            }

            pub fn options_mut(&mut self) -> &mut $options {
                &mut self.options
            }
        }
    };
}

mod astrodata;
mod astronomy;
mod business_date;
mod business_duration;
mod convert_time;
mod dst;
mod holidays;
mod places;
mod time;

pub use astrodata::{AstrodataOptions, AstrodataService};
pub use astronomy::{AstronomyOptions, AstronomyService};
pub use business_date::{BusinessDateOptions, BusinessDateService, Days};
pub use business_duration::{BusinessDurationOptions, BusinessDurationService};
pub use convert_time::{ConvertTimeOptions, ConvertTimeService, TimeInput};
pub use dst::{DstOptions, DstService};
pub use holidays::{HolidaysOptions, HolidaysService};
pub use places::{PlacesOptions, PlacesService};
pub use time::{TimeOptions, TimeService};

/// State shared by every service client.
#[derive(Clone)]
pub(crate) struct ServiceCore {
    name: &'static str,
    credentials: Credentials,
    config: ServiceConfig,
    transport: Arc<dyn Transport>,
}

impl ServiceCore {
    pub(crate) fn new(
        name: &'static str,
        credentials: Credentials,
        config: ServiceConfig,
    ) -> Result<Self> {
        let transport = Arc::new(HttpTransport::from_config(&config)?);
        Ok(Self::with_transport(name, credentials, config, transport))
    }

    pub(crate) fn with_transport(
        name: &'static str,
        credentials: Credentials,
        config: ServiceConfig,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            name,
            credentials,
            config,
            transport,
        }
    }

    /// Authentication and common parameters.
    pub(crate) fn base_query(&self) -> Result<Query> {
        let mut query = Query::new();
        self.credentials.sign(self.name)?.apply(&mut query);
        self.config.apply_common(&mut query)?;
        Ok(query)
    }

    /// GET `{entry_point}/{service}?{query}` and check the envelope.
    pub(crate) fn fetch(&self, query: &Query) -> Result<Element> {
        let base = format!("{}/{}", self.config.entry_point(), self.name);
        let logged = format!("{base}?{}", query.redacted());
        tracing::debug!(service = self.name, url = %logged, "sending request");
        let body = self
            .transport
            .get(&format!("{base}?{}", query.to_query_string()))?;
        xml::parse_response(&body)
    }
}

impl fmt::Debug for ServiceCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceCore")
            .field("name", &self.name)
            .field("credentials", &self.credentials)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// The container element holding a response's records.
pub(crate) fn container<'a>(root: &'a Element, name: &str) -> Result<&'a Element> {
    root.child(name)
        .ok_or_else(|| Error::malformed(format!("missing <{name}> element")))
}

pub(crate) fn require_id(id: &str, what: &str) -> Result<()> {
    if id.is_empty() {
        return Err(Error::invalid_argument(format!("{what} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport recording every requested URL.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    pub(crate) struct FakeTransport {
        body: String,
        urls: Mutex<Vec<String>>,
    }

    impl FakeTransport {
        pub(crate) fn new(body: &str) -> Arc<Self> {
            Arc::new(Self {
                body: body.to_owned(),
                urls: Mutex::new(Vec::new()),
            })
        }

        pub(crate) fn calls(&self) -> usize {
            self.urls.lock().unwrap().len()
        }

        /// Path and decoded parameters of the last request.
        pub(crate) fn last(&self) -> (String, HashMap<String, String>) {
            let urls = self.urls.lock().unwrap();
            let url = urls.last().expect("no request was sent");
            let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
            let params = url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect();
            (path.to_owned(), params)
        }
    }

    impl Transport for FakeTransport {
        fn get(&self, url: &str) -> Result<String> {
            self.urls.lock().unwrap().push(url.to_owned());
            Ok(self.body.clone())
        }
    }

    pub(crate) fn credentials() -> Credentials {
        Credentials::new("test-access", "test-secret")
    }

    pub(crate) fn config() -> ServiceConfig {
        ServiceConfig::new().with_entry_point("http://fake")
    }
}
