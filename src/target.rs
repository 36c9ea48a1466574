//! Host target data model: the `(host, port, user, password)` record produced
//! by every parser in this crate, and the caller-supplied defaults that fill
//! fields the text leaves out.
//!
//! Absent fields are `None`, never an empty string. Use
//! [`HostTarget::port_number`] when an integer port is needed; the parsers
//! keep the port exactly as written.
use std::fmt;

use serde::Serialize;

use crate::line::EntryError;

/// One remote connection target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HostTarget {
    pub host: String,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl HostTarget {
    /// Construct a target with only a host set.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            user: None,
            password: None,
        }
    }

    /// Fill every unset field from `defaults`. Fields already present are kept.
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        if self.port.is_none() {
            self.port = defaults.port.clone();
        }
        if self.user.is_none() {
            self.user = defaults.user.clone();
        }
        if self.password.is_none() {
            self.password = defaults.password.clone();
        }
    }

    /// Coerce the textual port into a TCP port number.
    pub fn port_number(&self) -> Result<Option<u16>, EntryError> {
        match &self.port {
            None => Ok(None),
            Some(p) => p
                .parse::<u16>()
                .map(Some)
                .map_err(|_| EntryError::InvalidPort {
                    host: self.host.clone(),
                    port: p.clone(),
                }),
        }
    }

    /// `host:port` when a port is known, otherwise just the host.
    pub fn address(&self) -> String {
        match &self.port {
            Some(port) => format!("{}:{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for HostTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(user) = &self.user {
            write!(f, "{}@", user)?;
        }
        write!(f, "{}", self.address())
    }
}

/// Caller-supplied values used when an entry does not name a field itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    pub user: Option<String>,
    pub port: Option<String>,
    pub password: Option<String>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}
