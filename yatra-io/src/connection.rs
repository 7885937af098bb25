//! Hardware connection resolution.
//!
//! The transport itself (serial link, radio bridge) lives outside this
//! crate; here we only resolve the caller's intent into a concrete
//! session handle, once, at construction time.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default session name used when the caller does not specify one.
pub const DEFAULT_SESSION: &str = "rover0";

/// Opaque identifier of an established hardware session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    name: String,
}

impl Handle {
    /// Wrap a session name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Session name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// How the caller wants the hardware session established.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConnectionSpec {
    /// No preference: connect to the default session.
    #[default]
    Unset,
    /// Connect to a session by name.
    Named(String),
    /// Reuse a session established elsewhere.
    Existing(Handle),
}

impl ConnectionSpec {
    /// Resolve the spec into a concrete handle.
    ///
    /// # Errors
    /// [`Error::InitializationFailed`] for an empty session name; an
    /// unusable handle must abort startup rather than surface later.
    pub fn resolve(self) -> Result<Handle> {
        match self {
            ConnectionSpec::Unset => Ok(Handle::new(DEFAULT_SESSION)),
            ConnectionSpec::Named(name) => {
                if name.is_empty() {
                    return Err(Error::InitializationFailed(
                        "empty session name".to_string(),
                    ));
                }
                Ok(Handle::new(name))
            }
            ConnectionSpec::Existing(handle) => Ok(handle),
        }
    }
}
