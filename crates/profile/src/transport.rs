//! Transport seam between the profile engine and the remote service.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::TransportError;

/// A request the profile engine needs answered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Profile currently owning `name`.
    ProfileByName { name: String },
    /// Profile that owned `name` at instant `at`.
    ProfileByNameAt { name: String, at: DateTime<Utc> },
    /// Name change log of a profile.
    NameHistory { id: String },
    /// Profile including its signed properties (textures).
    SessionProfile { id: String },
    /// Batch lookup of current names. The names travel as the payload.
    ProfilesByNames,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::ProfileByName { name } => write!(f, "profile by name {name}"),
            Endpoint::ProfileByNameAt { name, at } => {
                write!(f, "profile by name {name} at {}", at.timestamp())
            }
            Endpoint::NameHistory { id } => write!(f, "name history of {id}"),
            Endpoint::SessionProfile { id } => write!(f, "session profile of {id}"),
            Endpoint::ProfilesByNames => f.write_str("profiles by names"),
        }
    }
}

/// Single request/response JSON exchanges with the remote service.
///
/// Implementations report failures as structured [`TransportError`]s and leave
/// classification to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a request without payload and returns the decoded JSON body.
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, TransportError>;

    /// Sends `payload` as a JSON array and returns the decoded JSON body.
    async fn exchange(&self, endpoint: &Endpoint, payload: &[String])
        -> Result<Value, TransportError>;
}
