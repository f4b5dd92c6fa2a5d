//! Name history reconstruction.
//!
//! The service reports name changes oldest first. Each event after the first
//! carries the instant the name took effect. Callers want the reverse: the
//! names a profile used to have, most recent first, each annotated with the
//! instant it stopped being current.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ProfileError, ProfileResult};

/// One entry of the service's name change log.
///
/// `changedToAt` is kept as raw JSON. It is only interpreted when the event
/// replaced an earlier name, so whatever the first event carries is never read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEvent {
    /// Name that took effect with this event
    pub name: String,
    /// Epoch milliseconds at which `name` became current. Absent for the original name.
    #[serde(rename = "changedToAt", default, skip_serializing_if = "Option::is_none")]
    pub changed_to_at: Option<Value>,
}

impl NameEvent {
    /// The name a profile was created with.
    pub fn original(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            changed_to_at: None,
        }
    }

    /// A rename that took effect at `changed_to_at` epoch milliseconds.
    pub fn changed(name: impl Into<String>, changed_to_at: i64) -> Self {
        Self {
            name: name.into(),
            changed_to_at: Some(Value::from(changed_to_at)),
        }
    }

    /// Instant this event took effect, if it carries one.
    ///
    /// Fractional milliseconds are truncated. A non-numeric value is a parse
    /// failure.
    pub fn changed_at(&self) -> ProfileResult<Option<DateTime<Utc>>> {
        let ms = match &self.changed_to_at {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(ms) => ms,
                None => float_millis(n.as_f64())?,
            },
            Some(other) => {
                return Err(ProfileError::parse(
                    "name history",
                    format!("changedToAt must be a number, got {other}"),
                ))
            }
        };
        millis_to_instant(ms).map(Some)
    }
}

fn float_millis(ms: Option<f64>) -> ProfileResult<i64> {
    match ms {
        Some(ms) if ms.is_finite() && ms >= i64::MIN as f64 && ms < i64::MAX as f64 => {
            Ok(ms.trunc() as i64)
        }
        _ => Err(ProfileError::parse(
            "name history",
            format!("instant {ms:?} out of range"),
        )),
    }
}

/// A name a profile used before its current one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PastName {
    /// Name as it was spelled while current
    pub name: String,
    /// When the next name took over.
    pub until: Option<DateTime<Utc>>,
}

impl fmt::Display for PastName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Current name plus prior names, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameHistory {
    /// Name in effect now. Empty only for an empty event log.
    pub current: String,
    /// Prior names, most recent first
    pub past: Vec<PastName>,
}

impl NameHistory {
    /// Decodes the service's JSON event array.
    pub fn from_document(doc: Value) -> ProfileResult<Self> {
        let events: Vec<NameEvent> =
            serde_json::from_value(doc).map_err(|e| ProfileError::parse("name history", e))?;
        Self::from_events(events)
    }

    /// Rebuilds the history from events ordered oldest first.
    ///
    /// Each past name takes its `until` from the event that replaced it. A
    /// `changedToAt` on the very first event has no predecessor and is dropped.
    pub fn from_events(events: Vec<NameEvent>) -> ProfileResult<Self> {
        let mut history = NameHistory {
            current: String::new(),
            past: Vec::with_capacity(events.len().saturating_sub(1)),
        };

        let mut events = events.into_iter().peekable();
        while let Some(event) = events.next() {
            match events.peek() {
                Some(next) => {
                    let until = next.changed_at()?;
                    history.past.push(PastName {
                        name: event.name,
                        until,
                    });
                }
                None => history.current = event.name,
            }
        }

        history.past.reverse();
        Ok(history)
    }
}

/// Name that was current at `at`, given the current name and past names most
/// recent first. Instants before the oldest recorded change resolve to the
/// original name.
pub fn name_at<'a>(current: &'a str, past: &'a [PastName], at: DateTime<Utc>) -> &'a str {
    past.iter()
        .rev()
        .find(|entry| entry.until.map_or(true, |until| at < until))
        .map_or(current, |entry| entry.name.as_str())
}

pub(crate) fn millis_to_instant(ms: i64) -> ProfileResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| ProfileError::parse("name history", format!("instant {ms} out of range")))
}
