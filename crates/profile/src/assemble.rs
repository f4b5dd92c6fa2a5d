//! Turns service documents into [`Profile`]s.
//!
//! Two policies apply to every profile document before anything else is
//! trusted:
//! - demo accounts are reported as nonexistent
//! - legacy accounts cannot rename, so their history is known to be empty

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ProfileError, ProfileResult};
use crate::history::NameHistory;
use crate::profile::Profile;
use crate::textures::{Properties, RawProperty};

#[derive(Debug, Deserialize)]
struct ProfileDocument {
    id: String,
    name: String,
    #[serde(skip)]
    legacy: bool,
    #[serde(default)]
    properties: Option<Vec<RawProperty>>,
}

/// Demo (unpurchased) accounts are indistinguishable from missing ones.
fn is_demo(doc: &Value) -> ProfileResult<bool> {
    flag(doc, "demo")
}

/// Legacy accounts never migrated and cannot have changed name.
fn is_legacy(doc: &Value) -> ProfileResult<bool> {
    flag(doc, "legacy")
}

fn flag(doc: &Value, key: &str) -> ProfileResult<bool> {
    match doc.get(key) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(set)) => Ok(*set),
        Some(other) => Err(ProfileError::parse(
            "profile",
            format!("{key} must be a boolean, got {other}"),
        )),
    }
}

fn parse_document(doc: Value) -> ProfileResult<ProfileDocument> {
    if is_demo(&doc)? {
        return Err(ProfileError::NoSuchProfile);
    }

    let legacy = is_legacy(&doc)?;
    let mut doc: ProfileDocument =
        serde_json::from_value(doc).map_err(|e| ProfileError::parse("profile", e))?;
    doc.legacy = legacy;
    if doc.id.is_empty() || doc.name.is_empty() {
        return Err(ProfileError::parse("profile", "empty id or name"));
    }
    Ok(doc)
}

fn build(doc: ProfileDocument) -> (Profile, Option<Vec<RawProperty>>) {
    let mut profile = Profile::new(doc.id, doc.name);
    if doc.legacy {
        profile = profile.with_history(Vec::new());
    }
    (profile, doc.properties)
}

/// Builds a profile from a `{id, name, legacy?, demo?}` document.
pub(crate) fn profile(doc: Value) -> ProfileResult<Profile> {
    parse_document(doc).map(|doc| build(doc).0)
}

/// Builds a profile from a session document, decoding its properties.
///
/// A corrupt texture attachment fails the whole profile.
pub(crate) fn profile_with_properties(doc: Value) -> ProfileResult<Profile> {
    let (profile, raw) = build(parse_document(doc)?);
    let properties = decode_properties(profile.id(), raw)?;
    Ok(profile.with_properties(properties))
}

/// Decodes only the properties of a session document.
pub(crate) fn properties(doc: Value) -> ProfileResult<Properties> {
    let doc = parse_document(doc)?;
    decode_properties(&doc.id, doc.properties)
}

fn decode_properties(id: &str, raw: Option<Vec<RawProperty>>) -> ProfileResult<Properties> {
    let raw = raw.ok_or_else(|| ProfileError::parse("session profile", "missing properties"))?;
    Properties::from_property_list(id, &raw)
}

/// Builds a profile from its identifier and the name change log.
pub(crate) fn profile_from_history(id: &str, doc: Value) -> ProfileResult<Profile> {
    let history = NameHistory::from_document(doc)?;
    if history.current.is_empty() {
        return Err(ProfileError::NoSuchProfile);
    }
    Ok(Profile::new(id.to_string(), history.current).with_history(history.past))
}

/// Builds the profiles of a batch lookup, leaving out demo accounts.
///
/// Any other failing entry fails the whole batch.
pub(crate) fn profiles(doc: Value) -> ProfileResult<Vec<Profile>> {
    let entries = match doc {
        Value::Array(entries) => entries,
        other => {
            return Err(ProfileError::parse(
                "profile batch",
                format!("expected array, got {other}"),
            ))
        }
    };

    let mut profiles = Vec::with_capacity(entries.len());
    for entry in entries {
        match profile(entry) {
            Ok(profile) => profiles.push(profile),
            Err(ProfileError::NoSuchProfile) => {
                debug!("skipping demo profile in batch");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(profiles)
}
