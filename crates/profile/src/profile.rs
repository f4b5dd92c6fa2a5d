//! The profile entity.

use std::fmt;

use chrono::{DateTime, Utc};
use tokio::sync::OnceCell;

use crate::client::ProfileClient;
use crate::error::ProfileResult;
use crate::history::{self, PastName};
use crate::textures::Properties;

/// Profile of a Minecraft account.
///
/// Name history and properties start out unknown unless the operation that
/// produced the profile already had them. Each can be filled in once through
/// [`Profile::load_name_history`] and [`Profile::load_properties`]; concurrent
/// callers share one load and never observe a partially written value.
#[derive(Debug)]
pub struct Profile {
    id: String,
    name: String,
    history: OnceCell<Vec<PastName>>,
    properties: OnceCell<Properties>,
}

impl Profile {
    pub(crate) fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            history: OnceCell::new(),
            properties: OnceCell::new(),
        }
    }

    pub(crate) fn with_history(mut self, past: Vec<PastName>) -> Self {
        self.history = OnceCell::new_with(Some(past));
        self
    }

    pub(crate) fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = OnceCell::new_with(Some(properties));
        self
    }

    /// Undashed identifier of the profile.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Case-corrected current name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prior names, most recent first, if already known.
    ///
    /// `Some(&[])` means the profile never changed its name; `None` means the
    /// history has not been loaded.
    pub fn name_history(&self) -> Option<&[PastName]> {
        self.history.get().map(Vec::as_slice)
    }

    /// Appearance, if already loaded.
    pub fn properties(&self) -> Option<&Properties> {
        self.properties.get()
    }

    /// Name the profile carried at `at`. `None` while the history is unknown.
    pub fn name_at(&self, at: DateTime<Utc>) -> Option<&str> {
        self.name_history()
            .map(|past| history::name_at(&self.name, past, at))
    }

    /// Returns the name history, fetching it on first use.
    pub async fn load_name_history(&self, client: &ProfileClient) -> ProfileResult<&[PastName]> {
        self.history
            .get_or_try_init(|| async {
                client
                    .fetch_name_history(&self.id)
                    .await
                    .map(|history| history.past)
            })
            .await
            .map(Vec::as_slice)
    }

    /// Returns the properties, fetching them on first use.
    ///
    /// The session service only serves the properties of a given profile about
    /// once a minute, so repeated calls reuse the first result.
    pub async fn load_properties(&self, client: &ProfileClient) -> ProfileResult<&Properties> {
        self.properties
            .get_or_try_init(|| client.fetch_properties(&self.id))
            .await
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
