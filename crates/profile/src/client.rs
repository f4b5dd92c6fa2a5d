//! Caller-facing profile operations

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::assemble;
use crate::config::ClientConfig;
use crate::error::{classify, ProfileError, ProfileResult, TransportError};
use crate::history::NameHistory;
use crate::http::HttpTransport;
use crate::profile::Profile;
use crate::textures::Properties;
use crate::transport::{Endpoint, Transport};

/// Maximum number of names [`ProfileClient::load_many`] accepts at once.
pub const LOAD_MANY_MAX_SIZE: usize = 100;

/// Loads profiles through a [`Transport`].
///
/// Every operation issues exactly one request. Requests are bounded by the
/// configured timeout and, if set, by a cancellation signal. Rate limits are
/// reported, never retried.
#[derive(Clone)]
pub struct ProfileClient {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    cancel: Option<watch::Receiver<bool>>,
}

impl std::fmt::Debug for ProfileClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileClient")
            .field("timeout", &self.timeout)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

impl ProfileClient {
    /// Client talking HTTP to the services named in `config`.
    pub fn new(config: &ClientConfig) -> ProfileResult<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config).map_err(ProfileError::Transport)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, config: &ClientConfig) -> Self {
        Self {
            transport,
            timeout: config.timeout(),
            cancel: None,
        }
    }

    /// Aborts in-flight and future requests once `signal` reads `true`.
    ///
    /// Cancelled requests fail with [`TransportError::Cancelled`]; profiles
    /// returned earlier are left untouched.
    pub fn with_cancellation(mut self, signal: watch::Receiver<bool>) -> Self {
        self.cancel = Some(signal);
        self
    }

    /// Loads the profile currently owning `name`.
    pub async fn load_by_name(&self, name: &str) -> ProfileResult<Profile> {
        if is_blank(name) {
            return Err(ProfileError::NoSuchProfile);
        }
        let doc = self
            .fetch(Endpoint::ProfileByName {
                name: name.to_string(),
            })
            .await?;
        assemble::profile(doc)
    }

    /// Loads the profile that owned `name` at instant `at`.
    pub async fn load_by_name_at(&self, name: &str, at: DateTime<Utc>) -> ProfileResult<Profile> {
        if is_blank(name) {
            return Err(ProfileError::NoSuchProfile);
        }
        let doc = self
            .fetch(Endpoint::ProfileByNameAt {
                name: name.to_string(),
                at,
            })
            .await?;
        assemble::profile(doc)
    }

    /// Loads the profile identified by `id`, including its name history.
    pub async fn load_by_id(&self, id: &str) -> ProfileResult<Profile> {
        if is_blank(id) {
            return Err(ProfileError::NoSuchProfile);
        }
        let doc = self.fetch(Endpoint::NameHistory { id: id.to_string() }).await?;
        assemble::profile_from_history(id, doc)
    }

    /// Same as [`ProfileClient::load_by_id`].
    pub async fn load_with_name_history(&self, id: &str) -> ProfileResult<Profile> {
        self.load_by_id(id).await
    }

    /// Loads the profile identified by `id` with its properties decoded.
    ///
    /// The session service allows this about once a minute per profile.
    pub async fn load_with_properties(&self, id: &str) -> ProfileResult<Profile> {
        if is_blank(id) {
            return Err(ProfileError::NoSuchProfile);
        }
        let doc = self
            .fetch(Endpoint::SessionProfile { id: id.to_string() })
            .await?;
        assemble::profile_with_properties(doc)
    }

    /// Loads the profiles currently owning `names` in one request.
    ///
    /// Names without a profile, and demo accounts, are absent from the result.
    /// Blank names are dropped before sending. More than
    /// [`LOAD_MANY_MAX_SIZE`] names fail without contacting the service.
    pub async fn load_many<S: AsRef<str>>(&self, names: &[S]) -> ProfileResult<Vec<Profile>> {
        if names.len() > LOAD_MANY_MAX_SIZE {
            return Err(ProfileError::TooManyRequested(names.len()));
        }

        let payload: Vec<String> = names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !is_blank(name))
            .map(str::to_string)
            .collect();
        if payload.is_empty() {
            return Ok(Vec::new());
        }

        let endpoint = Endpoint::ProfilesByNames;
        let doc = self
            .call(&endpoint, self.transport.exchange(&endpoint, &payload))
            .await?;
        assemble::profiles(doc)
    }

    pub(crate) async fn fetch_name_history(&self, id: &str) -> ProfileResult<NameHistory> {
        let doc = self.fetch(Endpoint::NameHistory { id: id.to_string() }).await?;
        NameHistory::from_document(doc)
    }

    pub(crate) async fn fetch_properties(&self, id: &str) -> ProfileResult<Properties> {
        let doc = self
            .fetch(Endpoint::SessionProfile { id: id.to_string() })
            .await?;
        assemble::properties(doc)
    }

    async fn fetch(&self, endpoint: Endpoint) -> ProfileResult<Value> {
        self.call(&endpoint, self.transport.fetch(&endpoint)).await
    }

    async fn call<F>(&self, endpoint: &Endpoint, request: F) -> ProfileResult<Value>
    where
        F: Future<Output = Result<Value, TransportError>>,
    {
        debug!(%endpoint, "requesting");

        let bounded = async {
            tokio::time::timeout(self.timeout, request)
                .await
                .unwrap_or(Err(TransportError::Timeout))
        };

        let result = match self.cancel.clone() {
            Some(signal) => tokio::select! {
                biased;
                _ = cancelled(signal) => Err(TransportError::Cancelled),
                result = bounded => result,
            },
            None => bounded.await,
        };

        result.map_err(|err| {
            let err = classify(err);
            if err.is_rate_limited() {
                warn!(%endpoint, "rate limited");
            }
            err
        })
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Resolves once the signal reads `true`. A dropped sender never cancels.
async fn cancelled(mut signal: watch::Receiver<bool>) {
    let closed = signal.wait_for(|cancelled| *cancelled).await.is_err();
    if closed {
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }

    #[tokio::test]
    async fn test_cancelled_resolves_on_true() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(cancelled(rx));
        tx.send(true).unwrap();
        waiter.await.unwrap();
    }

    #[tokio::test]
    async fn test_cancelled_already_set() {
        let (_tx, rx) = watch::channel(true);
        cancelled(rx).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_sender_never_cancels() {
        let (tx, rx) = watch::channel(false);
        drop(tx);
        let outcome = tokio::time::timeout(Duration::from_secs(60), cancelled(rx)).await;
        assert!(outcome.is_err());
    }
}
