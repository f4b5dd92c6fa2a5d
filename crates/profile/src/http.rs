//! HTTP transport for the Mojang account and session services

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{TransportError, NO_CONTENT_STATUS};
use crate::transport::{Endpoint, Transport};

/// [`Transport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    api_base: Url,
    session_base: Url,
}

impl HttpTransport {
    /// Create a new transport from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(map_reqwest_error)?;

        Ok(Self {
            client,
            api_base: parse_base(&config.api_base)?,
            session_base: parse_base(&config.session_base)?,
        })
    }

    /// Render the URL an endpoint is served from.
    ///
    /// Names and identifiers become single percent-encoded path segments, so
    /// reserved characters never reach the query or a neighbouring route. A
    /// `.` or `..` segment cannot be sent intact and no profile carries one,
    /// so it is answered as "no content" without a request.
    pub fn url(&self, endpoint: &Endpoint) -> Result<Url, TransportError> {
        match endpoint {
            Endpoint::ProfileByName { name } => {
                join(&self.api_base, &["users", "profiles", "minecraft", name.as_str()])
            }
            Endpoint::ProfileByNameAt { name, at } => {
                let segments = ["users", "profiles", "minecraft", name.as_str()];
                let mut url = join(&self.api_base, &segments)?;
                url.query_pairs_mut()
                    .append_pair("at", &at.timestamp().to_string());
                Ok(url)
            }
            Endpoint::NameHistory { id } => {
                join(&self.api_base, &["user", "profiles", id.as_str(), "names"])
            }
            Endpoint::SessionProfile { id } => {
                join(&self.session_base, &["session", "minecraft", "profile", id.as_str()])
            }
            Endpoint::ProfilesByNames => join(&self.api_base, &["profiles", "minecraft"]),
        }
    }

    async fn handle_response(&self, response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if status == StatusCode::OK {
            let doc: Value = serde_json::from_slice(&body)
                .map_err(|e| TransportError::Decode(e.to_string()))?;
            // The service sometimes reports errors with a 200 status
            match service_error(status.as_u16(), &doc) {
                Some(err) => Err(err),
                None => Ok(doc),
            }
        } else {
            // Error bodies are optional and not always JSON
            let err = serde_json::from_slice::<Value>(&body)
                .ok()
                .and_then(|doc| service_error(status.as_u16(), &doc))
                .unwrap_or_else(|| TransportError::status(status.as_u16()));
            Err(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, TransportError> {
        let url = self.url(endpoint)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.handle_response(response).await
    }

    async fn exchange(
        &self,
        endpoint: &Endpoint,
        payload: &[String],
    ) -> Result<Value, TransportError> {
        let url = self.url(endpoint)?;
        debug!(%url, entries = payload.len(), "POST");
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        self.handle_response(response).await
    }
}

fn parse_base(base: &str) -> Result<Url, TransportError> {
    let url = Url::parse(base)
        .map_err(|e| TransportError::Network(format!("invalid base URL {base}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(TransportError::Network(format!(
            "invalid base URL {base}: not a hierarchical URL"
        )));
    }
    Ok(url)
}

fn join(base: &Url, segments: &[&str]) -> Result<Url, TransportError> {
    if segments.iter().any(|s| matches!(*s, "." | "..")) {
        return Err(TransportError::status(NO_CONTENT_STATUS));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| TransportError::Network(format!("invalid base URL {base}")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Extracts a `{"error": ..., "errorMessage": ...}` service error document.
fn service_error(status: u16, doc: &Value) -> Option<TransportError> {
    let code = doc.get("error")?.as_str()?;
    let message = doc.get("errorMessage").and_then(Value::as_str);
    Some(TransportError::Status {
        status,
        error_code: Some(code.to_string()),
        error_message: message.map(str::to_string),
    })
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use serde_json::json;

    fn transport() -> HttpTransport {
        HttpTransport::new(&ClientConfig::default()).unwrap()
    }

    fn url(t: &HttpTransport, endpoint: Endpoint) -> String {
        t.url(&endpoint).unwrap().to_string()
    }

    #[test]
    fn test_urls() {
        let t = transport();
        assert_eq!(
            url(&t, Endpoint::ProfileByName {
                name: "Nergalic".into()
            }),
            "https://api.mojang.com/users/profiles/minecraft/Nergalic"
        );
        assert_eq!(
            url(&t, Endpoint::ProfileByNameAt {
                name: "Nergalic".into(),
                at: DateTime::from_timestamp(1_400_000_000, 0).unwrap(),
            }),
            "https://api.mojang.com/users/profiles/minecraft/Nergalic?at=1400000000"
        );
        assert_eq!(
            url(&t, Endpoint::NameHistory {
                id: "087cc153c3434ff7ac497de1569affa1".into()
            }),
            "https://api.mojang.com/user/profiles/087cc153c3434ff7ac497de1569affa1/names"
        );
        assert_eq!(
            url(&t, Endpoint::SessionProfile {
                id: "087cc153c3434ff7ac497de1569affa1".into()
            }),
            "https://sessionserver.mojang.com/session/minecraft/profile/087cc153c3434ff7ac497de1569affa1"
        );
        assert_eq!(
            url(&t, Endpoint::ProfilesByNames),
            "https://api.mojang.com/profiles/minecraft"
        );
    }

    #[test]
    fn test_base_normalization() {
        let t = HttpTransport::new(&ClientConfig::default().with_base_url("http://localhost:9/"))
            .unwrap();
        assert_eq!(
            url(&t, Endpoint::ProfilesByNames),
            "http://localhost:9/profiles/minecraft"
        );
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let t = transport();
        assert_eq!(
            url(&t, Endpoint::ProfileByName {
                name: "Notch?at=0".into()
            }),
            "https://api.mojang.com/users/profiles/minecraft/Notch%3Fat=0"
        );
        assert_eq!(
            url(&t, Endpoint::ProfileByNameAt {
                name: "a/b#c".into(),
                at: DateTime::from_timestamp(5, 0).unwrap(),
            }),
            "https://api.mojang.com/users/profiles/minecraft/a%2Fb%23c?at=5"
        );
        assert_eq!(
            url(&t, Endpoint::NameHistory {
                id: "x/../names".into()
            }),
            "https://api.mojang.com/user/profiles/x%2F..%2Fnames/names"
        );
    }

    #[test]
    fn test_dot_segments_are_no_content() {
        let t = transport();
        for name in [".", ".."] {
            assert_eq!(
                t.url(&Endpoint::ProfileByName { name: name.into() }),
                Err(TransportError::status(204))
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(
            HttpTransport::new(&config),
            Err(TransportError::Network(_))
        ));
    }

    #[test]
    fn test_service_error_extraction() {
        let doc = json!({
            "error": "TooManyRequestsException",
            "errorMessage": "The client has sent too many requests within a certain amount of time"
        });
        match service_error(429, &doc) {
            Some(TransportError::Status {
                status,
                error_code,
                error_message,
            }) => {
                assert_eq!(status, 429);
                assert_eq!(error_code.as_deref(), Some("TooManyRequestsException"));
                assert!(error_message.is_some());
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(service_error(200, &json!({ "id": "x", "name": "y" })).is_none());
        assert!(service_error(200, &json!([{ "error": "x" }])).is_none());
    }
}
