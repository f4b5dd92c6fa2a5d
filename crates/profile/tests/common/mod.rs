//! Shared test fixtures: an in-memory transport and document builders.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mcprofile::{ClientConfig, Endpoint, ProfileClient, Transport, TransportError};
use serde_json::{json, Value};

pub const NERGALIC_ID: &str = "087cc153c3434ff7ac497de1569affa1";
pub const ALEX_ID: &str = "cabefc91b5df4c87886a6c604da2e46f";

/// One recorded transport call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: Endpoint,
    pub payload: Option<Vec<String>>,
}

/// Scripted transport. Unscripted endpoints answer 404.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<Endpoint, Result<Value, TransportError>>>,
    calls: Mutex<Vec<Call>>,
    delay: Option<Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn respond(&self, endpoint: Endpoint, response: Result<Value, TransportError>) {
        self.responses.lock().unwrap().insert(endpoint, response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn answer(&self, endpoint: &Endpoint, payload: Option<&[String]>) -> Result<Value, TransportError> {
        self.calls.lock().unwrap().push(Call {
            endpoint: endpoint.clone(),
            payload: payload.map(<[String]>::to_vec),
        });
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or(Err(TransportError::status(404)))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, endpoint: &Endpoint) -> Result<Value, TransportError> {
        self.answer(endpoint, None).await
    }

    async fn exchange(
        &self,
        endpoint: &Endpoint,
        payload: &[String],
    ) -> Result<Value, TransportError> {
        self.answer(endpoint, Some(payload)).await
    }
}

pub fn client(transport: &Arc<MockTransport>) -> ProfileClient {
    ProfileClient::with_transport(transport.clone(), &ClientConfig::default())
}

pub fn by_name(name: &str) -> Endpoint {
    Endpoint::ProfileByName {
        name: name.to_string(),
    }
}

pub fn history(id: &str) -> Endpoint {
    Endpoint::NameHistory { id: id.to_string() }
}

pub fn session(id: &str) -> Endpoint {
    Endpoint::SessionProfile { id: id.to_string() }
}

/// Session profile document whose textures property encodes `textures`.
pub fn session_doc(id: &str, name: &str, textures: Value) -> Value {
    json!({
        "id": id,
        "name": name,
        "properties": [{
            "name": "textures",
            "value": STANDARD.encode(textures.to_string()),
            "signature": "c2lnbmF0dXJl"
        }]
    })
}
