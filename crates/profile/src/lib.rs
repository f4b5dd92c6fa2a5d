//! Minecraft profile lookup.
//!
//! Retrieves account profiles by name or identifier and reconstructs:
//! - the name history, most recent name first, with the instant each name
//!   stopped being current
//! - the appearance: skin URL, cape URL and body model, decoded from the
//!   base64 texture attachment of the session service
//!
//! Demo accounts are never returned; they are reported exactly like names
//! without a profile. The services are rate limited and nothing here caches,
//! so heavy users should cache results themselves.
//!
//! ```no_run
//! # async fn run() -> mcprofile::ProfileResult<()> {
//! use mcprofile::{ClientConfig, ProfileClient};
//!
//! let client = ProfileClient::new(&ClientConfig::default())?;
//! let profile = client.load_by_name("nergalic").await?;
//! let history = profile.load_name_history(&client).await?;
//! let properties = profile.load_properties(&client).await?;
//!
//! println!("{} ({}) was {:?}", profile.name(), profile.id(), history);
//! println!("model {} skin {:?}", properties.model(), properties.skin_url());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]
#![warn(rust_2018_idioms)]

mod assemble;
mod client;
mod config;
mod error;
pub mod history;
mod http;
mod model;
mod profile;
pub mod textures;
mod transport;

pub use client::{ProfileClient, LOAD_MANY_MAX_SIZE};
pub use config::{ClientConfig, DEFAULT_API_BASE, DEFAULT_SESSION_BASE, DEFAULT_TIMEOUT_SECONDS};
pub use error::{
    classify, ProfileError, ProfileResult, TransportError, NO_CONTENT_STATUS,
    RATE_LIMIT_ERROR_CODE,
};
pub use history::{NameEvent, NameHistory, PastName};
pub use http::HttpTransport;
pub use model::{Model, IDENTIFIER_LEN};
pub use profile::Profile;
pub use textures::{Properties, RawProperty};
pub use transport::{Endpoint, Transport};
