//! Appearance decoding: skin, cape and body model.
//!
//! The session service attaches a `textures` property to a profile whose value
//! is base64 encoded JSON:
//!
//! ```json
//! {
//!   "profileId": "087cc153c3434ff7ac497de1569affa1",
//!   "textures": {
//!     "SKIN": { "url": "...", "metadata": { "model": "slim" } },
//!     "CAPE": { "url": "..." }
//!   }
//! }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, ProfileResult};
use crate::model::Model;

/// Name of the profile property carrying the texture attachment.
pub const TEXTURES_PROPERTY: &str = "textures";

const SLIM_MODEL: &str = "slim";

/// Appearance of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    skin_url: Option<String>,
    cape_url: Option<String>,
    model: Model,
}

impl Properties {
    /// URL of the custom skin, if one is set.
    pub fn skin_url(&self) -> Option<&str> {
        self.skin_url.as_deref()
    }

    /// URL of the cape, if the profile has one.
    pub fn cape_url(&self) -> Option<&str> {
        self.cape_url.as_deref()
    }

    pub fn model(&self) -> Model {
        self.model
    }

    /// Properties of a profile without any texture attachment.
    pub fn without_textures(profile_id: &str) -> ProfileResult<Self> {
        Ok(Self {
            skin_url: None,
            cape_url: None,
            model: Model::default_for(profile_id)?,
        })
    }

    /// Decodes a base64 `textures` property value.
    ///
    /// Without a `SKIN` entry the model falls back to the identifier-derived
    /// default; with one it is Steve unless the metadata says `slim`.
    pub fn from_textures(encoded: &str) -> ProfileResult<Self> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| ProfileError::parse("textures property", e))?;
        let doc: TexturesDocument = serde_json::from_slice(&bytes)
            .map_err(|e| ProfileError::parse("textures property", e))?;

        let model = match &doc.textures.skin {
            Some(skin) => match skin.metadata.as_ref().and_then(|m| m.model.as_deref()) {
                Some(SLIM_MODEL) => Model::Alex,
                _ => Model::Steve,
            },
            None => {
                let profile_id = doc.profile_id.as_deref().ok_or_else(|| {
                    ProfileError::parse("textures property", "missing profileId")
                })?;
                Model::default_for(profile_id)?
            }
        };

        Ok(Self {
            skin_url: doc.textures.skin.map(|skin| skin.url),
            cape_url: doc.textures.cape.map(|cape| cape.url),
            model,
        })
    }

    /// Builds properties from the session service's property list.
    ///
    /// Only the `textures` entry is understood; others are skipped. A list
    /// without it yields default properties for `profile_id`.
    pub fn from_property_list(profile_id: &str, list: &[RawProperty]) -> ProfileResult<Self> {
        match list.iter().find(|p| p.name == TEXTURES_PROPERTY) {
            Some(textures) => Self::from_textures(&textures.value),
            None => Self::without_textures(profile_id),
        }
    }
}

/// One `{name, value, signature}` entry of a session profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawProperty {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TexturesDocument {
    #[serde(rename = "profileId")]
    profile_id: Option<String>,
    textures: TextureSet,
}

#[derive(Debug, Deserialize)]
struct TextureSet {
    #[serde(rename = "SKIN")]
    skin: Option<Texture>,
    #[serde(rename = "CAPE")]
    cape: Option<Texture>,
}

#[derive(Debug, Deserialize)]
struct Texture {
    url: String,
    metadata: Option<TextureMetadata>,
}

#[derive(Debug, Deserialize)]
struct TextureMetadata {
    model: Option<String>,
}
