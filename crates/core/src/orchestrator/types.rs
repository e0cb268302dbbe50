//! Output shapes handed back to the host.

use serde::{Deserialize, Serialize};

use crate::debrid::{Quality, ResolvedStream};

/// Capability flags attached to sources and streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flag {
    /// The URL can be fetched cross-origin.
    CorsAllowed,
}

/// Stream type tag. This source only yields plain files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    File,
}

/// A playable stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub stream_type: StreamType,
    pub quality: Quality,
    pub url: String,
    pub flags: Vec<Flag>,
}

impl From<ResolvedStream> for StreamDescriptor {
    fn from(stream: ResolvedStream) -> Self {
        Self {
            id: stream.id.to_string(),
            stream_type: StreamType::File,
            quality: stream.quality,
            url: stream.link,
            flags: vec![Flag::CorsAllowed],
        }
    }
}

/// An embed page. Never produced here; kept for the output contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedDescriptor {
    pub id: String,
    pub url: String,
    pub flags: Vec<Flag>,
}

/// Result of a scrape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcererOutput {
    pub stream: Vec<StreamDescriptor>,
    pub embeds: Vec<EmbedDescriptor>,
}

/// Static description of a source for host registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub name: String,
    /// Higher ranks are tried first.
    pub rank: u32,
    pub flags: Vec<Flag>,
}
