//! Course material attached to a lecture

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

/// Kind of material resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    /// A document (slides, handouts, PDFs)
    #[serde(alias = "pdf")]
    Document,
    /// An image
    Image,
    /// An external link
    Link,
}

impl MaterialKind {
    /// Wire/storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Image => "image",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaterialKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "document" | "pdf" => Ok(Self::Document),
            "image" => Ok(Self::Image),
            "link" => Ok(Self::Link),
            other => Err(DomainError::InvalidMaterialKind(other.to_string())),
        }
    }
}

/// A named, typed, linked resource attached to a lecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Identifier, unique within its lecture
    pub id: String,
    /// Display name
    pub name: String,
    /// Resource kind
    #[serde(rename = "type")]
    pub kind: MaterialKind,
    /// Where the resource lives
    pub url: String,
}

impl Material {
    /// Create a material with a generated id
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MaterialKind, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            url: url.into(),
        }
    }

    /// Override the generated id
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
