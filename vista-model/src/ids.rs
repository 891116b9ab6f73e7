use crate::error::ModelError;
use std::str::FromStr;
use uuid::Uuid;

/// Strongly typed ID for gallery items. Stable across renders and reloads of
/// the same collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GalleryItemId(pub Uuid);

impl Default for GalleryItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl GalleryItemId {
    pub fn new() -> Self {
        GalleryItemId(Uuid::now_v7())
    }

    /// Deterministic id, used for placeholder content and fixtures.
    pub const fn from_u128(value: u128) -> Self {
        GalleryItemId(Uuid::from_u128(value))
    }

    pub fn from_string(id: &str) -> Result<Self, ModelError> {
        if id.trim().is_empty() {
            return Err(ModelError::InvalidId(
                "gallery item id cannot be empty".to_string(),
            ));
        }
        id.trim()
            .parse::<Uuid>()
            .map(GalleryItemId)
            .map_err(|err| ModelError::InvalidId(format!("{id}: {err}")))
    }

    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for GalleryItemId {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl FromStr for GalleryItemId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl std::fmt::Display for GalleryItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
