//! Identifier newtypes with smart constructors.
//!
//! Layout and component identifiers validate non-empty strings at
//! construction time. The raw tuple constructors are never exported;
//! deserialization goes through the same validation via `try_from`.

use std::fmt;

/// Unique identifier for a layout within a registry.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct LayoutId(String);

impl LayoutId {
    /// Smart constructor: validates a non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidLayoutId> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidLayoutId::Empty);
        }
        Ok(Self(raw))
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LayoutId {
    type Error = InvalidLayoutId;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<LayoutId> for String {
    fn from(id: LayoutId) -> String {
        id.0
    }
}

/// Key identifying one pane within a layout (e.g., "stream", "chat").
///
/// Keys double as lookup keys into the component catalog and into the
/// surface resolver at animation time.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentKey(String);

impl ComponentKey {
    /// Smart constructor: validates a non-empty key.
    pub fn new(raw: impl Into<String>) -> Result<Self, InvalidComponentKey> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(InvalidComponentKey::Empty);
        }
        Ok(Self(raw))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ComponentKey {
    type Error = InvalidComponentKey;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<ComponentKey> for String {
    fn from(key: ComponentKey) -> String {
        key.0
    }
}

// ===== Error Types =====

/// Rejection reason for a malformed layout id.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidLayoutId {
    /// Layout ids must be non-empty.
    #[error("Layout id cannot be empty")]
    Empty,
}

/// Rejection reason for a malformed component key.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvalidComponentKey {
    /// Component keys must be non-empty.
    #[error("Component key cannot be empty")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_id_rejects_empty() {
        assert!(LayoutId::new("").is_err());
    }

    #[test]
    fn layout_id_accepts_non_empty() {
        let id = LayoutId::new("spotlight").unwrap();
        assert_eq!(id.as_str(), "spotlight");
        assert_eq!(id.to_string(), "spotlight");
    }

    #[test]
    fn component_key_rejects_empty() {
        assert!(ComponentKey::new("").is_err());
    }

    #[test]
    fn component_key_round_trips_through_json() {
        let key = ComponentKey::new("chat").unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"chat\"");
        let back: ComponentKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn empty_component_key_fails_deserialization() {
        let result: Result<ComponentKey, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
