//! Entity identifiers

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a server-side record.
///
/// The backend uses UUID strings for users and numeric keys for some master
/// data, so both JSON strings and integers are accepted. The value is kept
/// in its textual form and written back the way it was read. Equality only
/// looks at the text.
#[derive(Debug, Clone)]
pub struct EntityId {
    value: String,
    numeric: bool,
}

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into(), numeric: false }
    }

    /// Id typed by a user; sent back as a number only when the number
    /// prints as the same text (`"007"` stays a string)
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.parse::<i64>() {
            Ok(n) if n.to_string() == text => Self::from(n),
            _ => Self::new(text),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EntityId {}

impl std::hash::Hash for EntityId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialOrd for EntityId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EntityId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self { value: value.to_string(), numeric: true }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => EntityId::new(s),
            RawId::Number(n) => EntityId::from(n),
        })
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.numeric {
            if let Ok(n) = self.value.parse::<i64>() {
                return serializer.serialize_i64(n);
            }
        }
        serializer.serialize_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_string_and_number() {
        let a: EntityId = serde_json::from_str("\"9b2f\"").unwrap();
        let b: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(a.as_str(), "9b2f");
        assert_eq!(b.as_str(), "42");
    }

    #[test]
    fn test_serializes_in_original_form() {
        let numeric: EntityId = serde_json::from_str("7").unwrap();
        let text = EntityId::from("7");
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "7");
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"7\"");
        assert_eq!(numeric, text);
    }

    #[test]
    fn test_parse_user_input() {
        assert_eq!(serde_json::to_string(&EntityId::parse(" 31 ")).unwrap(), "31");
        assert_eq!(serde_json::to_string(&EntityId::parse("9b2f")).unwrap(), "\"9b2f\"");
    }

    #[test]
    fn test_parse_keeps_padded_text() {
        let padded = EntityId::parse("007");
        assert_eq!(padded.as_str(), "007");
        assert_eq!(padded, EntityId::from("007"));
        assert_eq!(serde_json::to_string(&padded).unwrap(), "\"007\"");
        assert_eq!(EntityId::parse("+5").as_str(), "+5");
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_str::<EntityId>("true").is_err());
        assert!(serde_json::from_str::<EntityId>("{}").is_err());
    }
}
