//! Session data structure

use serde::{Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use crate::Result;

/// The six session fields.
///
/// Field order here is the order written to storage. Unset fields serialize
/// as `null` so the stored object always carries every key. Empty strings are
/// written as `null` too, since they read back as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionRecord {
    /// Credential for authenticated API calls
    #[serde(serialize_with = "write_field")]
    pub access_token: Option<String>,
    #[serde(serialize_with = "write_field")]
    pub username: Option<String>,
    /// Selected chat workspace
    #[serde(serialize_with = "write_field")]
    pub workspace_id: Option<String>,
    /// Selected chat or channel
    #[serde(serialize_with = "write_field")]
    pub chat_id: Option<String>,
    /// Transport address for the chat connection
    #[serde(serialize_with = "write_field")]
    pub chat_connection_string: Option<String>,
    /// Transport address or topic for chat messages
    #[serde(serialize_with = "write_field")]
    pub chat_message_string: Option<String>,
}

impl SessionRecord {
    pub const FIELDS: [&'static str; 6] = [
        "access_token",
        "username",
        "workspace_id",
        "chat_id",
        "chat_connection_string",
        "chat_message_string",
    ];

    /// Build a record from a stored JSON object.
    ///
    /// Missing keys, `null`, and empty strings all read as unset. Numbers are
    /// kept in their string form; values of any other JSON type are ignored
    /// with a warning.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            access_token: read_field(object, "access_token"),
            username: read_field(object, "username"),
            workspace_id: read_field(object, "workspace_id"),
            chat_id: read_field(object, "chat_id"),
            chat_connection_string: read_field(object, "chat_connection_string"),
            chat_message_string: read_field(object, "chat_message_string"),
        }
    }

    /// Serialize with 4-space indentation, the layout kept in storage
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reset every field to unset
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn read_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    match object.get(name)? {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            tracing::warn!(field = name, value = %other, "Ignoring non-string session field");
            None
        }
    }
}

fn write_field<S: Serializer>(
    value: &Option<String>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value.as_deref() {
        Some(s) if !s.is_empty() => serializer.serialize_some(s),
        _ => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn test_default_is_unset() {
        let record = SessionRecord::default();
        assert!(record.is_empty());
        assert!(!record.is_authenticated());
    }

    #[test]
    fn test_from_object_lenient_fields() {
        let record = SessionRecord::from_object(&object(json!({
            "access_token": "",
            "username": "alice",
            "workspace_id": 42,
            "chat_id": null,
            "chat_connection_string": true,
            "unrelated": "ignored"
        })));

        assert_eq!(
            record,
            SessionRecord {
                username: Some("alice".to_string()),
                workspace_id: Some("42".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_pretty_json_layout() {
        let record = SessionRecord {
            access_token: Some("tok".to_string()),
            chat_id: Some("general".to_string()),
            ..Default::default()
        };

        let expected = concat!(
            "{\n",
            "    \"access_token\": \"tok\",\n",
            "    \"username\": null,\n",
            "    \"workspace_id\": null,\n",
            "    \"chat_id\": \"general\",\n",
            "    \"chat_connection_string\": null,\n",
            "    \"chat_message_string\": null\n",
            "}"
        );
        assert_eq!(record.to_pretty_json().unwrap(), expected);
    }

    #[test]
    fn test_empty_strings_written_as_null() {
        let record = SessionRecord {
            username: Some("alice".to_string()),
            chat_id: Some(String::new()),
            ..Default::default()
        };

        let json = record.to_pretty_json().unwrap();
        let map = object(serde_json::from_str(&json).unwrap());
        assert!(map["chat_id"].is_null());
        assert_eq!(map["username"], "alice");
    }

    #[test]
    fn test_written_keys_match_fields() {
        let json = SessionRecord::default().to_pretty_json().unwrap();
        let map = object(serde_json::from_str(&json).unwrap());

        let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
        keys.sort_unstable();
        let mut expected = SessionRecord::FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
        assert!(map.values().all(Value::is_null));
    }

    #[test]
    fn test_authenticated_requires_token() {
        let mut record = SessionRecord {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        assert!(!record.is_authenticated());

        record.access_token = Some("secret".to_string());
        assert!(record.is_authenticated());

        record.clear();
        assert!(record.is_empty());
    }
}
