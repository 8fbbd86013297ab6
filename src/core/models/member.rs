use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Roster entry supplied alongside the balances. Only used for display names.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Member {
    /// Number or numeric string
    #[serde(default)]
    #[schema(value_type = Object, example = 1)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Member {
    /// Reads a roster record field by field. Non-object records yield `None`;
    /// name fields that are not strings are ignored.
    pub fn from_value(value: &Value) -> Option<Member> {
        let record = value.as_object()?;
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Member {
            id: record.get("id").cloned().unwrap_or_default(),
            display_name: text("display_name"),
            username: text("username"),
            name: text("name"),
        })
    }

    /// First non-blank of `display_name`, `username`, `name`.
    pub fn label(&self) -> Option<&str> {
        [&self.display_name, &self.username, &self.name]
            .into_iter()
            .filter_map(|n| n.as_deref())
            .map(str::trim)
            .find(|n| !n.is_empty())
    }
}
