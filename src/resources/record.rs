//! Resource records and kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

// == Resource Kind ==
/// The collections exposed through the resource facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Films,
    Species,
    Vehicles,
    Starships,
    Planets,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Films,
        ResourceKind::Species,
        ResourceKind::Vehicles,
        ResourceKind::Starships,
        ResourceKind::Planets,
    ];

    /// Collection name as used by the upstream API and in cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Films => "films",
            ResourceKind::Species => "species",
            ResourceKind::Vehicles => "vehicles",
            ResourceKind::Starships => "starships",
            ResourceKind::Planets => "planets",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown resource kind '{}'", s))
    }
}

// == Record ==
/// One upstream resource: an arbitrary field map plus the display name used
/// for filtering.
///
/// The display name is resolved once when the record is built: the first
/// non-empty string among `title` and `name`. Serialization emits only the
/// original fields, so records round-trip through the cache unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    display_name: Option<String>,
    fields: Map<String, Value>,
}

impl Record {
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        let display_name = ["title", "name"]
            .iter()
            .filter_map(|field| fields.get(*field).and_then(Value::as_str))
            .find(|value| !value.is_empty())
            .map(str::to_string);

        Self {
            display_name,
            fields,
        }
    }

    /// `title`, falling back to `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns a string field, or None if absent or not a string.
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Record::from_fields)
    }
}
