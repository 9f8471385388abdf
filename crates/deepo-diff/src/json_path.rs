//! Canonical paths into a JSON value.
//!
//! Paths start at `$`. Object keys that look like identifiers are appended
//! as `.key`, every other key as `["key"]` with JSON string quoting, and array
//! indices as `[n]`.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// A location inside a JSON document, e.g. `$.items[2]["display name"]`.
///
/// Paths order by plain string comparison.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JsonPath(String);

impl JsonPath {
    /// The path of the document root.
    pub fn root() -> Self {
        JsonPath("$".to_string())
    }

    /// The path of the member `key` of the object at this path.
    pub fn key(&self, key: &str) -> Self {
        if is_identifier(key) {
            JsonPath(format!("{}.{}", self.0, key))
        } else {
            // Display on a string value never fails and yields JSON quoting.
            JsonPath(format!("{}[{}]", self.0, Value::String(key.to_string())))
        }
    }

    /// The path of element `index` of the array at this path.
    pub fn index(&self, index: usize) -> Self {
        JsonPath(format!("{}[{}]", self.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for JsonPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JsonPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for JsonPath {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for JsonPath {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// `[A-Za-z_$][A-Za-z0-9_$]*`
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
