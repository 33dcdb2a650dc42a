use serde::{Deserialize, Serialize};

/// Engine configuration.
///
/// Deserializable from any serde format; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Options {
    /// Schema of collections named without one
    pub default_schema: String,

    /// Column holding the optimistic-concurrency version
    pub version_column: String,

    /// Database name used in identifier namespaces. Queried from the
    /// connection when unset.
    pub database: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_schema: "public".to_string(),
            version_column: "_version".to_string(),
            database: None,
        }
    }
}
