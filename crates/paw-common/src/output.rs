//! Output format specifications.
//!
//! The engine never mandates wire framing; the routing collaborator picks a
//! format and serializes the derived results at the boundary.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Supported output formats for boundary serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact JSON (default for machine consumption)
    #[default]
    Json,

    /// Indented JSON for logs and debugging
    JsonPretty,
}

impl OutputFormat {
    /// Serialize any result value in this format.
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let rendered = match self {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
        };
        Ok(rendered)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::JsonPretty => write!(f, "json-pretty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_json_compact() {
        let value = json!({"a": 1, "b": [2, 3]});
        let out = OutputFormat::Json.render(&value).unwrap();
        assert!(!out.contains('\n'));
        assert!(out.contains(r#""a":1"#));
    }

    #[test]
    fn test_render_json_pretty() {
        let value = json!({"a": 1});
        let out = OutputFormat::JsonPretty.render(&value).unwrap();
        assert!(out.contains('\n'));
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::JsonPretty.to_string(), "json-pretty");
    }
}
