//! Product identifiers.
//!
//! The upstream backend hands out product ids as either JSON numbers or
//! JSON strings, sometimes both across endpoints. [`ProductId`] keeps the
//! original representation so a value read back from upstream compares equal
//! to the value that was sent.

use core::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A product identifier as issued by the upstream backend.
///
/// Equality is strict: `ProductId::Number(1)` and `ProductId::Text("1")`
/// are different products.
///
/// # Example
///
/// ```rust
/// # use shopfront_core::ProductId;
/// let numeric: ProductId = serde_json::from_str("42").unwrap();
/// let text: ProductId = serde_json::from_str("\"sku-42\"").unwrap();
///
/// assert_eq!(numeric, ProductId::Number(42));
/// assert_eq!(text, ProductId::from("sku-42"));
/// assert_ne!(ProductId::Number(42), ProductId::from("42"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    /// Numeric id (`{"id": 42}`).
    Number(i64),
    /// String id (`{"id": "64f1c0..."}`).
    Text(String),
}

impl ProductId {
    /// Parse an id typed by a person (CLI argument, query string).
    ///
    /// Anything that parses as an integer becomes [`ProductId::Number`];
    /// everything else is kept as text.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number)
    }

    /// Read an id out of an arbitrary JSON value.
    ///
    /// Returns `None` for empty strings, non-integral numbers, and any
    /// non-scalar value.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Number),
            Value::String(s) if !s.trim().is_empty() => Some(Self::Text(s.trim().to_owned())),
            _ => None,
        }
    }

    /// Returns the id as a URL path segment (unescaped).
    #[must_use]
    pub fn to_path_segment(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}
