use anyhow::{Result, anyhow};
use hyper::http::Uri;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Represents a validated URL
#[derive(Debug, Clone)]
pub struct Url(pub Uri);

impl Url {
    /// Creates a new Url with validation
    ///
    /// # Arguments
    /// * `url` - The URL string to parse
    ///
    /// # Returns
    /// * `Ok(Url)` - Validated URL
    /// * `Err(anyhow::Error)` - If the URL is invalid
    pub fn new(url: &str) -> Result<Self> {
        let uri = url.parse::<Uri>().map_err(|e| anyhow!("Invalid URL '{}': {}", url, e))?;
        Ok(Url(uri))
    }

    /// Returns the URL as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }

    #[cfg(test)]
    pub fn path(&self) -> &str {
        self.0.path()
    }

    #[cfg(test)]
    pub fn query(&self) -> Option<&str> {
        self.0.query()
    }
}

/// Represents a validated JSON body
#[derive(Debug, Clone)]
pub struct JsonBody(pub String);

impl JsonBody {
    /// Creates a new JsonBody with validation
    ///
    /// # Arguments
    /// * `json` - The JSON string to validate
    ///
    /// # Returns
    /// * `Ok(JsonBody)` - Validated JSON
    /// * `Err(anyhow::Error)` - If the JSON is invalid
    pub fn new(json: &str) -> Result<Self> {
        serde_json::from_str::<Value>(json).map_err(|e| anyhow!("Invalid JSON: {}", e))?;
        Ok(JsonBody(json.to_string()))
    }

    /// Serializes a payload into a JSON object of string values
    pub fn from_payload(payload: &Payload) -> Result<Self> {
        let json = serde_json::to_string(payload)
            .map_err(|e| anyhow!("Failed to serialize payload: {}", e))?;
        Self::new(&json)
    }
}

/// Flat field mapping built from `key=value` command-line tokens.
///
/// Values are kept as opaque strings; the API decides how to coerce them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    /// Splits every token on its first `=`.
    ///
    /// Tokens without `=`, or with an empty field name or value, are dropped.
    /// A repeated field keeps its last value.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut fields = BTreeMap::new();
        for token in tokens {
            if let Some((name, value)) = token.as_ref().split_once('=') {
                if !name.is_empty() && !value.is_empty() {
                    fields.insert(name.to_string(), value.to_string());
                }
            }
        }
        Payload(fields)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get("id")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Percent-encoded `key=value&...` form, ordered by field name
    pub fn to_query_string(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}
