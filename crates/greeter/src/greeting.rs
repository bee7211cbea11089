use crate::error::GreetingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used when the caller gives none.
pub const DEFAULT_NAME: &str = "World";

/// A greeting issued by the service.
///
/// In a request body the `id` may be left out; it is ignored anyway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    #[serde(default)]
    pub id: u64,
    pub content: String,
}

impl Greeting {
    pub fn new(id: u64, content: impl Into<String>) -> Self {
        Self { id, content: content.into() }
    }
}

/// A name that may be greeted: non-empty and free of decimal digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn parse(name: impl Into<String>) -> Result<Self, GreetingError> {
        let name = name.into();
        if name.is_empty() {
            return Err(GreetingError::EmptyName);
        }
        if name.chars().any(|c| c.is_ascii_digit()) {
            return Err(GreetingError::invalid_name(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Name {
    fn default() -> Self {
        Self(DEFAULT_NAME.to_string())
    }
}

impl TryFrom<String> for Name {
    type Error = GreetingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = GreetingError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
