//! Node names.
//!
//! Every node carries a name used by [`Tree::find`](crate::Tree::find), by
//! scene files and by the debug dump. Controls default to their type name in
//! snake case (`MenuStrip` becomes `menu_strip`); scenes may override it.

use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name given when conversion leaves nothing usable.
const FALLBACK: &str = "node";

/// Lowercase ASCII letters, digits and underscores.
fn is_name_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

/// A validated node name: non-empty, lowercase ASCII alphanumerics and
/// underscores only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeName(String);

impl NodeName {
    /// Return true if `name` could be used as is.
    pub fn is_valid(name: &str) -> bool {
        !name.is_empty() && name.chars().all(is_name_char)
    }

    /// Derive a name from arbitrary text, such as a type name or a label:
    /// snake-case it and drop anything else.
    pub fn convert(text: &str) -> Self {
        let name: String = text
            .to_case(Case::Snake)
            .chars()
            .filter(|c| is_name_char(*c))
            .collect();
        if name.is_empty() {
            Self(FALLBACK.to_string())
        } else {
            Self(name)
        }
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeName {
    type Error = Error;

    fn try_from(name: String) -> Result<Self> {
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(Error::Invalid(format!("node name {name:?}")))
        }
    }
}

impl TryFrom<&str> for NodeName {
    type Error = Error;

    fn try_from(name: &str) -> Result<Self> {
        Self::try_from(name.to_string())
    }
}

impl FromStr for NodeName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_from(s)
    }
}

impl From<NodeName> for String {
    fn from(name: NodeName) -> Self {
        name.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for NodeName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for NodeName {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}
