//! Hierarchical account and asset names.
//!
//! A name is a lowercase root label optionally followed by dotted sub-labels:
//! `meridian`, `meridian.asset`, `alice01.sub`. The same grammar gates
//! account creation (an account may only create its own direct children) and
//! asset aggregation (a parent asset owns the balances of its sub-assets).

use std::{
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_NAME_LEVELS, DEFAULT_ROOT_NAME_MAX, DEFAULT_SUB_NAME_MAX, ROOT_NAME_MIN},
    serializer::{Reader, ReaderError, Serializer, Writer},
};

/// Length and depth bounds of the name grammar.
///
/// The bounds are threaded explicitly through every validation call instead
/// of living in process-wide state, so two chains with different rules can
/// coexist in one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameConfig {
    /// Maximum total length of the root label
    pub root_max: usize,
    /// Maximum length of each sub-label
    pub sub_max: usize,
    /// Maximum number of sub-levels below the root
    pub levels: usize,
}

impl Default for NameConfig {
    fn default() -> Self {
        Self {
            root_max: DEFAULT_ROOT_NAME_MAX,
            sub_max: DEFAULT_SUB_NAME_MAX,
            levels: DEFAULT_NAME_LEVELS,
        }
    }
}

/// A canonical (not necessarily valid) name string.
///
/// Construction is unchecked, mirroring how names arrive from the wire;
/// call [`Name::is_valid`] wherever a name enters the state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the name against the grammar
    /// `^[a-z][a-z0-9]{6,root_max-1}(\.[a-z0-9]{1,sub_max}){0,levels}$`.
    pub fn is_valid(&self, config: &NameConfig) -> bool {
        self.parse(config).is_some()
    }

    /// Split the name into its root and sub-labels, or None if it does not
    /// match the grammar.
    pub fn parse<'a>(&'a self, config: &NameConfig) -> Option<(&'a str, Vec<&'a str>)> {
        let mut labels = self.0.split('.');
        let root = labels.next()?;

        if root.len() < ROOT_NAME_MIN || root.len() > config.root_max {
            return None;
        }

        let mut chars = root.chars();
        if !chars.next()?.is_ascii_lowercase() {
            return None;
        }
        if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()) {
            return None;
        }

        let mut sublevels = Vec::new();
        for label in labels {
            if sublevels.len() == config.levels {
                return None;
            }
            if label.is_empty() || label.len() > config.sub_max {
                return None;
            }
            if !label
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
            {
                return None;
            }
            sublevels.push(label);
        }

        Some((root, sublevels))
    }

    /// Number of sub-levels below the root, or None for an invalid name.
    pub fn sublevels(&self, config: &NameConfig) -> Option<usize> {
        self.parse(config).map(|(_, subs)| subs.len())
    }

    /// True iff `child` is exactly one valid level below this name.
    pub fn is_parent_of(&self, child: &Name, config: &NameConfig) -> bool {
        let Some(rest) = child.0.strip_prefix(self.0.as_str()) else {
            return false;
        };
        let Some(label) = rest.strip_prefix('.') else {
            return false;
        };

        if label.is_empty() || label.contains('.') {
            return false;
        }

        self.is_valid(config) && child.is_valid(config)
    }

    /// True iff this name is exactly one valid level below `parent`.
    pub fn is_child_of(&self, parent: &Name, config: &NameConfig) -> bool {
        parent.is_parent_of(self, config)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Name::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Name(value)
    }
}

impl FromStr for Name {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Name::new(s))
    }
}

impl Serializer for Name {
    fn write(&self, writer: &mut Writer) {
        writer.write_string(&self.0);
    }

    fn read(reader: &mut Reader) -> Result<Self, ReaderError> {
        Ok(Name(reader.read_string()?))
    }

    fn size(&self) -> usize {
        self.0.size()
    }
}
