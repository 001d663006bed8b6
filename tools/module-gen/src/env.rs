//! Build environment seen by the generators
//!
//! The generators never reach for a global build-system object. They only see
//! the [`BuildEnvironment`] trait: two capability queries and the ordered list
//! of preprocessor definitions.

use serde::Deserialize;
use std::path::PathBuf;

/// Capabilities and preprocessor state of the build invoking a generator
pub trait BuildEnvironment {
    /// Debug-only features are compiled in (`DEBUG_ENABLED`)
    fn debug_features(&self) -> bool;

    /// Vector graphics (SVG) support is compiled in (`MODULE_SVG_ENABLED`)
    fn vector_graphics(&self) -> bool;

    /// Preprocessor definitions in the order the build declared them
    fn cpp_defines(&self) -> &[DefineEntry];
}

/// Value side of a preprocessor definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefineValue {
    /// `-DNAME=token`
    Token(String),
    /// `-DNAME=42`
    Integer(i64),
    /// Path-list objects some builds attach to a define name
    PathList(Vec<PathBuf>),
    /// Anything else (booleans, floats, tables); kept but never mirrored
    Other(toml::Value),
    /// `-DNAME` with no value
    #[default]
    #[serde(skip_deserializing)]
    Bare,
}

impl DefineValue {
    /// Only plain string definitions are candidates for mirroring.
    pub fn is_plain_string(&self) -> bool {
        matches!(self, DefineValue::Bare | DefineValue::Token(_))
    }
}

/// Single preprocessor definition
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DefineEntry {
    pub name: String,
    #[serde(default)]
    pub value: DefineValue,
}

impl DefineEntry {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: DefineValue::Bare,
        }
    }

    pub fn token(name: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: DefineValue::Token(token.into()),
        }
    }

    /// Parse a command-line style `NAME` or `NAME=VALUE` definition
    pub fn parse(arg: &str) -> Self {
        match arg.split_once('=') {
            Some((name, value)) => Self::token(name, value),
            None => Self::bare(arg),
        }
    }
}

/// Plain-data environment, loaded from a manifest or built by hand in tests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticEnvironment {
    #[serde(default)]
    pub debug_features: bool,
    #[serde(default)]
    pub vector_graphics: bool,
    #[serde(default)]
    pub defines: Vec<DefineEntry>,
}

impl StaticEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug_features(mut self, enabled: bool) -> Self {
        self.debug_features = enabled;
        self
    }

    pub fn with_vector_graphics(mut self, enabled: bool) -> Self {
        self.vector_graphics = enabled;
        self
    }

    pub fn with_define(mut self, entry: DefineEntry) -> Self {
        self.defines.push(entry);
        self
    }
}

impl BuildEnvironment for StaticEnvironment {
    fn debug_features(&self) -> bool {
        self.debug_features
    }

    fn vector_graphics(&self) -> bool {
        self.vector_graphics
    }

    fn cpp_defines(&self) -> &[DefineEntry] {
        &self.defines
    }
}
