//! Build configuration and project language selectors.

use serde::{Deserialize, Serialize};

/// Build variant whose output paths are authoritative during resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Configuration {
    #[default]
    Debug,
    Release,
}

impl Configuration {
    /// Lower-case name, as used in config files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Configuration::Debug => "debug",
            Configuration::Release => "release",
        }
    }

    /// Name as spelled by MSBuild's `$(Configuration)` property.
    pub fn msbuild_name(&self) -> &'static str {
        match self {
            Configuration::Debug => "Debug",
            Configuration::Release => "Release",
        }
    }
}

impl std::str::FromStr for Configuration {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Configuration::Debug),
            "release" => Ok(Configuration::Release),
            _ => Err(SelectorParseError {
                kind: "configuration",
                value: s.to_string(),
                expected: "debug, release",
            }),
        }
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project language, which decides the project file extension the scanner looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    /// C# (`*.csproj`)
    #[default]
    #[serde(rename = "cs", alias = "csharp", alias = "c#")]
    CSharp,
    /// Visual Basic (`*.vbproj`)
    #[serde(rename = "vb", alias = "visualbasic")]
    VisualBasic,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::CSharp => "cs",
            Language::VisualBasic => "vb",
        }
    }

    /// File name pattern matching this language's project files.
    pub fn project_pattern(&self) -> &'static str {
        match self {
            Language::CSharp => "*.csproj",
            Language::VisualBasic => "*.vbproj",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = SelectorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cs" | "csharp" | "c#" => Ok(Language::CSharp),
            "vb" | "visualbasic" => Ok(Language::VisualBasic),
            _ => Err(SelectorParseError {
                kind: "language",
                value: s.to_string(),
                expected: "cs, vb",
            }),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an invalid selector string.
#[derive(Debug, Clone)]
pub struct SelectorParseError {
    kind: &'static str,
    value: String,
    expected: &'static str,
}

impl std::fmt::Display for SelectorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid {} '{}', valid values: {}",
            self.kind, self.value, self.expected
        )
    }
}

impl std::error::Error for SelectorParseError {}
