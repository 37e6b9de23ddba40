//! Tool identities and the ordered substring classifier that resolves them.

use std::fmt;
use std::str::FromStr;

use memchr::memmem;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Logical name of a benchmarked tool, independent of how it was invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ToolIdentity {
    Safelock,
    SafelockSha256,
    SafelockSha512,
    Gpgtar,
    SevenZip,
    Age,
}

impl ToolIdentity {
    pub const ALL: [ToolIdentity; 6] = [
        ToolIdentity::Safelock,
        ToolIdentity::SafelockSha256,
        ToolIdentity::SafelockSha512,
        ToolIdentity::Gpgtar,
        ToolIdentity::SevenZip,
        ToolIdentity::Age,
    ];

    /// Display name used in chart labels and reports.
    pub fn name(self) -> &'static str {
        match self {
            ToolIdentity::Safelock => "safelock",
            ToolIdentity::SafelockSha256 => "safelock --sha256",
            ToolIdentity::SafelockSha512 => "safelock --sha512",
            ToolIdentity::Gpgtar => "gpgtar",
            ToolIdentity::SevenZip => "7z",
            ToolIdentity::Age => "age",
        }
    }
}

impl fmt::Display for ToolIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolIdentity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "safelock" => Ok(ToolIdentity::Safelock),
            "safelock --sha256" | "safelock-sha256" => Ok(ToolIdentity::SafelockSha256),
            "safelock --sha512" | "safelock-sha512" => Ok(ToolIdentity::SafelockSha512),
            "gpgtar" => Ok(ToolIdentity::Gpgtar),
            "7z" | "7zip" => Ok(ToolIdentity::SevenZip),
            "age" => Ok(ToolIdentity::Age),
            other => Err(Error::Config(format!("unknown tool '{other}'"))),
        }
    }
}

impl<'de> Deserialize<'de> for ToolIdentity {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(d)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One `(substring, identity)` candidate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Matcher {
    pub pattern: String,
    pub tool: ToolIdentity,
}

impl Matcher {
    pub fn new(pattern: impl Into<String>, tool: ToolIdentity) -> Self {
        Self {
            pattern: pattern.into(),
            tool,
        }
    }
}

/// Return the identity of the first candidate whose pattern occurs in `text`.
pub fn classify(text: &str, candidates: &[Matcher]) -> Result<ToolIdentity> {
    candidates
        .iter()
        .find(|m| memmem::find(text.as_bytes(), m.pattern.as_bytes()).is_some())
        .map(|m| m.tool)
        .ok_or_else(|| Error::Classification {
            text: text.to_string(),
        })
}

/// Ordered candidate list. Earlier entries win.
#[derive(Clone, Debug)]
pub struct Classifier {
    matchers: Vec<Matcher>,
}

impl Classifier {
    pub fn new(matchers: Vec<Matcher>) -> Result<Self> {
        if matchers.is_empty() {
            return Err(Error::Config("classifier needs at least one matcher".into()));
        }
        if let Some(m) = matchers.iter().find(|m| m.pattern.is_empty()) {
            return Err(Error::Config(format!(
                "empty match pattern for {} would match everything",
                m.tool
            )));
        }
        Ok(Self { matchers })
    }

    pub fn matchers(&self) -> &[Matcher] {
        &self.matchers
    }

    pub fn classify(&self, text: &str) -> Result<ToolIdentity> {
        classify(text, &self.matchers)
    }
}

impl Default for Classifier {
    // `safelock` must come after every other tool: the default output
    // directory `safelock_dump` shows up in their decrypt commands too.
    fn default() -> Self {
        Self {
            matchers: vec![
                Matcher::new("gpg", ToolIdentity::Gpgtar),
                Matcher::new("sha256", ToolIdentity::SafelockSha256),
                Matcher::new("sha512", ToolIdentity::SafelockSha512),
                Matcher::new("7z", ToolIdentity::SevenZip),
                Matcher::new(".age", ToolIdentity::Age),
                Matcher::new("safelock", ToolIdentity::Safelock),
                Matcher::new(".sla", ToolIdentity::Safelock),
            ],
        }
    }
}
