use serde::{Deserialize, Serialize};
use std::fmt;

/// Competition format of a tournament, or the per-match sub-format of a
/// `Multiple` tournament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ruleset {
    Seeded,
    Mixed,
    Unseeded,
    Diversity,
    Multiple,
    Other,
    Team,
    /// Any format tag not known to the router. Keeps the tag as written.
    Unrecognized(String)
}

impl Ruleset {
    pub fn as_str(&self) -> &str {
        match self {
            Ruleset::Seeded => "seeded",
            Ruleset::Mixed => "mixed",
            Ruleset::Unseeded => "unseeded",
            Ruleset::Diversity => "diversity",
            Ruleset::Multiple => "multiple",
            Ruleset::Other => "other",
            Ruleset::Team => "team",
            Ruleset::Unrecognized(tag) => tag.as_str()
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Ruleset::Unrecognized(_))
    }
}

impl From<&str> for Ruleset {
    fn from(v: &str) -> Self {
        let tag = v.trim();
        match tag.to_lowercase().as_str() {
            "seeded" => Ruleset::Seeded,
            "mixed" => Ruleset::Mixed,
            "unseeded" => Ruleset::Unseeded,
            "diversity" => Ruleset::Diversity,
            "multiple" => Ruleset::Multiple,
            "other" => Ruleset::Other,
            "team" => Ruleset::Team,
            _ => Ruleset::Unrecognized(tag.to_string())
        }
    }
}

impl From<String> for Ruleset {
    fn from(v: String) -> Self {
        Ruleset::from(v.as_str())
    }
}

impl From<Ruleset> for String {
    fn from(v: Ruleset) -> Self {
        v.as_str().to_string()
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
