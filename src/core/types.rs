use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::player::PlayerRecord;

/// Earliest start year admitted by [`Mode::Classic`]
pub const CLASSIC_MIN_START_YEAR: i32 = 2011;

/// Minimum career length (in seasons) admitted by [`Mode::Classic`]
pub const CLASSIC_MIN_CAREER_LENGTH: u32 = 5;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown mode '{0}' (expected 'all-time' or 'classic')")]
pub struct ParseModeError(pub String);

/// Named filter restricting which players are eligible as guesses and targets
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Mode {
    /// Every player in the store
    #[default]
    #[serde(rename = "all-time")]
    #[value(name = "all-time")]
    AllTime,
    /// Modern players with a meaningful career
    #[serde(rename = "classic")]
    #[value(name = "classic")]
    Classic,
}

impl Mode {
    /// Whether a record is eligible under this mode
    #[must_use]
    pub fn admits(self, record: &PlayerRecord) -> bool {
        match self {
            Self::AllTime => true,
            Self::Classic => {
                record.start_year >= CLASSIC_MIN_START_YEAR
                    && record.career_length >= CLASSIC_MIN_CAREER_LENGTH
            }
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllTime => "all-time",
            Self::Classic => "classic",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all-time" | "alltime" | "all_time" => Ok(Self::AllTime),
            "classic" => Ok(Self::Classic),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Coarse positional archetype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Archetype {
    Guard,
    Wing,
    Big,
    Other(String),
}

/// How two archetypes relate to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchetypeRelation {
    Exact,
    Adjacent,
    Unrelated,
}

impl Archetype {
    #[must_use]
    pub fn relation(&self, other: &Self) -> ArchetypeRelation {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) if !a.is_empty() && a == b => ArchetypeRelation::Exact,
            (Self::Other(_), _) | (_, Self::Other(_)) => ArchetypeRelation::Unrelated,
            (a, b) if a == b => ArchetypeRelation::Exact,
            // Guard, Wing and Big are pairwise adjacent
            _ => ArchetypeRelation::Adjacent,
        }
    }
}

impl Default for Archetype {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Archetype {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "guard" => Self::Guard,
            "wing" => Self::Wing,
            "big" => Self::Big,
            _ => Self::Other(s),
        }
    }
}

impl From<Archetype> for String {
    fn from(archetype: Archetype) -> Self {
        archetype.to_string()
    }
}

impl std::fmt::Display for Archetype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Guard => write!(f, "Guard"),
            Self::Wing => write!(f, "Wing"),
            Self::Big => write!(f, "Big"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_str() {
        assert_eq!("all-time".parse::<Mode>().unwrap(), Mode::AllTime);
        assert_eq!(" Classic ".parse::<Mode>().unwrap(), Mode::Classic);
        assert!("modern".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_serde_names() {
        assert_eq!(serde_json::to_string(&Mode::AllTime).unwrap(), "\"all-time\"");
        let mode: Mode = serde_json::from_str("\"classic\"").unwrap();
        assert_eq!(mode, Mode::Classic);
    }

    #[test]
    fn test_classic_mode_filter() {
        let veteran = PlayerRecord {
            start_year: 2005,
            career_length: 8,
            ..PlayerRecord::default()
        };
        assert!(Mode::AllTime.admits(&veteran));
        assert!(!Mode::Classic.admits(&veteran));

        let modern = PlayerRecord {
            start_year: 2011,
            career_length: 5,
            ..PlayerRecord::default()
        };
        assert!(Mode::Classic.admits(&modern));

        let short_career = PlayerRecord {
            start_year: 2018,
            career_length: 4,
            ..PlayerRecord::default()
        };
        assert!(!Mode::Classic.admits(&short_career));
    }

    #[test]
    fn test_archetype_relation() {
        assert_eq!(
            Archetype::Guard.relation(&Archetype::Guard),
            ArchetypeRelation::Exact
        );
        assert_eq!(
            Archetype::Guard.relation(&Archetype::Wing),
            ArchetypeRelation::Adjacent
        );
        assert_eq!(
            Archetype::Wing.relation(&Archetype::Big),
            ArchetypeRelation::Adjacent
        );
        assert_eq!(
            Archetype::Big.relation(&Archetype::Guard),
            ArchetypeRelation::Adjacent
        );
        assert_eq!(
            Archetype::Guard.relation(&Archetype::default()),
            ArchetypeRelation::Unrelated
        );
        assert_eq!(
            Archetype::default().relation(&Archetype::default()),
            ArchetypeRelation::Unrelated
        );
    }

    #[test]
    fn test_archetype_parses_case_insensitively() {
        assert_eq!(Archetype::from("big".to_string()), Archetype::Big);
        assert_eq!(
            Archetype::from("Stretch".to_string()),
            Archetype::Other("Stretch".to_string())
        );
    }
}
