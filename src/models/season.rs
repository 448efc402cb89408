use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Last week of the regular season; used when the schedule cannot tell us
/// which week is current.
pub const MAX_REGULAR_SEASON_WEEK: i32 = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeasonType {
    #[serde(rename = "REG", alias = "reg")]
    Regular,
    #[serde(rename = "PRE", alias = "pre")]
    Preseason,
    #[serde(rename = "POST", alias = "post")]
    Postseason,
}

impl SeasonType {
    /// Numeric `SeasonType` used inside upstream documents.
    pub fn code(self) -> i32 {
        match self {
            SeasonType::Regular => 1,
            SeasonType::Preseason => 2,
            SeasonType::Postseason => 3,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            SeasonType::Regular => "REG",
            SeasonType::Preseason => "PRE",
            SeasonType::Postseason => "POST",
        }
    }
}

impl FromStr for SeasonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REG" => Ok(SeasonType::Regular),
            "PRE" => Ok(SeasonType::Preseason),
            "POST" => Ok(SeasonType::Postseason),
            other => Err(format!("unknown season type '{other}' (expected REG, PRE or POST)")),
        }
    }
}

/// A season year plus its phase, e.g. `2023REG`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Season {
    pub year: i32,
    pub kind: SeasonType,
}

impl Season {
    pub fn new(year: i32, kind: SeasonType) -> Self {
        Self { year, kind }
    }

    /// Path parameter form expected by the season-scoped endpoints.
    pub fn param(&self) -> String {
        format!("{}{}", self.year, self.kind.suffix())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.kind.suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_param() {
        assert_eq!(Season::new(2023, SeasonType::Regular).param(), "2023REG");
        assert_eq!(Season::new(2024, SeasonType::Postseason).to_string(), "2024POST");
    }

    #[test]
    fn test_season_type_parsing() {
        assert_eq!("reg".parse::<SeasonType>(), Ok(SeasonType::Regular));
        assert_eq!(" PRE ".parse::<SeasonType>(), Ok(SeasonType::Preseason));
        assert!("playoffs".parse::<SeasonType>().is_err());
        assert_eq!(SeasonType::Postseason.code(), 3);
    }
}
