//! Lecture category value object

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Subject area of a lecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LectureCategory {
    ComputerScience,
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    Literature,
    History,
    #[default]
    Other,
}

impl LectureCategory {
    /// Wire/storage representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ComputerScience => "computer-science",
            Self::Mathematics => "mathematics",
            Self::Physics => "physics",
            Self::Chemistry => "chemistry",
            Self::Biology => "biology",
            Self::Literature => "literature",
            Self::History => "history",
            Self::Other => "other",
        }
    }

    /// All categories in display order
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::ComputerScience,
            Self::Mathematics,
            Self::Physics,
            Self::Chemistry,
            Self::Biology,
            Self::Literature,
            Self::History,
            Self::Other,
        ]
    }
}

impl fmt::Display for LectureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LectureCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCategory(s.to_string()))
    }
}
