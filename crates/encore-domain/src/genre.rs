//! Track genre.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Musical genre attached to tracks and albums.
///
/// Declaration order is the canonical genre order: `Ord` follows it, and the
/// recommendation ranking uses it to break ties between equal listen sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Genre {
    Pop,
    Rock,
    Jazz,
    Blues,
    HipHop,
    Classical,
    Electronic,
    Country,
    Reggae,
    Metal,
    Folk,
    Rnb,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl Genre {
    pub const ALL: [Genre; 12] = [
        Genre::Pop,
        Genre::Rock,
        Genre::Jazz,
        Genre::Blues,
        Genre::HipHop,
        Genre::Classical,
        Genre::Electronic,
        Genre::Country,
        Genre::Reggae,
        Genre::Metal,
        Genre::Folk,
        Genre::Rnb,
    ];

    /// Storage and wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pop => "POP",
            Self::Rock => "ROCK",
            Self::Jazz => "JAZZ",
            Self::Blues => "BLUES",
            Self::HipHop => "HIP_HOP",
            Self::Classical => "CLASSICAL",
            Self::Electronic => "ELECTRONIC",
            Self::Country => "COUNTRY",
            Self::Reggae => "REGGAE",
            Self::Metal => "METAL",
            Self::Folk => "FOLK",
            Self::Rnb => "RNB",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGenre(s.to_owned()))
    }
}
