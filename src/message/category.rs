use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Partition of an actor's queue. Messages of different categories are bundled
/// independently of each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MessageCategory {
    Aggregations,
    WholesaleResults,
    MasterData,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 3] = [
        MessageCategory::Aggregations,
        MessageCategory::WholesaleResults,
        MessageCategory::MasterData,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MessageCategory::Aggregations => "Aggregations",
            MessageCategory::WholesaleResults => "WholesaleResults",
            MessageCategory::MasterData => "MasterData",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseError::Category(value.to_string()))
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MessageCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
