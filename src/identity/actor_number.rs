use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Market participant number: a 13-digit GLN or a 16-character EIC code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ActorNumber(String);

impl ActorNumber {
    const GLN_LENGTH: usize = 13;
    const EIC_LENGTH: usize = 16;

    pub fn parse(value: impl AsRef<str>) -> Result<Self, ParseError> {
        let value = value.as_ref().trim();
        let valid = match value.len() {
            Self::GLN_LENGTH => value.bytes().all(|b| b.is_ascii_digit()),
            Self::EIC_LENGTH => value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-'),
            _ => false,
        };

        if valid {
            Ok(ActorNumber(value.to_string()))
        } else {
            Err(ParseError::ActorNumber(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_gln(&self) -> bool {
        self.0.len() == Self::GLN_LENGTH
    }

    pub fn is_eic(&self) -> bool {
        self.0.len() == Self::EIC_LENGTH
    }
}

impl fmt::Display for ActorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ActorNumber {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ActorNumber {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ActorNumber> for String {
    fn from(number: ActorNumber) -> Self {
        number.0
    }
}
