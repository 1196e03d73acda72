//! Withdrawal network identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an invalid network identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid network identifier: {reason}")]
pub struct InvalidNetwork {
    reason: &'static str,
}

/// An interbank network identifier such as `BANELCO` or `LINK`.
///
/// Identifiers are non-empty and made of uppercase ASCII letters, digits,
/// `-` or `_`. The set of networks a deployment actually serves is
/// configuration, not part of this type.
///
/// # Examples
///
/// ```
/// use atm_finder::domain::Network;
///
/// let link = Network::parse("LINK").unwrap();
/// assert_eq!(link.as_str(), "LINK");
///
/// // Strict parsing rejects lowercase, normalized parsing accepts it
/// assert!(Network::parse("link").is_err());
/// assert_eq!(Network::parse_normalized(" link ").unwrap(), link);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Network(String);

impl Network {
    /// Parse a network identifier exactly as given.
    pub fn parse(s: &str) -> Result<Self, InvalidNetwork> {
        if s.is_empty() {
            return Err(InvalidNetwork {
                reason: "must not be empty",
            });
        }

        let valid = s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !valid {
            return Err(InvalidNetwork {
                reason: "must be uppercase ASCII letters, digits, '-' or '_'",
            });
        }

        Ok(Network(s.to_string()))
    }

    /// Parse user or dataset input: surrounding whitespace is trimmed and
    /// letters are uppercased before validation.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidNetwork> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Network {
    type Error = InvalidNetwork;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Network> for String {
    fn from(network: Network) -> Self {
        network.0
    }
}

impl fmt::Debug for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Network({})", self.0)
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
