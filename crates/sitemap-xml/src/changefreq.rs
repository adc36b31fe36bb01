//! Change-frequency hints from the sitemaps.org protocol.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// How often a page is expected to change.
///
/// The protocol defines exactly seven tokens; they serialize verbatim as
/// `<changefreq>` element text. The closed enum makes any other token
/// unrepresentable, and [`FromStr`] rejects anything else at parse time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// Protocol token for this value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFreq {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "always" => Self::Always,
            "hourly" => Self::Hourly,
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            "yearly" => Self::Yearly,
            "never" => Self::Never,
            _ => {
                return Err(ParseError::ChangeFreq {
                    value: s.to_owned(),
                });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [ChangeFreq; 7] = [
        ChangeFreq::Always,
        ChangeFreq::Hourly,
        ChangeFreq::Daily,
        ChangeFreq::Weekly,
        ChangeFreq::Monthly,
        ChangeFreq::Yearly,
        ChangeFreq::Never,
    ];

    #[test]
    fn test_tokens_round_trip() {
        for freq in ALL {
            assert_eq!(freq.as_str().parse::<ChangeFreq>().unwrap(), freq);
        }
    }

    #[test]
    fn test_display_matches_token() {
        assert_eq!(ChangeFreq::Monthly.to_string(), "monthly");
        assert_eq!(ChangeFreq::Never.to_string(), "never");
    }

    #[test]
    fn test_rejects_unknown_token() {
        let err = "sometimes".parse::<ChangeFreq>().unwrap_err();
        assert!(matches!(err, ParseError::ChangeFreq { value } if value == "sometimes"));
    }

    #[test]
    fn test_rejects_wrong_case() {
        assert!("Monthly".parse::<ChangeFreq>().is_err());
    }
}
