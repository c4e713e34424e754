use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Exchange-qualified ticker symbol, trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Parse and normalize user or provider input.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::TickerContainsWhitespace {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Parse a directory token such as `ABC:US`, dropping the annotation
    /// after the first colon.
    pub fn from_listing_token(token: &str) -> Result<Self, ValidationError> {
        let symbol = token.split(':').next().unwrap_or_default();
        Self::parse(symbol)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Ticker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Ticker {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Ticker> for String {
    fn from(value: Ticker) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_ticker() {
        let parsed = Ticker::parse(" ry.to ").expect("ticker should parse");
        assert_eq!(parsed.as_str(), "RY.TO");
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(Ticker::parse("   "), Err(ValidationError::EmptyTicker));
    }

    #[test]
    fn rejects_inner_whitespace() {
        let err = Ticker::parse("ABC DEF").expect_err("must fail");
        assert!(matches!(err, ValidationError::TickerContainsWhitespace { .. }));
    }

    #[test]
    fn listing_token_drops_colon_annotation() {
        let parsed = Ticker::from_listing_token("ABC:US").expect("token should parse");
        assert_eq!(parsed.as_str(), "ABC");

        let plain = Ticker::from_listing_token("BBD.B").expect("token should parse");
        assert_eq!(plain.as_str(), "BBD.B");
    }

    #[test]
    fn listing_token_with_only_annotation_is_empty() {
        assert_eq!(
            Ticker::from_listing_token(":US"),
            Err(ValidationError::EmptyTicker)
        );
    }
}
