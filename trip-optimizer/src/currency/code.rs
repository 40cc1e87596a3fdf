//! Currency code types.

use std::fmt;

/// Error returned when parsing an invalid currency code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid currency code: {reason}")]
pub struct InvalidCurrency {
    reason: &'static str,
}

/// A valid ISO 4217 three-letter currency code.
///
/// Codes are always 3 uppercase ASCII letters, so any `CurrencyCode`
/// value is valid by construction.
///
/// # Examples
///
/// ```
/// use trip_optimizer::currency::CurrencyCode;
///
/// let usd = CurrencyCode::parse("USD").unwrap();
/// assert_eq!(usd.as_str(), "USD");
///
/// // Lowercase is rejected
/// assert!(CurrencyCode::parse("usd").is_err());
///
/// // Wrong length is rejected
/// assert!(CurrencyCode::parse("US").is_err());
/// assert!(CurrencyCode::parse("USDT").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyCode([u8; 3]);

impl CurrencyCode {
    /// The US dollar, the quote currency SerpApi prices default to.
    pub const USD: CurrencyCode = CurrencyCode(*b"USD");

    /// Parse a currency code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCurrency> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCurrency {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCurrency {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(CurrencyCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Construction only ever stores ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CurrencyCode({})", self.as_str())
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered conversion pair: how many units of `quote` one unit of
/// `base` buys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    /// Currency being converted from.
    pub base: CurrencyCode,
    /// Currency being converted into.
    pub quote: CurrencyCode,
}

impl CurrencyPair {
    /// Create a pair converting `base` into `quote`.
    pub fn new(base: CurrencyCode, quote: CurrencyCode) -> Self {
        Self { base, quote }
    }
}

/// Formats as the Google Finance query form, e.g. `USD-BRL`.
impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.base, self.quote)
    }
}

impl std::str::FromStr for CurrencyPair {
    type Err = InvalidCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (base, quote) = s.split_once('-').ok_or(InvalidCurrency {
            reason: "expected a BASE-QUOTE pair like USD-BRL",
        })?;
        Ok(CurrencyPair::new(
            CurrencyCode::parse(base)?,
            CurrencyCode::parse(quote)?,
        ))
    }
}
