//! Conversions between human readable decimal amounts (e.g. `"1.5"`) and
//! token atoms.

use {
    alloy::primitives::{
        U256,
        utils::{self, ParseUnits, Unit},
    },
    regex::Regex,
    std::sync::LazyLock,
};

pub trait EthUnit: std::marker::Sized {
    /// Returns the current wei amount.
    fn wei(self) -> U256;

    /// Returns the current Mwei amount as wei (i.e. 1e6 wei).
    fn mwei(self) -> U256 {
        self.wei() * Unit::MWEI.wei()
    }

    /// Returns the current Gwei amount as wei (i.e. 1e9 wei).
    fn gwei(self) -> U256 {
        self.wei() * Unit::GWEI.wei()
    }

    /// Returns the current Eth amount as wei (i.e. 1e18 wei).
    fn eth(self) -> U256 {
        self.wei() * Unit::ETHER.wei()
    }
}

impl EthUnit for u64 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

impl EthUnit for u128 {
    fn wei(self) -> U256 {
        U256::from(self)
    }
}

/// `10^decimals` as a [`U256`].
pub fn exp10(decimals: u8) -> U256 {
    U256::from(10).pow(U256::from(decimals))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("{0:?} is not a valid decimal number")]
    Malformed(String),
    #[error("{value:?} has more than {decimals} decimal places")]
    TooPrecise { value: String, decimals: u8 },
    #[error("{0} decimals are not supported")]
    UnsupportedDecimals(u8),
    #[error("{0:?} does not fit into 256 bits")]
    Overflow(String),
}

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.(\d+))?$").expect("valid regex"));

/// Parses a non-negative decimal string into token atoms with the given
/// number of decimals.
///
/// Unlike a plain float conversion, this never rounds: an amount with more
/// fractional digits than the token supports is rejected.
pub fn parse_units(value: &str, decimals: u8) -> Result<U256, Error> {
    let value = value.trim();
    let captures = DECIMAL
        .captures(value)
        .ok_or_else(|| Error::Malformed(value.to_string()))?;
    let fraction = captures.get(1).map_or(0, |m| m.len());
    if fraction > usize::from(decimals) {
        return Err(Error::TooPrecise {
            value: value.to_string(),
            decimals,
        });
    }
    if Unit::new(decimals).is_none() {
        return Err(Error::UnsupportedDecimals(decimals));
    }
    match utils::parse_units(value, decimals) {
        Ok(ParseUnits::U256(atoms)) => Ok(atoms),
        Ok(ParseUnits::I256(_)) => Err(Error::Malformed(value.to_string())),
        Err(_) => Err(Error::Overflow(value.to_string())),
    }
}

/// Parses an Ether amount into wei.
pub fn parse_ether(value: &str) -> Result<U256, Error> {
    parse_units(value, 18)
}

/// Formats token atoms as a decimal string without trailing zeros, the way
/// amounts are shown to users (`1500000` with 6 decimals is `"1.5"`).
pub fn format_units(amount: U256, decimals: u8) -> String {
    let Ok(formatted) = utils::format_units(amount, decimals) else {
        return amount.to_string();
    };
    if formatted.contains('.') {
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        formatted
    }
}

/// Formats a wei amount as Ether.
pub fn format_ether(amount: U256) -> String {
    format_units(amount, 18)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_amounts() {
        assert_eq!(parse_units("1", 18).unwrap(), 1u64.eth());
        assert_eq!(parse_units("1.5", 6).unwrap(), U256::from(1_500_000));
        assert_eq!(parse_units("0.000777", 18).unwrap(), 777u64.gwei() * U256::from(1_000));
        assert_eq!(parse_units(" 42 ", 0).unwrap(), U256::from(42));
        assert_eq!(parse_units("0.0000000000000001", 18).unwrap(), U256::from(100));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(matches!(parse_units("", 18), Err(Error::Malformed(_))));
        assert!(matches!(parse_units("-1", 18), Err(Error::Malformed(_))));
        assert!(matches!(parse_units("1e18", 18), Err(Error::Malformed(_))));
        assert!(matches!(parse_units("1.", 18), Err(Error::Malformed(_))));
        assert!(matches!(parse_units("abc", 18), Err(Error::Malformed(_))));
    }

    #[test]
    fn rejects_excess_precision() {
        assert_eq!(
            parse_units("1.0000001", 6),
            Err(Error::TooPrecise {
                value: "1.0000001".to_string(),
                decimals: 6
            })
        );
        assert!(parse_units("1.5", 0).is_err());
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_units(U256::from(1_500_000), 6), "1.5");
        assert_eq!(format_units(U256::from(1_000_000), 6), "1");
        assert_eq!(format_ether(U256::from(100)), "0.0000000000000001");
        assert_eq!(format_ether(U256::ZERO), "0");
        assert_eq!(format_units(U256::from(70), 0), "70");
    }

    #[test]
    fn rejects_unsupported_decimals() {
        assert_eq!(parse_units("1", 78), Err(Error::UnsupportedDecimals(78)));
        assert_eq!(format_units(U256::from(5), 78), "5");
    }

    #[test]
    fn units() {
        assert_eq!(1u64.gwei(), exp10(9));
        assert_eq!(2u128.eth(), U256::from(2) * exp10(18));
        assert_eq!(3u64.mwei(), U256::from(3_000_000));
    }
}
