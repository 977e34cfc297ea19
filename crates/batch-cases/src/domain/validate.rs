//! Input validation. Every input of a case declares a [`Validator`] that is
//! checked before anything is rendered.

use {
    alloy::primitives::{Address, U256},
    number::{serialization::HexOrDecimalU256, units},
    regex::Regex,
    serde::Serialize,
    serde_with::serde_as,
    std::sync::LazyLock,
};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Validator {
    /// A non-zero token amount with at most `decimals` fractional digits.
    /// The bounds are in base units and inclusive.
    #[serde(rename_all = "camelCase")]
    Decimal {
        decimals: u8,
        #[serde_as(as = "HexOrDecimalU256")]
        min: U256,
        #[serde_as(as = "Option<HexOrDecimalU256>")]
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<U256>,
    },
    /// A whole number, e.g. how many NFTs to mint.
    Integer { min: u64, max: Option<u64> },
    /// Any decimal number within inclusive bounds, e.g. a multiplier.
    Number { min: f64, max: f64 },
    Address,
    /// Comma separated addresses, at most `max` of them.
    Addresses { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct Error(pub String);

static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").expect("valid regex"));

impl Validator {
    /// A token amount of at least `min` base units.
    pub fn decimal(decimals: u8, min: U256) -> Self {
        Self::Decimal {
            decimals,
            min,
            max: None,
        }
    }

    pub fn decimal_between(decimals: u8, min: U256, max: U256) -> Self {
        Self::Decimal {
            decimals,
            min,
            max: Some(max),
        }
    }

    pub fn validate(&self, value: &str) -> Result<(), Error> {
        let value = value.trim();
        match self {
            Self::Decimal { decimals, min, max } => {
                let amount = units::parse_units(value, *decimals).map_err(|err| match err {
                    units::Error::TooPrecise { decimals, .. } => {
                        Error(format!("Maximum {decimals} decimal places"))
                    }
                    _ => Error("Invalid number".to_owned()),
                })?;
                if amount.is_zero() {
                    return Err(Error("Amount must be greater than 0".to_owned()));
                }
                if amount < *min {
                    return Err(Error(format!(
                        "Amount must be greater than or equal to {}",
                        units::format_units(*min, *decimals)
                    )));
                }
                if let Some(max) = max.filter(|max| amount > *max) {
                    return Err(Error(format!(
                        "Amount must be less than or equal to {}",
                        units::format_units(max, *decimals)
                    )));
                }
                Ok(())
            }
            Self::Integer { min, max } => {
                let number = value
                    .parse::<u64>()
                    .map_err(|_| Error("Invalid integer".to_owned()))?;
                if number < *min {
                    return Err(Error(format!(
                        "Number must be greater than or equal to {min}"
                    )));
                }
                if let Some(max) = max.filter(|max| number > *max) {
                    return Err(Error(format!("Number must be less than or equal to {max}")));
                }
                Ok(())
            }
            Self::Number { min, max } => {
                if !NUMBER.is_match(value) {
                    return Err(Error("Invalid number".to_owned()));
                }
                let number = value
                    .parse::<f64>()
                    .map_err(|_| Error("Invalid number".to_owned()))?;
                if number < *min {
                    return Err(Error(format!(
                        "Number must be greater than or equal to {min}"
                    )));
                }
                if number > *max {
                    return Err(Error(format!("Number must be less than or equal to {max}")));
                }
                Ok(())
            }
            Self::Address => value
                .parse::<Address>()
                .map(|_| ())
                .map_err(|_| Error("Invalid address".to_owned())),
            Self::Addresses { max } => addresses(value, *max).map(|_| ()),
        }
    }
}

/// Parses a comma separated list of addresses. Empty entries are skipped.
pub fn addresses(value: &str, max: usize) -> Result<Vec<Address>, Error> {
    let addresses = value
        .split(',')
        .map(str::trim)
        .filter(|address| !address.is_empty())
        .map(|address| {
            address
                .parse::<Address>()
                .map_err(|_| Error("Recipients contain invalid address(es)".to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if addresses.is_empty() {
        return Err(Error("No recipients".to_owned()));
    }
    if addresses.len() > max {
        return Err(Error(format!("The recipients exceeds the limit of {max}")));
    }
    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use {super::*, number::units::EthUnit};

    #[test]
    fn decimal_amounts() {
        let validator = Validator::decimal(6, U256::ZERO);
        assert_eq!(validator.validate("1.5"), Ok(()));
        assert_eq!(validator.validate(" 100 "), Ok(()));
        assert_eq!(validator.validate("0"), Err(Error("Amount must be greater than 0".into())));
        assert_eq!(validator.validate("1.0000001"), Err(Error("Maximum 6 decimal places".into())));
        assert_eq!(validator.validate("-1"), Err(Error("Invalid number".into())));
        assert_eq!(validator.validate("1e6"), Err(Error("Invalid number".into())));
        assert_eq!(validator.validate(""), Err(Error("Invalid number".into())));
    }

    #[test]
    fn decimal_bounds() {
        let validator = Validator::decimal(18, 2u64.eth() / U256::from(100));
        assert_eq!(
            validator.validate("0.01"),
            Err(Error("Amount must be greater than or equal to 0.02".into()))
        );
        assert_eq!(validator.validate("0.02"), Ok(()));

        let percentage = Validator::decimal_between(0, U256::ZERO, U256::from(70));
        assert_eq!(percentage.validate("70"), Ok(()));
        assert_eq!(
            percentage.validate("71"),
            Err(Error("Amount must be less than or equal to 70".into()))
        );
        assert_eq!(percentage.validate("7.5"), Err(Error("Maximum 0 decimal places".into())));
    }

    #[test]
    fn numbers() {
        let validator = Validator::Number { min: 1., max: 5. };
        assert_eq!(validator.validate("2.5"), Ok(()));
        assert_eq!(validator.validate("5"), Ok(()));
        assert_eq!(
            validator.validate("0.5"),
            Err(Error("Number must be greater than or equal to 1".into()))
        );
        assert_eq!(
            validator.validate("5.1"),
            Err(Error("Number must be less than or equal to 5".into()))
        );
        assert_eq!(validator.validate("2."), Err(Error("Invalid number".into())));
    }

    #[test]
    fn integers_and_addresses() {
        let validator = Validator::Integer { min: 1, max: None };
        assert_eq!(validator.validate("3"), Ok(()));
        assert!(validator.validate("0").is_err());
        assert!(validator.validate("1.5").is_err());

        assert_eq!(
            Validator::Address.validate("0x80011844928B469EAc5E4bC7e6EBA9b3C2Fa1b41"),
            Ok(())
        );
        assert!(Validator::Address.validate("0x1234").is_err());
    }

    #[test]
    fn address_lists() {
        let list = "0x80011844928B469EAc5E4bC7e6EBA9b3C2Fa1b41, ,\
                    0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045,";
        assert_eq!(addresses(list, 30).unwrap().len(), 2);
        assert_eq!(
            addresses(list, 1),
            Err(Error("The recipients exceeds the limit of 1".into()))
        );
        assert_eq!(
            Validator::Addresses { max: 30 }.validate("0x8001, 0xd8dA"),
            Err(Error("Recipients contain invalid address(es)".into()))
        );
        assert_eq!(addresses(" , ", 30), Err(Error("No recipients".into())));
    }
}
