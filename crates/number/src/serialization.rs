use {
    alloy::primitives::U256,
    serde::{
        Deserializer,
        Serializer,
        de::{self, Visitor},
    },
    serde_with::{DeserializeAs, SerializeAs},
    std::fmt,
};

/// Serialize [`U256`] as a decimal string and deserialize [`U256`] from a
/// decimal string, a 0x prefixed hex string or a JSON number.
///
/// Aggregator APIs are inconsistent about how they encode amounts, so DTOs
/// use this with `#[serde_as(as = "HexOrDecimalU256")]`.
pub struct HexOrDecimalU256;

impl<'de> DeserializeAs<'de, U256> for HexOrDecimalU256 {
    fn deserialize_as<D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U256Visitor;

        impl Visitor<'_> for U256Visitor {
            type Value = U256;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(
                    formatter,
                    "a u256 encoded either as 0x hex prefixed or decimal encoded string"
                )
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let s = s.trim();
                if let Some(hex) = s.strip_prefix("0x") {
                    U256::from_str_radix(hex, 16).map_err(|err| {
                        E::custom(format!("failed to decode {s:?} as hex u256: {err}"))
                    })
                } else {
                    U256::from_str_radix(s, 10).map_err(|err| {
                        E::custom(format!("failed to decode {s:?} as decimal u256: {err}"))
                    })
                }
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(U256::from(v))
            }
        }

        deserializer.deserialize_any(U256Visitor)
    }
}

impl SerializeAs<U256> for HexOrDecimalU256 {
    fn serialize_as<S>(source: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        serde::{Deserialize, Serialize},
        serde_json::json,
        serde_with::serde_as,
    };

    #[serde_as]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Amount(#[serde_as(as = "HexOrDecimalU256")] U256);

    #[test]
    fn deserializes_all_encodings() {
        assert_eq!(
            serde_json::from_value::<Amount>(json!("0x10")).unwrap(),
            Amount(U256::from(16))
        );
        assert_eq!(
            serde_json::from_value::<Amount>(json!("10")).unwrap(),
            Amount(U256::from(10))
        );
        assert_eq!(
            serde_json::from_value::<Amount>(json!(10)).unwrap(),
            Amount(U256::from(10))
        );
        assert!(serde_json::from_value::<Amount>(json!("ten")).is_err());
        assert!(serde_json::from_value::<Amount>(json!(-1)).is_err());
    }

    #[test]
    fn serializes_as_decimal_string() {
        assert_eq!(
            serde_json::to_value(Amount(U256::from(255))).unwrap(),
            json!("255")
        );
    }
}
