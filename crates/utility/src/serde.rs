/// Deserializers for optional query parameters, where `?state_code=` should
/// behave like an omitted parameter rather than a filter on the empty string.
pub mod empty_as_none {
    use std::{fmt::Display, str::FromStr};

    use serde::{de::Error, Deserialize as _, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
        T::Err: Display,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse::<T>().map(Some).map_err(Error::custom),
        }
    }
}

/// Lenient boolean query flags: `true/false`, `1/0`, `yes/no`, `on/off`.
pub mod flag {
    use serde::{de::Error, Deserialize as _, Deserializer};

    pub fn parse(value: &str) -> Option<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" | "on" => Some(true),
            "false" | "0" | "no" | "n" | "off" => Some(false),
            _ => None,
        }
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse(value)
                .map(Some)
                .ok_or_else(|| Error::custom(format!("invalid boolean flag: {value}"))),
        }
    }
}

pub mod date {
    use core::fmt;

    use chrono::NaiveDate;
    use serde::{
        de::{self, IntoDeserializer, Unexpected, Visitor},
        Deserialize as _, Deserializer,
    };

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DateVisitor;

        impl<'de> Visitor<'de> for DateVisitor {
            type Value = NaiveDate;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string in the format YYYY-MM-DD")
            }

            fn visit_str<E>(self, value: &str) -> Result<NaiveDate, E>
            where
                E: de::Error,
            {
                NaiveDate::parse_from_str(value.trim(), FORMAT).map_err(|_| {
                    de::Error::invalid_value(Unexpected::Str(value), &self)
                })
            }
        }

        deserializer.deserialize_str(DateVisitor)
    }

    pub fn deserialize_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => deserialize(s.into_deserializer()).map(Some),
        }
    }
}
