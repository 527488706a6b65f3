//! Self-validating value objects for the zoo domain.
//!
//! Every constructor validates its input and returns a [`ValidationError`]
//! naming the offending field. Closed enumerations are only built through
//! [`FromStr`], so there is no way to obtain an out-of-range variant.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A string that is not empty and not whitespace only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Validates `value`, reporting failures against `field`.
    pub fn new(field: &'static str, value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::EmptyString { field });
        }
        Ok(Self(value))
    }

    /// Returns the string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new("value", value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A strictly positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct PositiveInteger(u32);

impl PositiveInteger {
    /// Validates `value`, reporting failures against `field`.
    pub fn new(field: &'static str, value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NotPositive { field, value });
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::TooLarge { field, value })
    }

    /// Returns the wrapped value.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for PositiveInteger {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new("value", value)
    }
}

impl From<PositiveInteger> for u32 {
    fn from(value: PositiveInteger) -> Self {
        value.0
    }
}

impl fmt::Display for PositiveInteger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declares a closed enumeration parsed from its exact variant name.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $field:literal {
            $($(#[$vmeta:meta])* $variant:ident),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// All variants in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Returns the canonical variant name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant)),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s == stringify!($variant) {
                        return Ok($name::$variant);
                    }
                )+
                Err(ValidationError::UnknownVariant {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }
    };
}

closed_enum! {
    /// Category of animal an enclosure can accept.
    AnimalType as "animal type" {
        Predator,
        Herbivore,
        Bird,
        Aquatic,
    }
}

closed_enum! {
    /// Gender of an animal.
    Gender as "gender" {
        Male,
        Female,
    }
}

closed_enum! {
    /// Health status of an animal.
    HealthStatus as "health status" {
        Healthy,
        Sick,
    }
}

/// Species of an animal: a name plus the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Species {
    name: NonEmptyString,
    animal_type: AnimalType,
}

impl Species {
    pub fn new(name: NonEmptyString, animal_type: AnimalType) -> Self {
        Self { name, animal_type }
    }

    pub fn name(&self) -> &NonEmptyString {
        &self.name
    }

    pub fn animal_type(&self) -> AnimalType {
        self.animal_type
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.animal_type)
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date, used for birth dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }
}

impl FromStr for BirthDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| ValidationError::Format {
                field: "birth date",
                value: s.to_string(),
                expected: "YYYY-MM-DD",
            })
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A time of day at which a feeding happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedingTime(NaiveTime);

impl FeedingTime {
    pub fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Builds a time from hour and minute.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| ValidationError::Format {
                field: "feeding time",
                value: format!("{hour}:{minute}"),
                expected: "hour 0-23 and minute 0-59",
            })
    }

    pub fn value(&self) -> NaiveTime {
        self.0
    }
}

impl FromStr for FeedingTime {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
            .map(Self)
            .map_err(|_| ValidationError::Format {
                field: "feeding time",
                value: s.to_string(),
                expected: "HH:MM or HH:MM:SS",
            })
    }
}

impl fmt::Display for FeedingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}
