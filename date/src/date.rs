// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! The closed set of formal date variants and top level dispatch.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::approximate::{ApproximateDate, parse_approximate};
use crate::duration::{Duration, parse_duration};
use crate::error::ParseError;
use crate::lexer::{Token, tokenize};
use crate::options::ParseOptions;
use crate::range::{DateRange, parse_range};
use crate::recurring::{RecurringDate, parse_recurring};
use crate::scanner::Cursor;
use crate::simple::{SimpleDate, parse_simple};

/// Any formal date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GedcomxDate {
    /// `+1999-05-12T10:30:00Z`
    Simple(SimpleDate),

    /// `A+1999`
    Approximate(ApproximateDate),

    /// `+1999/+2000`, `+1999/P1Y`, `/+2000`
    Range(DateRange),

    /// `R3/+2000/P1Y`
    Recurring(RecurringDate),

    /// `P1Y2M3D`
    Duration(Duration),
}

/// Variant of a [`GedcomxDate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum DateKind {
    /// A simple date
    Simple,
    /// An approximate date
    Approximate,
    /// A range
    Range,
    /// A recurring date
    Recurring,
    /// A duration
    Duration,
}

impl GedcomxDate {
    /// Parse any formal date string with explicit options.
    ///
    /// The variant is chosen by the first match of: a leading `R`, any `/`, a
    /// leading `A`, a leading `P`. Anything else is parsed as a simple date.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] naming the production and the sub-part that
    /// failed.
    pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let tokens = tokenize(src);
        let kind = match tokens.first().map(|t| t.0) {
            Some(Token::Repeat) => DateKind::Recurring,
            _ if tokens.iter().any(|t| t.0 == Token::Slash) => DateKind::Range,
            Some(Token::Approximate) => DateKind::Approximate,
            Some(Token::Period) => DateKind::Duration,
            _ => DateKind::Simple,
        };
        tracing::trace!(src, %kind, "dispatch formal date");

        let mut cursor = Cursor::new(&tokens, src.len());
        Ok(match kind {
            DateKind::Recurring => Self::Recurring(parse_recurring(&tokens, src.len(), options)?),
            DateKind::Range => Self::Range(parse_range(&tokens, src.len(), options)?),
            DateKind::Approximate => Self::Approximate(parse_approximate(&mut cursor, options)?),
            DateKind::Duration => Self::Duration(parse_duration(&mut cursor)?),
            DateKind::Simple => Self::Simple(parse_simple(&mut cursor, options)?),
        })
    }

    /// The variant of this date.
    #[must_use]
    pub const fn kind(&self) -> DateKind {
        match self {
            Self::Simple(_) => DateKind::Simple,
            Self::Approximate(_) => DateKind::Approximate,
            Self::Range(_) => DateKind::Range,
            Self::Recurring(_) => DateKind::Recurring,
            Self::Duration(_) => DateKind::Duration,
        }
    }

    /// Whether the date carries the approximate flag.
    #[must_use]
    pub const fn is_approximate(&self) -> bool {
        match self {
            Self::Approximate(_) => true,
            Self::Range(range) => range.is_approximate(),
            Self::Recurring(recurring) => recurring.is_approximate(),
            Self::Simple(_) | Self::Duration(_) => false,
        }
    }

    /// The simple date, if this is one.
    #[must_use]
    pub const fn as_simple(&self) -> Option<&SimpleDate> {
        match self {
            Self::Simple(date) => Some(date),
            _ => None,
        }
    }

    /// The approximate date, if this is one.
    #[must_use]
    pub const fn as_approximate(&self) -> Option<&ApproximateDate> {
        match self {
            Self::Approximate(date) => Some(date),
            _ => None,
        }
    }

    /// The range, if this is one.
    #[must_use]
    pub const fn as_range(&self) -> Option<&DateRange> {
        match self {
            Self::Range(range) => Some(range),
            _ => None,
        }
    }

    /// The recurring date, if this is one.
    #[must_use]
    pub const fn as_recurring(&self) -> Option<&RecurringDate> {
        match self {
            Self::Recurring(recurring) => Some(recurring),
            _ => None,
        }
    }

    /// The duration, if this is one.
    #[must_use]
    pub const fn as_duration(&self) -> Option<&Duration> {
        match self {
            Self::Duration(duration) => Some(duration),
            _ => None,
        }
    }

    /// Formal string for this date.
    #[must_use]
    pub fn to_formal_string(&self) -> String {
        self.to_string()
    }
}

impl Display for GedcomxDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple(date) => date.fmt(f),
            Self::Approximate(date) => date.fmt(f),
            Self::Range(range) => range.fmt(f),
            Self::Recurring(recurring) => recurring.fmt(f),
            Self::Duration(duration) => duration.fmt(f),
        }
    }
}

impl FromStr for GedcomxDate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        $(
            impl From<$ty> for GedcomxDate {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_variant!(
    Simple(SimpleDate),
    Approximate(ApproximateDate),
    Range(DateRange),
    Recurring(RecurringDate),
    Duration(Duration),
);

#[cfg(feature = "serde")]
mod serde_impls {
    //! Every date type serializes as its formal string.

    use std::borrow::Cow;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{ApproximateDate, DateRange, Duration, GedcomxDate, RecurringDate, SimpleDate};
    use crate::simple::UtcOffset;

    macro_rules! impl_formal_string_serde {
        ($($ty:ty),* $(,)?) => {
            $(
                impl Serialize for $ty {
                    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                        serializer.collect_str(self)
                    }
                }

                impl<'de> Deserialize<'de> for $ty {
                    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                        let s = Cow::<'de, str>::deserialize(deserializer)?;
                        s.parse().map_err(D::Error::custom)
                    }
                }
            )*
        };
    }

    impl_formal_string_serde!(
        GedcomxDate,
        SimpleDate,
        ApproximateDate,
        DateRange,
        RecurringDate,
        Duration,
        UtcOffset,
    );
}
