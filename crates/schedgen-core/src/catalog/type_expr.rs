//! Type expressions used by catalog bodies, responses and domain types.
//!
//! Catalog files spell types as short TypeScript-like strings (`Booking[]`,
//! `Array<{ name: string }>`, `boolean`). They are parsed exactly once, while
//! the catalog loads, into the closed [`TypeExpr`] variant so that projection
//! never has to inspect strings again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Business entities that generated code references through the types namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DomainType {
    User,
    Availability,
    RecurringAvailability,
    AvailabilityException,
    Booking,
    Account,
}

impl DomainType {
    /// Returns the type name as it appears in generated code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Availability => "Availability",
            Self::RecurringAvailability => "RecurringAvailability",
            Self::AvailabilityException => "AvailabilityException",
            Self::Booking => "Booking",
            Self::Account => "Account",
        }
    }

    /// Returns an iterator over the whole registry
    pub fn all() -> impl Iterator<Item = Self> {
        use DomainType::*;
        [
            User,
            Availability,
            RecurringAvailability,
            AvailabilityException,
            Booking,
            Account,
        ]
        .iter()
        .copied()
    }
}

impl FromStr for DomainType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown domain type: {}", s))
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// String-literal unions exported next to the domain types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumType {
    DayOfWeek,
}

impl EnumType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DayOfWeek => "DayOfWeek",
        }
    }

    /// Literal members of the union, in declaration order
    pub fn values(&self) -> &'static [&'static str] {
        match self {
            Self::DayOfWeek => &[
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
            ],
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        [EnumType::DayOfWeek].iter().copied()
    }
}

impl FromStr for EnumType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| format!("Unknown enum type: {}", s))
    }
}

/// Primitive TypeScript types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    String,
    Number,
    Boolean,
}

impl Scalar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl FromStr for Scalar {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" => Ok(Self::Boolean),
            _ => Err(format!("Unknown scalar type: {}", s)),
        }
    }
}

/// How an array type was spelled in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStyle {
    /// `Element[]`
    Suffix,
    /// `Array<Element>`
    Generic,
}

/// A parsed catalog type expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeExpr {
    Scalar(Scalar),
    Domain(DomainType),
    Enum(EnumType),
    /// Any other bare name or union, carried verbatim
    Named(String),
    Array {
        element: Box<TypeExpr>,
        style: ArrayStyle,
    },
    /// Inline structural literal `{ ... }`, carried verbatim
    Inline(String),
}

impl TypeExpr {
    /// Parse a catalog type expression
    pub fn parse(raw: &str) -> Result<Self> {
        let expr = raw.trim();
        if expr.is_empty() {
            return Err(Error::catalog("empty type expression"));
        }

        if let Some(base) = expr.strip_suffix("[]") {
            return Ok(Self::Array {
                element: Box::new(Self::parse(base)?),
                style: ArrayStyle::Suffix,
            });
        }

        if let Some(rest) = expr.strip_prefix("Array<") {
            let inner = rest.strip_suffix('>').ok_or_else(|| {
                Error::catalog(format!("unterminated Array<...> in type expression '{}'", expr))
            })?;
            return Ok(Self::Array {
                element: Box::new(Self::parse(inner)?),
                style: ArrayStyle::Generic,
            });
        }

        if expr.starts_with('{') || expr.ends_with('}') {
            if !(expr.starts_with('{') && expr.ends_with('}')) {
                return Err(Error::catalog(format!(
                    "unbalanced structural type expression '{}'",
                    expr
                )));
            }
            return Ok(Self::Inline(expr.to_string()));
        }

        if let Ok(scalar) = expr.parse::<Scalar>() {
            return Ok(Self::Scalar(scalar));
        }
        if let Ok(domain) = expr.parse::<DomainType>() {
            return Ok(Self::Domain(domain));
        }
        if let Ok(enum_type) = expr.parse::<EnumType>() {
            return Ok(Self::Enum(enum_type));
        }

        Ok(Self::Named(expr.to_string()))
    }

    /// The domain type this expression refers to, directly or as an array element
    pub fn domain(&self) -> Option<DomainType> {
        match self {
            Self::Domain(d) => Some(*d),
            Self::Array { element, .. } => match element.as_ref() {
                Self::Domain(d) => Some(*d),
                _ => None,
            },
            _ => None,
        }
    }
}

impl FromStr for TypeExpr {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TypeExpr {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<TypeExpr> for String {
    fn from(value: TypeExpr) -> Self {
        value.to_string()
    }
}

/// Writes the expression back in its catalog spelling.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => f.write_str(s.as_str()),
            Self::Domain(d) => f.write_str(d.as_str()),
            Self::Enum(e) => f.write_str(e.as_str()),
            Self::Named(raw) | Self::Inline(raw) => f.write_str(raw),
            Self::Array {
                element,
                style: ArrayStyle::Suffix,
            } => write!(f, "{}[]", element),
            Self::Array {
                element,
                style: ArrayStyle::Generic,
            } => write!(f, "Array<{}>", element),
        }
    }
}
