//! # Identity Newtypes
//!
//! Domain-primitive newtypes for the identifiers that flow through the
//! compliance engine. Each identifier is a distinct type: you cannot pass
//! a [`TrackingId`] where an [`OrderId`] is expected, or a [`Country`]
//! where an [`ItemTag`] is expected.
//!
//! ## Validation
//!
//! String-based names ([`Country`], [`ItemTag`]) are trimmed and must be
//! non-empty. Numbered identifiers ([`OrderId`], [`TrackingId`]) carry a
//! six-digit body in `100000..=999999` and render as `ORD-NNNNNN` /
//! `TRK-NNNNNN`. Deserialization goes through the same constructors, so a
//! malformed catalog or request is rejected at the parse boundary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Named primitives
// ---------------------------------------------------------------------------

/// A country (or customs union, e.g. "EU") as named in the rule catalog.
///
/// Matching is exact after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Country(String);

impl Country {
    /// Create a country name, trimming whitespace.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCountry);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The country name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Country {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Country> for String {
    fn from(value: Country) -> Self {
        value.0
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A category of goods ("Lithium Battery", "Books", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemTag(String);

impl ItemTag {
    /// Create an item tag, trimming whitespace.
    pub fn new(tag: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = tag.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyItemTag);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The tag text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ItemTag {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ItemTag> for String {
    fn from(value: ItemTag) -> Self {
        value.0
    }
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Numbered identifiers
// ---------------------------------------------------------------------------

/// Smallest six-digit identifier body.
pub const ID_BODY_MIN: u32 = 100_000;
/// Largest six-digit identifier body.
pub const ID_BODY_MAX: u32 = 999_999;

fn parse_body(
    input: &str,
    prefix: &'static str,
    kind: &'static str,
) -> Result<u32, ValidationError> {
    let malformed = || ValidationError::MalformedId {
        kind,
        prefix,
        input: input.to_string(),
    };
    let digits = input
        .trim()
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .ok_or_else(malformed)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let body = digits.parse::<u32>().map_err(|_| malformed())?;
    if !(ID_BODY_MIN..=ID_BODY_MAX).contains(&body) {
        return Err(malformed());
    }
    Ok(body)
}

fn wrap_body(n: u32) -> u32 {
    ID_BODY_MIN + n % (ID_BODY_MAX - ID_BODY_MIN + 1)
}

fn check_body(
    body: u32,
    prefix: &'static str,
    kind: &'static str,
) -> Result<u32, ValidationError> {
    if (ID_BODY_MIN..=ID_BODY_MAX).contains(&body) {
        Ok(body)
    } else {
        Err(ValidationError::MalformedId {
            kind,
            prefix,
            input: body.to_string(),
        })
    }
}

/// Identifier shared by every container of one logical shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId(u32);

impl OrderId {
    const PREFIX: &'static str = "ORD";
    const KIND: &'static str = "order id";

    /// Build an order id from its six-digit body.
    pub fn from_number(body: u32) -> Result<Self, ValidationError> {
        check_body(body, Self::PREFIX, Self::KIND).map(Self)
    }

    /// Map any `u32` onto the six-digit body range. Used by id generators.
    pub fn wrapping(n: u32) -> Self {
        Self(wrap_body(n))
    }

    /// The numeric body.
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_body(s, Self::PREFIX, Self::KIND).map(Self)
    }
}

impl TryFrom<String> for OrderId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OrderId> for String {
    fn from(value: OrderId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:06}", Self::PREFIX, self.0)
    }
}

/// Identifier unique to one physical container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TrackingId(u32);

impl TrackingId {
    const PREFIX: &'static str = "TRK";
    const KIND: &'static str = "tracking id";

    /// Build a tracking id from its six-digit body.
    pub fn from_number(body: u32) -> Result<Self, ValidationError> {
        check_body(body, Self::PREFIX, Self::KIND).map(Self)
    }

    /// Map any `u32` onto the six-digit body range. Used by id generators.
    pub fn wrapping(n: u32) -> Self {
        Self(wrap_body(n))
    }

    /// The numeric body.
    pub fn number(&self) -> u32 {
        self.0
    }
}

impl FromStr for TrackingId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_body(s, Self::PREFIX, Self::KIND).map(Self)
    }
}

impl TryFrom<String> for TrackingId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TrackingId> for String {
    fn from(value: TrackingId) -> Self {
        value.to_string()
    }
}

impl fmt::Display for TrackingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:06}", Self::PREFIX, self.0)
    }
}
