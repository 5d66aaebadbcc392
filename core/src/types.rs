//! Validated request inputs.
//!
//! # Design
//! Each type can only be constructed through a checking constructor, so a
//! value that reaches `RegistryClient` has already passed validation. The
//! response side has no types here: envelopes and records are owned by the
//! upstream API and pass through as `serde_json::Value`.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub const LEI_LEN: usize = 20;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
/// Largest page the upstream registry serves.
pub const MAX_PAGE_SIZE: u32 = 200;

/// A Legal Entity Identifier that has passed the format check.
///
/// Only the shape is checked: exactly 20 ASCII uppercase letters or digits.
/// The ISO 17442 check digits are left to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lei(String);

impl FromStr for Lei {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let well_formed = s.len() == LEI_LEN
            && s
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        if well_formed {
            Ok(Lei(s.to_string()))
        } else {
            Err(ValidationError::InvalidLei(s.to_string()))
        }
    }
}

impl fmt::Display for Lei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page number and page size, both within the registry's bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    size: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn new(page: u32, size: u32) -> Result<Self, ValidationError> {
        Self::from_raw(Some(&page.to_string()), Some(&size.to_string()))
    }

    /// Parse raw query-string values. Absent values fall back to the defaults.
    pub fn from_raw(page: Option<&str>, size: Option<&str>) -> Result<Self, ValidationError> {
        let page = match page {
            None => DEFAULT_PAGE,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) if (1..=i64::from(u32::MAX)).contains(&n) => n as u32,
                _ => return Err(ValidationError::InvalidPage(raw.to_string())),
            },
        };
        let size = match size {
            None => DEFAULT_PAGE_SIZE,
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(n) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&n) => n as u32,
                _ => {
                    return Err(ValidationError::InvalidSize {
                        value: raw.to_string(),
                        max: MAX_PAGE_SIZE,
                    })
                }
            },
        };
        Ok(Self { page, size })
    }

    /// Query pairs in the registry's JSON:API naming.
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("page[number]".to_string(), self.page.to_string()),
            ("page[size]".to_string(), self.size.to_string()),
        ]
    }
}

/// `filter[<field>]` pairs, forwarded to the registry verbatim and in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(Vec<(String, String)>);

impl Filters {
    /// Collect every `filter[...]` pair from a raw query string.
    ///
    /// Keys that do not start with `filter` are not filters and are skipped.
    /// Keys that do but are not exactly `filter[<field>]` are rejected.
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut filters = Vec::new();
        for (key, value) in pairs {
            if !key.starts_with("filter") {
                continue;
            }
            let field = key
                .strip_prefix("filter[")
                .and_then(|rest| rest.strip_suffix(']'))
                .filter(|field| is_field_path(field))
                .ok_or_else(|| ValidationError::MalformedFilterKey(key.to_string()))?;
            filters.push((format!("filter[{field}]"), value.to_string()));
        }
        Ok(Filters(filters))
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

/// A dotted path like `entity.legalName`: segments of ASCII alphanumerics or
/// `_`, each starting with a letter.
fn is_field_path(field: &str) -> bool {
    !field.is_empty()
        && field.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// The two required parameters of a fuzzy-completion lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyQuery {
    field: String,
    q: String,
}

impl FuzzyQuery {
    /// Blank values count as missing.
    pub fn new(field: Option<&str>, q: Option<&str>) -> Result<Self, ValidationError> {
        let field = non_blank(field).ok_or(ValidationError::MissingParameter("field"))?;
        let q = non_blank(q).ok_or(ValidationError::MissingParameter("q"))?;
        Ok(Self {
            field: field.to_string(),
            q: q.to_string(),
        })
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("field".to_string(), self.field.clone()),
            ("q".to_string(), self.q.clone()),
        ]
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
