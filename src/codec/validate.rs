//! Field validation run before any line is emitted.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::net::IpAddr;

/// `field` may only be set together with `required`.
pub fn required_with(field: &str, is_set: bool, required: &str, required_set: bool) -> Result<()> {
    if is_set && !required_set {
        return Err(Error::validation(format!("{} requires {}", field, required)));
    }
    Ok(())
}

/// `first` and `second` are mutually exclusive.
pub fn conflicts_with(first: &str, first_set: bool, second: &str, second_set: bool) -> Result<()> {
    if first_set && second_set {
        return Err(Error::validation(format!(
            "{} and {} cannot both be set",
            first, second
        )));
    }
    Ok(())
}

fn field_names(fields: &[(&str, bool)]) -> String {
    fields
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Exactly one field of the group is set.
pub fn exactly_one_of(fields: &[(&str, bool)]) -> Result<()> {
    match fields.iter().filter(|(_, set)| *set).count() {
        1 => Ok(()),
        _ => Err(Error::validation(format!(
            "exactly one of [{}] must be set",
            field_names(fields)
        ))),
    }
}

/// At least one field of the group is set.
pub fn at_least_one_of(fields: &[(&str, bool)]) -> Result<()> {
    if fields.iter().any(|(_, set)| *set) {
        Ok(())
    } else {
        Err(Error::validation(format!(
            "at least one of [{}] must be set",
            field_names(fields)
        )))
    }
}

/// `value` is one of `allowed`.
pub fn string_in_slice(field: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(Error::validation(format!(
        "{}: expected to be one of [{}], got '{}'",
        field,
        allowed.join(", "),
        value
    )))
}

/// Optional variant of [`string_in_slice`]; unset passes.
pub fn opt_string_in_slice(field: &str, value: Option<&str>, allowed: &[&str]) -> Result<()> {
    match value {
        Some(value) => string_in_slice(field, value, allowed),
        None => Ok(()),
    }
}

/// `lo <= value <= hi`.
pub fn int_between<T>(field: &str, value: T, lo: T, hi: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    if value < lo || value > hi {
        return Err(Error::validation(format!(
            "{}: expected to be in the range ({} - {}), got {}",
            field, lo, hi, value
        )));
    }
    Ok(())
}

/// Optional variant of [`int_between`]; unset passes.
pub fn opt_int_between<T>(field: &str, value: Option<T>, lo: T, hi: T) -> Result<()>
where
    T: PartialOrd + Display + Copy,
{
    match value {
        Some(value) => int_between(field, value, lo, hi),
        None => Ok(()),
    }
}

/// `value` is not empty.
pub fn non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// No item of the list `field` appears twice.
pub fn unique_items(field: &str, values: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    match values.iter().find(|v| !seen.insert(v.as_str())) {
        Some(repeated) => Err(Error::validation(format!(
            "{} lists '{}' more than once",
            field, repeated
        ))),
        None => Ok(()),
    }
}

/// `value` parses as an IPv4 or IPv6 address.
pub fn ip_address(field: &str, value: &str) -> Result<()> {
    value.parse::<IpAddr>().map(|_| ()).map_err(|_| {
        Error::validation(format!(
            "{}: expected a valid IP address, got '{}'",
            field, value
        ))
    })
}
