use crate::error::{Error, Result};

/// Reject a signed count below zero and convert it to `usize`.
pub fn validate_count(name: &str, value: i64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| Error::InvalidArgument(format!("{name} must be >= 0 (got {value})")))
}

/// Ensure `min <= max` for an inclusive range argument.
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    min_name: &str,
    min: T,
    max_name: &str,
    max: T,
) -> Result<()> {
    if min > max {
        return Err(Error::InvalidArgument(format!(
            "{min_name} cannot be greater than {max_name} ({min} > {max})"
        )));
    }
    Ok(())
}

/// Ensure a sample of `k` distinct items can be drawn from `available`.
pub fn validate_sample_size(name: &str, k: usize, available: usize) -> Result<()> {
    if k < 1 {
        return Err(Error::InvalidArgument(format!("{name} must be >= 1")));
    }
    if k > available {
        return Err(Error::InvalidArgument(format!(
            "{name} ({k}) exceeds available teams ({available})"
        )));
    }
    Ok(())
}

/// Ensure ids `start..start + count` all fit in a `u64`.
pub fn validate_id_range(name: &str, start: u64, count: usize) -> Result<()> {
    u64::try_from(count)
        .ok()
        .and_then(|count| start.checked_add(count))
        .map(|_| ())
        .ok_or_else(|| {
            Error::InvalidArgument(format!(
                "{name} {start} leaves no room for {count} sequential ids"
            ))
        })
}

/// Validate an inclusive numeric bound such as a hashing cost.
pub fn validate_bounds(name: &str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(Error::InvalidArgument(format!(
            "{name} must be between {min} and {max} (got {value})"
        )));
    }
    Ok(())
}
