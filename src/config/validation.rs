//! Configuration and input validation.
//!
//! # Responsibilities
//! - Format checks for URLs, private keys, hashes, addresses and raw amounts
//! - Whole-config validation for files loaded from disk
//!
//! # Design Decisions
//! - `bypass_null_check` only lets a missing/empty value through; any
//!   non-empty value is always format-checked
//! - `validate_config` returns all validation errors, not just the first
//! - Validation runs before any network call

use std::fmt;
use url::Url;

use crate::config::schema::HelperConfig;
use crate::crypto::decode_address;
use crate::error::NanoError;

/// A single failed check, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for NanoError {
    fn from(err: ValidationError) -> Self {
        NanoError::Configuration(err.to_string())
    }
}

type Check = Result<(), ValidationError>;

/// `Some(non-empty)` proceeds to format checks; `None`/empty is decided here.
fn present<'a>(
    field: &'static str,
    value: Option<&'a str>,
    bypass_null_check: bool,
) -> Result<Option<&'a str>, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(Some(v)),
        _ if bypass_null_check => Ok(None),
        _ => Err(ValidationError::new(field, "is required")),
    }
}

/// Absolute `http`/`https` URL with a host.
pub fn validate_url(field: &'static str, value: Option<&str>, bypass_null_check: bool) -> Check {
    let Some(value) = present(field, value, bypass_null_check)? else {
        return Ok(());
    };
    let url = Url::parse(value)
        .map_err(|e| ValidationError::new(field, format!("is not a valid URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::new(field, "must use http or https"));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::new(field, "must include a host"));
    }
    Ok(())
}

/// Exactly 64 hex characters.
pub fn validate_private_key(value: Option<&str>, bypass_null_check: bool) -> Check {
    validate_hex64("private key", value, bypass_null_check)
}

/// Exactly 64 hex characters.
pub fn validate_hash(value: Option<&str>, bypass_null_check: bool) -> Check {
    validate_hex64("hash", value, bypass_null_check)
}

fn validate_hex64(field: &'static str, value: Option<&str>, bypass_null_check: bool) -> Check {
    let Some(value) = present(field, value, bypass_null_check)? else {
        return Ok(());
    };
    if value.len() != 64 || !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::new(field, "must be 64 hex characters"));
    }
    Ok(())
}

/// `nano_`/`xrb_` address with a valid checksum.
pub fn validate_address(value: Option<&str>, bypass_null_check: bool) -> Check {
    let Some(value) = present("address", value, bypass_null_check)? else {
        return Ok(());
    };
    match decode_address(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new(
            "address",
            format!("{value:?} is not a valid Nano address"),
        )),
    }
}

/// Canonical non-negative integer: `0`, or digits without a leading zero.
pub fn validate_raw_amount(value: Option<&str>, bypass_null_check: bool) -> Check {
    let Some(value) = present("amount", value, bypass_null_check)? else {
        return Ok(());
    };
    let digits_only = value.bytes().all(|b| b.is_ascii_digit());
    if !digits_only || (value.len() > 1 && value.starts_with('0')) {
        return Err(ValidationError::new(
            "amount",
            format!("{value:?} is not a raw integer amount"),
        ));
    }
    Ok(())
}

/// Validate a loaded configuration, collecting every failure.
pub fn validate_config(config: &HelperConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = validate_url("rpc_url", config.rpc_url.as_deref(), true) {
        errors.push(e);
    }
    if let Err(e) = validate_url(
        "work_generation_url",
        config.work_generation_url.as_deref(),
        true,
    ) {
        errors.push(e);
    }
    if config.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("rpc_timeout_secs", "must be greater than 0"));
    }
    if config.work_timeout_secs == 0 {
        errors.push(ValidationError::new("work_timeout_secs", "must be greater than 0"));
    }
    if !matches!(
        config.log_level.as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(ValidationError::new(
            "log_level",
            format!("{:?} is not a log level", config.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
