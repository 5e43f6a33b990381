//! Private key state.
//!
//! A key, once set, stays until explicitly cleared: setting over an existing
//! key is refused.

use crate::config::validation::validate_private_key;
use crate::crypto::SecretKey;
use crate::error::{NanoError, NanoResult};

#[derive(Debug, Clone, Default)]
pub enum Credentials {
    #[default]
    Unset,
    Set(SecretKey),
}

impl Credentials {
    /// `Unset → Set`. Fails on a malformed key or when a key is already set.
    pub fn set(&mut self, private_key: &str) -> NanoResult<()> {
        if let Credentials::Set(_) = self {
            return Err(NanoError::Configuration(
                "private key is already set; call clear_private_key() before setting a new one"
                    .into(),
            ));
        }
        validate_private_key(Some(private_key), false)?;
        *self = Credentials::Set(SecretKey::from_hex(private_key)?);
        Ok(())
    }

    /// `* → Unset`.
    pub fn clear(&mut self) {
        *self = Credentials::Unset;
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Credentials::Set(_))
    }

    /// The key, or a configuration error when none is set.
    pub fn secret(&self) -> NanoResult<&SecretKey> {
        match self {
            Credentials::Set(secret) => Ok(secret),
            Credentials::Unset => Err(NanoError::Configuration("private key is required".into())),
        }
    }
}
