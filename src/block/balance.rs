//! Post-send balance arithmetic over arbitrary-precision raw amounts.

use num_bigint::BigUint;

use crate::error::{NanoError, NanoResult};

/// Compute `current_balance - amount_to_send`.
///
/// Both inputs are non-negative decimal integers. The result is canonical
/// (no leading zeros). A negative result is an insufficient balance error;
/// nothing is clamped.
pub fn balance_after_send(current_balance: &str, amount_to_send: &str) -> NanoResult<String> {
    let balance = parse_raw("balance", current_balance)?;
    let amount = parse_raw("amount", amount_to_send)?;

    if amount > balance {
        return Err(NanoError::InsufficientBalance {
            balance: balance.to_string(),
            amount: amount.to_string(),
        });
    }
    Ok((balance - amount).to_string())
}

fn parse_raw(field: &str, value: &str) -> NanoResult<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(NanoError::Configuration(format!(
            "{field} {value:?} is not a non-negative integer"
        )));
    }
    BigUint::parse_bytes(value.as_bytes(), 10).ok_or_else(|| {
        NanoError::Configuration(format!("{field} {value:?} is not a non-negative integer"))
    })
}
